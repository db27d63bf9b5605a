//! Environment loading helpers

use std::path::Path;

/// Load a `.env` file from the current directory or the nearest ancestor
/// that has one. Returns the path that was loaded, if any.
///
/// Variables already present in the process environment are not overridden.
pub fn load_dotenv() -> Option<std::path::PathBuf> {
    if let Ok(path) = dotenvy::dotenv() {
        return Some(path);
    }

    let cwd = std::env::current_dir().ok()?;
    let mut dir: &Path = cwd.as_path();
    while let Some(parent) = dir.parent() {
        let env_path = parent.join(".env");
        if env_path.exists() {
            return dotenvy::from_path(&env_path).ok().map(|()| env_path);
        }
        dir = parent;
    }

    None
}

/// Read an environment variable, treating blank values and `your_...`
/// placeholders copied from `.env.example` as unset.
pub fn non_empty_var(name: &str) -> Option<String> {
    let value = std::env::var(name).ok()?;
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.starts_with("your_") {
        return None;
    }
    Some(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_var_is_none() {
        assert!(non_empty_var("CLIENT_INTEL_TEST_SURELY_UNSET_VAR").is_none());
    }

    #[test]
    fn test_set_var_is_trimmed() {
        unsafe {
            std::env::set_var("CLIENT_INTEL_TEST_TRIMMED_VAR", "  abc123  ");
        }
        assert_eq!(
            non_empty_var("CLIENT_INTEL_TEST_TRIMMED_VAR").as_deref(),
            Some("abc123")
        );
    }

    #[test]
    fn test_blank_and_placeholder_are_none() {
        unsafe {
            std::env::set_var("CLIENT_INTEL_TEST_BLANK_VAR", "   ");
            std::env::set_var("CLIENT_INTEL_TEST_PLACEHOLDER_VAR", "your_key_here");
        }
        assert!(non_empty_var("CLIENT_INTEL_TEST_BLANK_VAR").is_none());
        assert!(non_empty_var("CLIENT_INTEL_TEST_PLACEHOLDER_VAR").is_none());
    }
}
