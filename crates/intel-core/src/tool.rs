//! Tool trait definition

use crate::{Result, ToolError};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

/// Trait for tools exposed to the host model
///
/// Each tool must provide a name, description, and JSON schema for its input.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Execute the tool with given parameters
    ///
    /// # Arguments
    ///
    /// * `params` - Tool input as JSON value (should match input_schema)
    ///
    /// # Returns
    ///
    /// Tool output as JSON value, or a [`ToolError`] descriptor
    async fn execute(&self, params: Value) -> Result<Value>;

    /// Get the tool's name
    ///
    /// Must be unique within a tool set and stable across releases
    fn name(&self) -> &str;

    /// Get the tool's description
    ///
    /// This description helps the host model understand when to use this tool
    fn description(&self) -> &str;

    /// Get the tool's input schema (JSON Schema format)
    ///
    /// # Example
    ///
    /// ```
    /// use serde_json::json;
    ///
    /// let schema = json!({
    ///     "type": "object",
    ///     "properties": {
    ///         "stock_ticker": { "type": "string" }
    ///     },
    ///     "required": ["stock_ticker"]
    /// });
    /// ```
    fn input_schema(&self) -> Value;
}

/// A fixed set of tools served over one connection
pub trait ToolCatalog: Send + Sync {
    /// Tools in listing order
    fn tools(&self) -> Vec<Arc<dyn Tool>>;

    /// Look up a tool by its wire name
    fn resolve(&self, name: &str) -> Option<Arc<dyn Tool>>;
}

/// Deserialize tool parameters, mapping failures to `InvalidInput`
///
/// A JSON `null` is treated as an empty object so tools whose parameters are
/// all optional can be called without arguments.
pub fn parse_params<T: DeserializeOwned>(params: Value) -> Result<T> {
    let params = if params.is_null() {
        Value::Object(serde_json::Map::new())
    } else {
        params
    };

    serde_json::from_value(params)
        .map_err(|e| ToolError::invalid_input(format!("Invalid parameters: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct EchoParams {
        text: String,
        #[serde(default)]
        repeat: Option<u32>,
    }

    struct EchoTool;

    #[async_trait]
    impl Tool for EchoTool {
        async fn execute(&self, params: Value) -> Result<Value> {
            let params: EchoParams = parse_params(params)?;
            let times = params.repeat.unwrap_or(1) as usize;
            Ok(json!({ "text": params.text.repeat(times) }))
        }

        fn name(&self) -> &str {
            "echo"
        }

        fn description(&self) -> &str {
            "Echo text back"
        }

        fn input_schema(&self) -> Value {
            json!({"type": "object", "properties": {"text": {"type": "string"}}})
        }
    }

    #[tokio::test]
    async fn test_execute_with_valid_params() {
        let result = EchoTool
            .execute(json!({"text": "ab", "repeat": 2, "ignored": true}))
            .await
            .unwrap();
        assert_eq!(result["text"], "abab");
    }

    #[tokio::test]
    async fn test_missing_param_is_invalid_input() {
        let err = EchoTool.execute(json!({"repeat": 2})).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert!(err.message().contains("text"));
    }

    struct Single(Arc<dyn Tool>);

    impl ToolCatalog for Single {
        fn tools(&self) -> Vec<Arc<dyn Tool>> {
            vec![self.0.clone()]
        }

        fn resolve(&self, name: &str) -> Option<Arc<dyn Tool>> {
            (self.0.name() == name).then(|| self.0.clone())
        }
    }

    #[tokio::test]
    async fn test_catalog_resolves_by_name() {
        let catalog = Single(Arc::new(EchoTool));

        assert_eq!(catalog.tools().len(), 1);
        assert!(catalog.resolve("missing").is_none());

        let tool = catalog.resolve("echo").unwrap();
        let result = tool.execute(json!({"text": "hi"})).await.unwrap();
        assert_eq!(result["text"], "hi");
    }

    #[test]
    fn test_null_params_become_empty_object() {
        #[derive(Debug, Deserialize)]
        struct Optional {
            #[serde(default)]
            limit: Option<u32>,
        }

        let parsed: Optional = parse_params(Value::Null).unwrap();
        assert!(parsed.limit.is_none());
    }
}
