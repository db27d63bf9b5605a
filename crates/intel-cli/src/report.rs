//! Tables printed by `tools` and `check`

use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use intel_market::{ApiProvider, Availability, IntelConfig, ToolKind, ToolSet};

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

fn env_vars(providers: &[ApiProvider]) -> String {
    providers
        .iter()
        .filter_map(|p| p.env_var())
        .collect::<Vec<_>>()
        .join(", ")
}

/// One row per provider: env var and whether its key is present
pub fn providers_table(config: &IntelConfig) -> Table {
    let mut table = new_table(vec!["Provider", "Env var", "Status"]);

    for provider in ApiProvider::ALL {
        let status = match provider.env_var() {
            None => "no key needed",
            Some(_) if config.is_configured(provider) => "configured",
            Some(_) => "missing",
        };
        table.add_row(vec![
            provider.display_name(),
            provider.env_var().unwrap_or("-"),
            status,
        ]);
    }
    table
}

/// One row per tool: availability under this configuration and description
pub fn tools_table(tools: &ToolSet, config: &IntelConfig) -> Table {
    let mut table = new_table(vec!["Tool", "Available", "Description"]);

    for kind in ToolKind::ALL {
        let description = tools
            .get(kind)
            .map(|tool| tool.description().to_string())
            .unwrap_or_default();
        let available = match kind.availability(config) {
            Availability::Ready => "yes".to_string(),
            Availability::Degraded(missing) => format!("degraded ({})", env_vars(&missing)),
            Availability::Unavailable(missing) => format!("no ({})", env_vars(&missing)),
        };
        table.add_row(vec![kind.name().to_string(), available, description]);
    }
    table
}
