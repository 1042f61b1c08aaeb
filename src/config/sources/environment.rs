//! Environment source: INVENTORY_MCP__SECTION__KEY overrides.

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::Environment;

pub const ENV_PREFIX: &str = "INVENTORY_MCP";

/// Add environment overrides, e.g. `INVENTORY_MCP__API__BASE_URL`.
pub fn add_to_builder(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true),
    )
}
