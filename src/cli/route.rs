//! CLI route: single route table and run context. Dispatches to domain services and presentation.

use crate::cli::parse::{Cli, Commands};
use crate::cli::presentation::{format_catalog_json, format_catalog_text};
use crate::cli::command_name;
use crate::config::{CatalogMode, ConfigLoader, ServerConfig};
use crate::dispatch::Dispatcher;
use crate::error::ServiceError;
use crate::mcp::McpServer;
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Command-line values that take precedence over every config layer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub base_url: Option<String>,
    pub catalog: Option<CatalogMode>,
    pub seed: Option<u64>,
}

impl ConfigOverrides {
    pub fn apply(&self, config: &mut ServerConfig) {
        if let Some(ref base_url) = self.base_url {
            config.api.base_url = base_url.clone();
        }
        if let Some(mode) = self.catalog {
            config.catalog.mode = mode;
        }
        if let Some(seed) = self.seed {
            config.generation.seed = Some(seed);
        }
    }
}

impl From<&Cli> for ConfigOverrides {
    fn from(cli: &Cli) -> Self {
        Self {
            base_url: cli.base_url.clone(),
            catalog: cli.catalog,
            seed: cli.seed,
        }
    }
}

/// Runtime context for CLI execution: the validated config and the dispatcher built from it.
pub struct RunContext {
    config: ServerConfig,
    dispatcher: Arc<Dispatcher>,
}

impl RunContext {
    /// Load configuration: an explicit file replaces the global and workspace layers.
    pub fn load_config(
        workspace_root: &Path,
        config_path: Option<&Path>,
        overrides: &ConfigOverrides,
    ) -> Result<ServerConfig, ServiceError> {
        let mut config = match config_path {
            Some(path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load(workspace_root)?,
        };
        overrides.apply(&mut config);
        Ok(config)
    }

    /// Validate `config` and build the dispatcher over the HTTP transport.
    pub fn new(config: ServerConfig) -> Result<Self, ServiceError> {
        let config = config.validated()?;
        let dispatcher = Arc::new(Dispatcher::from_config(&config));
        Ok(Self { config, dispatcher })
    }

    /// Build around an existing dispatcher (config is used only for `config` output).
    pub fn with_dispatcher(config: ServerConfig, dispatcher: Arc<Dispatcher>) -> Self {
        Self { config, dispatcher }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Execute a CLI command via the single route table.
    pub async fn execute(&self, command: &Commands) -> Result<String, ServiceError> {
        let started = Instant::now();
        let result = self.execute_inner(command).await;
        debug!(
            command = command_name(command),
            ok = result.is_ok(),
            duration_ms = started.elapsed().as_millis() as u64,
            "Command finished"
        );
        result
    }

    async fn execute_inner(&self, command: &Commands) -> Result<String, ServiceError> {
        match command {
            Commands::Serve => {
                info!(
                    base_url = %self.config.api.base_url,
                    catalog = ?self.config.catalog.mode,
                    "Serving MCP on stdio"
                );
                McpServer::new(Arc::clone(&self.dispatcher))
                    .run_stdio()
                    .await?;
                Ok(String::new())
            }
            Commands::Tools { format } => {
                let tools = self.dispatcher.catalog().list_operations();
                match format.as_str() {
                    "json" => format_catalog_json(&tools),
                    "text" => Ok(format_catalog_text(&tools)),
                    other => Err(ServiceError::InvalidArgument {
                        argument: "format".to_string(),
                        message: format!("must be 'text' or 'json', got '{}'", other),
                    }),
                }
            }
            Commands::Call { name, args } => {
                let arguments: Value =
                    serde_json::from_str(args).map_err(|e| ServiceError::InvalidArgument {
                        argument: "args".to_string(),
                        message: format!("not valid JSON: {}", e),
                    })?;
                let outcome = self.dispatcher.invoke(name, &arguments).await?;
                outcome.to_pretty_json()
            }
            Commands::Config => self.config.to_toml(),
        }
    }
}
