//! Config loading facade: one entry point over defaults, files and environment.

use super::merge::merge_policy;
use super::sources::{environment, global_file, workspace_file};
use super::ServerConfig;
use config::ConfigError;
use config::File;
use std::path::{Path, PathBuf};
use tracing::debug;

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a workspace.
    ///
    /// Precedence (lowest to highest): defaults, global file, workspace files, environment.
    pub fn load(workspace_root: &Path) -> Result<ServerConfig, ConfigError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = workspace_file::add_to_builder(builder, workspace_root)?;
        let builder = environment::add_to_builder(builder);

        let config: ServerConfig = builder.build()?.try_deserialize()?;
        debug!(
            workspace = %workspace_root.display(),
            mode = ?config.catalog.mode,
            endpoints = config.endpoints.len(),
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Load from an explicit file; skips the global and workspace files.
    pub fn load_from_file(path: &Path) -> Result<ServerConfig, ConfigError> {
        let builder = merge_policy::builder_with_defaults()?
            .add_source(File::from(path.to_path_buf()).required(true));
        let builder = environment::add_to_builder(builder);
        builder.build()?.try_deserialize()
    }

    /// Location of the user-level config file, if a home directory is known.
    pub fn global_config_path() -> Option<PathBuf> {
        global_file::global_config_path()
    }

    pub fn default() -> ServerConfig {
        ServerConfig::default()
    }
}
