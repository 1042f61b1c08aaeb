//! CLI parse: clap types for inventory-mcp. No behavior; definitions only.

use crate::config::CatalogMode;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// inventory-mcp - MCP server that seeds an inventory API with realistic test data
#[derive(Parser, Debug)]
#[command(name = "inventory-mcp", version)]
#[command(about = "MCP server that seeds an inventory API with realistic test data")]
pub struct Cli {
    /// Command to run (default: serve)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Workspace root directory (looked up for config/config.toml)
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Target API base URL
    #[arg(long)]
    pub base_url: Option<String>,

    /// Catalog source (builtin, configured)
    #[arg(long)]
    pub catalog: Option<CatalogMode>,

    /// Seed for reproducible generated data
    #[arg(long)]
    pub seed: Option<u64>,

    /// Log at debug level
    #[arg(long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Disable logging
    #[arg(long)]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stderr, file, file+stderr)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Serve MCP over stdin/stdout
    Serve,
    /// List available tools
    Tools {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Invoke one tool and print its result
    Call {
        /// Tool name
        name: String,
        /// Tool arguments as a JSON object
        #[arg(long, default_value = "{}")]
        args: String,
    },
    /// Print the effective configuration as TOML
    Config,
}
