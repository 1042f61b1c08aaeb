//! CLI command-name contract for logging.

use crate::cli::parse::Commands;

/// Stable command name used in log fields (e.g. "serve", "call").
pub fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Serve => "serve",
        Commands::Tools { .. } => "tools",
        Commands::Call { .. } => "call",
        Commands::Config => "config",
    }
}
