//! inventory-mcp binary
//!
//! Loads configuration, sets up logging and runs the selected command. With no subcommand the
//! MCP server is served on stdin/stdout.

use anyhow::Context;
use clap::Parser;
use inventory_mcp::cli::{command_name, map_error, Cli, Commands, ConfigOverrides, RunContext};
use inventory_mcp::logging::{init_logging, LoggingConfig};
use std::process;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("{:#}", e);
        process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let command = cli.command.clone().unwrap_or(Commands::Serve);

    let overrides = ConfigOverrides::from(&cli);
    let config = RunContext::load_config(&cli.workspace, cli.config.as_deref(), &overrides)
        .map_err(|e| anyhow::anyhow!(map_error(&e)))
        .context("Failed to load configuration")?;

    let logging_config = build_logging_config(&cli, &config.logging);
    init_logging(Some(&logging_config), command == Commands::Serve)
        .map_err(|e| anyhow::anyhow!(map_error(&e)))
        .context("Failed to initialize logging")?;

    info!(command = command_name(&command), "inventory-mcp starting");

    let context = RunContext::new(config).map_err(|e| {
        error!("Error initializing server: {}", e);
        anyhow::anyhow!(map_error(&e))
    })?;

    match context.execute(&command).await {
        Ok(output) => {
            info!("Command completed successfully");
            if !output.is_empty() {
                println!("{}", output);
            }
            Ok(())
        }
        Err(e) => {
            error!("Command failed: {}", e);
            Err(anyhow::anyhow!(map_error(&e)))
        }
    }
}

/// Fold CLI logging flags over the configured logging section (CLI wins).
fn build_logging_config(cli: &Cli, base: &LoggingConfig) -> LoggingConfig {
    let mut config = base.clone();

    if cli.quiet {
        config.enabled = false;
        return config;
    }
    if cli.verbose {
        config.level = "debug".to_string();
    }
    if let Some(ref level) = cli.log_level {
        config.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        config.format = format.clone();
    }
    if let Some(ref output) = cli.log_output {
        config.output = output.clone();
    }
    if let Some(ref file) = cli.log_file {
        config.file = Some(file.clone());
        if cli.log_output.is_none() && config.output == "stderr" {
            config.output = "file+stderr".to_string();
        }
    }

    config
}
