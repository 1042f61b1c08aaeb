//! Logging System
//!
//! Structured logging on `tracing`. stdout carries the MCP protocol while serving, so logs
//! go to stderr by default and may be redirected to a file or both.

use crate::error::ServiceError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

pub const LOG_ENV: &str = "INVENTORY_MCP_LOG";
pub const LOG_FORMAT_ENV: &str = "INVENTORY_MCP_LOG_FORMAT";
pub const LOG_OUTPUT_ENV: &str = "INVENTORY_MCP_LOG_OUTPUT";

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Disable to install no subscriber at all
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Log level: trace, debug, info, warn, error, off
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format: json, text
    #[serde(default = "default_format")]
    pub format: String,

    /// Output destination: stderr, stdout, file, file+stderr
    #[serde(default = "default_output")]
    pub output: String,

    /// Log file path (required when output includes "file")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,

    /// Colored output (text format on a terminal stream only)
    #[serde(default = "default_true")]
    pub color: bool,

    /// Module-specific log levels
    #[serde(default)]
    pub modules: HashMap<String, String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_format() -> String {
    "text".to_string()
}

fn default_output() -> String {
    "stderr".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: default_log_level(),
            format: default_format(),
            output: default_output(),
            file: None,
            color: default_true(),
            modules: HashMap::new(),
        }
    }
}

/// Where log lines are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputDestinations {
    pub stdout: bool,
    pub stderr: bool,
    pub file: bool,
}

/// Initialize the logging system.
///
/// Priority order (highest to lowest): CLI flags (folded into `config` by the binary),
/// `INVENTORY_MCP_LOG*` environment variables, configuration file, defaults.
///
/// `serving` rejects stdout output, which would corrupt the protocol stream.
pub fn init_logging(config: Option<&LoggingConfig>, serving: bool) -> Result<(), ServiceError> {
    if !config.map(|c| c.enabled).unwrap_or(true) {
        return Ok(());
    }

    let filter = build_env_filter(config)?;
    let format = determine_format(config)?;
    let output = determine_output(config)?;

    if serving && output.stdout {
        return Err(ServiceError::Config(
            "Log output 'stdout' is reserved for the protocol stream while serving; \
             use 'stderr' or 'file'"
                .to_string(),
        ));
    }

    let use_color = config.map(|c| c.color).unwrap_or(true);
    let json = format == "json";
    let mut layers: Vec<BoxedLayer> = Vec::new();

    if output.file {
        let writer = std::sync::Mutex::new(open_log_file(config)?);
        let layer = fmt::layer()
            .with_target(true)
            .with_timer(ChronoUtc::rfc_3339())
            .with_ansi(false)
            .with_writer(writer);
        layers.push(if json { layer.json().boxed() } else { layer.boxed() });
    }

    if output.stderr {
        let layer = fmt::layer()
            .with_target(true)
            .with_timer(ChronoUtc::rfc_3339())
            .with_ansi(use_color && !json)
            .with_writer(std::io::stderr);
        layers.push(if json { layer.json().boxed() } else { layer.boxed() });
    } else if output.stdout {
        let layer = fmt::layer()
            .with_target(true)
            .with_timer(ChronoUtc::rfc_3339())
            .with_ansi(use_color && !json)
            .with_writer(std::io::stdout);
        layers.push(if json { layer.json().boxed() } else { layer.boxed() });
    }

    Registry::default()
        .with(layers)
        .with(filter)
        .try_init()
        .map_err(|e| ServiceError::Config(format!("Failed to install log subscriber: {}", e)))
}

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

fn open_log_file(config: Option<&LoggingConfig>) -> Result<std::fs::File, ServiceError> {
    let log_file = config.and_then(|c| c.file.clone()).ok_or_else(|| {
        ServiceError::Config("Log output includes 'file' but no log file is set".to_string())
    })?;

    if let Some(parent) = log_file.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ServiceError::Config(format!("Failed to create log directory: {}", e))
            })?;
        }
    }
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file)
        .map_err(|e| {
            ServiceError::Config(format!("Failed to open log file {:?}: {}", log_file, e))
        })
}

/// Build environment filter from config or environment variables
fn build_env_filter(config: Option<&LoggingConfig>) -> Result<EnvFilter, ServiceError> {
    if let Ok(filter) = EnvFilter::try_from_env(LOG_ENV) {
        return Ok(filter);
    }

    let level = config.map(|c| c.level.as_str()).unwrap_or("info");
    if level == "off" {
        return Ok(EnvFilter::new("off"));
    }

    let mut filter = EnvFilter::new(level);
    if let Some(config) = config {
        let mut modules: Vec<_> = config.modules.iter().collect();
        modules.sort();
        for (module, module_level) in modules {
            let directive = format!("{}={}", module, module_level);
            filter = filter.add_directive(
                directive
                    .parse()
                    .map_err(|e| ServiceError::Config(format!("Invalid log directive: {}", e)))?,
            );
        }
    }

    Ok(filter)
}

/// Determine output format from config or environment
fn determine_format(config: Option<&LoggingConfig>) -> Result<String, ServiceError> {
    if let Ok(format) = std::env::var(LOG_FORMAT_ENV) {
        if format == "json" || format == "text" {
            return Ok(format);
        }
    }

    let format = config.map(|c| c.format.as_str()).unwrap_or("text");
    if format != "json" && format != "text" {
        return Err(ServiceError::Config(format!(
            "Invalid log format: {} (must be 'json' or 'text')",
            format
        )));
    }

    Ok(format.to_string())
}

fn determine_output(config: Option<&LoggingConfig>) -> Result<OutputDestinations, ServiceError> {
    if let Ok(output) = std::env::var(LOG_OUTPUT_ENV) {
        return parse_output_destinations(&output);
    }
    parse_output_destinations(config.map(|c| c.output.as_str()).unwrap_or("stderr"))
}

pub fn parse_output_destinations(output: &str) -> Result<OutputDestinations, ServiceError> {
    let (stdout, stderr, file) = match output {
        "stderr" => (false, true, false),
        "stdout" => (true, false, false),
        "file" => (false, false, true),
        "file+stderr" | "both" => (false, true, true),
        _ => {
            return Err(ServiceError::Config(format!(
                "Invalid log output: {} (must be 'stderr', 'stdout', 'file', or 'file+stderr')",
                output
            )))
        }
    };
    Ok(OutputDestinations {
        stdout,
        stderr,
        file,
    })
}
