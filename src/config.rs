//! Configuration System
//!
//! Layered configuration for the server: built-in defaults, a user-level file, workspace
//! files and `INVENTORY_MCP__*` environment overrides, merged with the `config` crate.
//! The endpoint map decides which operations exist in configured mode and how their
//! payloads are shaped.

use crate::catalog::{CatalogSource, Operation};
use crate::error::ServiceError;
use crate::executor::RetryPolicy;
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::warn;

mod endpoints;
mod facade;
mod merge;
mod sources;

pub use endpoints::{EndpointMap, EndpointSpec, FieldMap, FieldSpec};
pub use facade::ConfigLoader;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Target API connection and retry settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Where the operation catalog comes from
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Record generation settings
    #[serde(default)]
    pub generation: GenerationConfig,

    /// Endpoint map (used in configured mode)
    #[serde(default)]
    pub endpoints: EndpointMap,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Target API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-attempt request timeout
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Total attempts per record, including the first
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Backoff after attempt N is `backoff_unit_ms * 2^N`
    #[serde(default = "default_backoff_unit_ms")]
    pub backoff_unit_ms: u64,
}

pub(crate) fn default_base_url() -> String {
    "http://localhost:8000/".to_string()
}

pub(crate) fn default_request_timeout_secs() -> u64 {
    30
}

pub(crate) fn default_connect_timeout_secs() -> u64 {
    10
}

pub(crate) fn default_max_attempts() -> u32 {
    3
}

pub(crate) fn default_backoff_unit_ms() -> u64 {
    1000
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            max_attempts: default_max_attempts(),
            backoff_unit_ms: default_backoff_unit_ms(),
        }
    }
}

impl ApiConfig {
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts,
            backoff_unit: Duration::from_millis(self.backoff_unit_ms),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn validate(&self) -> Result<(), String> {
        let url = reqwest::Url::parse(&self.base_url)
            .map_err(|e| format!("Invalid base_url '{}': {}", self.base_url, e))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(format!(
                "base_url must use http or https, got '{}'",
                url.scheme()
            ));
        }
        if self.max_attempts == 0 {
            return Err("max_attempts must be at least 1".to_string());
        }
        if self.request_timeout_secs == 0 {
            return Err("request_timeout_secs must be greater than 0".to_string());
        }
        if self.connect_timeout_secs == 0 {
            return Err("connect_timeout_secs must be greater than 0".to_string());
        }
        Ok(())
    }
}

/// Catalog source selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogMode {
    /// Fixed built-in operations and endpoint table
    #[default]
    #[serde(alias = "built-in", alias = "fixed")]
    Builtin,
    /// Operations derived from the `[endpoints]` map
    #[serde(alias = "config")]
    Configured,
}

impl std::str::FromStr for CatalogMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "builtin" | "built-in" | "fixed" => Ok(CatalogMode::Builtin),
            "configured" | "config" => Ok(CatalogMode::Configured),
            other => Err(format!(
                "Invalid catalog mode: {} (must be 'builtin' or 'configured')",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default)]
    pub mode: CatalogMode,
}

/// Record generation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Base seed for reproducible batches (entropy when absent)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    /// Largest `count` a single invocation may request
    #[serde(default = "default_max_batch_size")]
    pub max_batch_size: u64,
}

pub(crate) fn default_max_batch_size() -> u64 {
    1000
}

/// Ceiling for `generation.max_batch_size`
pub const MAX_BATCH_SIZE_LIMIT: u64 = 100_000;

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            seed: None,
            max_batch_size: default_max_batch_size(),
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone)]
pub enum ValidationError {
    Api(String),
    Endpoint(String, String),
    Catalog(String),
    Generation(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Api(msg) => write!(f, "API: {}", msg),
            ValidationError::Endpoint(name, msg) => write!(f, "Endpoint '{}': {}", name, msg),
            ValidationError::Catalog(msg) => write!(f, "Catalog: {}", msg),
            ValidationError::Generation(msg) => write!(f, "Generation: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl ServerConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = self.api.validate() {
            errors.push(ValidationError::Api(e));
        }

        let mut names: Vec<&String> = self.endpoints.keys().collect();
        names.sort();
        for name in names {
            if let Err(e) = self.endpoints[name].validate() {
                errors.push(ValidationError::Endpoint(name.clone(), e));
            }
            if Operation::from_endpoint_key(name).is_none() {
                warn!(endpoint = %name, "Ignoring endpoint with no matching operation");
            }
        }

        if self.catalog.mode == CatalogMode::Configured
            && !Operation::ALL
                .iter()
                .any(|op| self.endpoints.contains_key(op.endpoint_key()))
        {
            errors.push(ValidationError::Catalog(
                "configured mode needs at least one of [endpoints.products], \
                 [endpoints.customers] or [endpoints.reset]"
                    .to_string(),
            ));
        }

        if self.generation.max_batch_size == 0 {
            errors.push(ValidationError::Generation(
                "max_batch_size must be at least 1".to_string(),
            ));
        } else if self.generation.max_batch_size > MAX_BATCH_SIZE_LIMIT {
            errors.push(ValidationError::Generation(format!(
                "max_batch_size must be at most {}, got {}",
                MAX_BATCH_SIZE_LIMIT, self.generation.max_batch_size
            )));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Validate and fold all errors into one service error.
    pub fn validated(self) -> Result<Self, ServiceError> {
        self.validate().map_err(|errors| {
            let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            ServiceError::Validation(error_msgs.join("\n"))
        })?;
        Ok(self)
    }

    /// Catalog source implied by the configured mode.
    pub fn catalog_source(&self) -> CatalogSource {
        match self.catalog.mode {
            CatalogMode::Builtin => CatalogSource::BuiltIn,
            CatalogMode::Configured => CatalogSource::Configured(self.endpoints.clone()),
        }
    }

    /// Render as TOML (used by `inventory-mcp config`).
    pub fn to_toml(&self) -> Result<String, ServiceError> {
        toml::to_string_pretty(self)
            .map_err(|e| ServiceError::Config(format!("Failed to render config: {}", e)))
    }
}
