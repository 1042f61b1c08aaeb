//! Merge rules: defaults, override order, conflict handling.

use crate::config::{
    default_backoff_unit_ms, default_base_url, default_connect_timeout_secs,
    default_max_attempts, default_max_batch_size, default_request_timeout_secs,
};
use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("api.base_url", default_base_url())?
        .set_default("api.request_timeout_secs", default_request_timeout_secs() as i64)?
        .set_default("api.connect_timeout_secs", default_connect_timeout_secs() as i64)?
        .set_default("api.max_attempts", default_max_attempts() as i64)?
        .set_default("api.backoff_unit_ms", default_backoff_unit_ms() as i64)?
        .set_default("catalog.mode", "builtin")?
        .set_default("generation.max_batch_size", default_max_batch_size() as i64)
}
