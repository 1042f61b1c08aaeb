//! Command Dispatcher
//!
//! Routes one invocation (operation name plus JSON arguments) to its operation, checks the
//! arguments, and drives the synthesize-then-submit loop for generation batches.

use crate::catalog::{Catalog, Operation, ResolvedOperation};
use crate::config::ServerConfig;
use crate::error::ServiceError;
use crate::executor::{BackoffExecutor, Connector, HttpConnector, RequestResult};
use crate::synth::{Payload, PayloadSynthesizer, UniqueValues};
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info};

pub const COUNT_REQUIRED: &str = "'count' argument is required.";
pub const CONFIRMATION_REQUIRED: &str = "Confirmation required";

/// One element of a generation batch: the request result plus, on success, the record
/// that was sent under `product` / `customer`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchEntry {
    #[serde(flatten)]
    pub result: RequestResult,
    #[serde(flatten)]
    pub record: Map<String, Value>,
}

impl BatchEntry {
    pub fn is_success(&self) -> bool {
        self.result.is_success()
    }
}

/// What one invocation produced.
#[derive(Debug, Clone, PartialEq)]
pub enum InvocationOutcome {
    Batch(Vec<BatchEntry>),
    Single(RequestResult),
    Cancelled { reason: String },
    Rejected { error: String },
}

impl InvocationOutcome {
    fn rejected(error: impl Into<String>) -> Self {
        InvocationOutcome::Rejected {
            error: error.into(),
        }
    }

    /// Whether the transport should flag this outcome as a tool error.
    pub fn is_error(&self) -> bool {
        matches!(self, InvocationOutcome::Rejected { .. })
    }

    pub fn to_pretty_json(&self) -> Result<String, ServiceError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Serialize for InvocationOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            InvocationOutcome::Batch(entries) => entries.serialize(serializer),
            InvocationOutcome::Single(result) => result.serialize(serializer),
            InvocationOutcome::Cancelled { reason } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("status", "cancelled")?;
                map.serialize_entry("reason", reason)?;
                map.end()
            }
            InvocationOutcome::Rejected { error } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("status", "error")?;
                map.serialize_entry("error", error)?;
                map.end()
            }
        }
    }
}

pub struct Dispatcher {
    catalog: Catalog,
    connector: Arc<dyn Connector>,
    executor: BackoffExecutor,
    seed: Option<u64>,
    invocations: AtomicU64,
    max_batch_size: u64,
}

impl Dispatcher {
    pub fn new(catalog: Catalog, connector: Arc<dyn Connector>, executor: BackoffExecutor) -> Self {
        Self {
            catalog,
            connector,
            executor,
            seed: None,
            invocations: AtomicU64::new(0),
            max_batch_size: crate::config::default_max_batch_size(),
        }
    }

    /// Dispatcher over the real HTTP transport described by `config`.
    pub fn from_config(config: &ServerConfig) -> Self {
        let connector = HttpConnector::new(
            config.api.base_url.clone(),
            config.api.request_timeout(),
            config.api.connect_timeout(),
        );
        Self::new(
            Catalog::new(config.catalog_source()),
            Arc::new(connector),
            BackoffExecutor::new(config.api.retry_policy()),
        )
        .with_seed(config.generation.seed)
        .with_max_batch_size(config.generation.max_batch_size)
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_max_batch_size(mut self, max_batch_size: u64) -> Self {
        self.max_batch_size = max_batch_size;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Run one invocation.
    ///
    /// Unknown operations and non-object arguments are errors; everything the caller can
    /// correct by changing argument values comes back as an outcome.
    pub async fn invoke(
        &self,
        name: &str,
        arguments: &Value,
    ) -> Result<InvocationOutcome, ServiceError> {
        let resolved = self
            .catalog
            .resolve(name)
            .ok_or_else(|| ServiceError::UnknownOperation(name.to_string()))?;

        let empty = Map::new();
        let args = match arguments {
            Value::Object(map) => map,
            Value::Null => &empty,
            other => {
                return Err(ServiceError::InvalidArgument {
                    argument: "arguments".to_string(),
                    message: format!("expected an object, got {}", json_type(other)),
                })
            }
        };

        match resolved.operation {
            Operation::ClearTestData => self.clear(&resolved, args).await,
            _ => self.generate(&resolved, args).await,
        }
    }

    async fn clear(
        &self,
        resolved: &ResolvedOperation,
        args: &Map<String, Value>,
    ) -> Result<InvocationOutcome, ServiceError> {
        if args.get("confirm") != Some(&Value::Bool(true)) {
            info!(operation = %resolved.operation, "Reset not confirmed, skipping");
            return Ok(InvocationOutcome::Cancelled {
                reason: CONFIRMATION_REQUIRED.to_string(),
            });
        }

        let transport = self.connector.connect()?;
        info!(path = %resolved.endpoint.path, "Resetting test data");
        let result = self
            .executor
            .execute(
                transport.as_ref(),
                &resolved.endpoint.path,
                &Value::Object(Map::new()),
            )
            .await;
        Ok(InvocationOutcome::Single(result))
    }

    async fn generate(
        &self,
        resolved: &ResolvedOperation,
        args: &Map<String, Value>,
    ) -> Result<InvocationOutcome, ServiceError> {
        let count = match self.read_count(args) {
            Ok(count) => count,
            Err(error) => return Ok(InvocationOutcome::rejected(error)),
        };

        let mut overrides = Payload::new();
        if resolved.operation == Operation::CreateTestProducts {
            match args.get("category") {
                None | Some(Value::Null) => {}
                Some(Value::String(category)) => {
                    // An empty category falls back to a generated one
                    if !category.is_empty() && resolved.endpoint.fields.contains("category") {
                        overrides.insert("category".to_string(), Value::String(category.clone()));
                    }
                }
                Some(other) => {
                    return Ok(InvocationOutcome::rejected(format!(
                        "'category' must be a string, got {}.",
                        json_type(other)
                    )))
                }
            }
        }

        let record_key = resolved.operation.record_key().unwrap_or("record");
        let seed = self.next_seed();
        info!(
            operation = %resolved.operation,
            path = %resolved.endpoint.path,
            count,
            seed = ?seed,
            "Starting batch"
        );

        let transport = self.connector.connect()?;
        let mut synthesizer = PayloadSynthesizer::from_seed(seed);
        let mut unique = UniqueValues::new();
        let mut entries = Vec::new();

        for index in 0..count {
            let payload = synthesizer.synthesize_with_overrides(
                &resolved.endpoint.fields,
                &overrides,
                &mut unique,
            );
            let payload = Value::Object(payload);
            let result = self
                .executor
                .execute(transport.as_ref(), &resolved.endpoint.path, &payload)
                .await;
            debug!(index, success = result.is_success(), "Record submitted");

            let mut record = Map::new();
            if result.is_success() {
                record.insert(record_key.to_string(), payload);
            }
            entries.push(BatchEntry { result, record });
        }

        let succeeded = entries.iter().filter(|e| e.is_success()).count();
        info!(
            operation = %resolved.operation,
            succeeded,
            failed = entries.len() - succeeded,
            "Batch finished"
        );
        debug!(released = unique.len(), "Releasing unique values for batch");
        drop(unique);

        Ok(InvocationOutcome::Batch(entries))
    }

    /// Resolve `count` from arguments, or the message explaining why it is unusable.
    fn read_count(&self, args: &Map<String, Value>) -> Result<u64, String> {
        let count = match args.get("count") {
            None | Some(Value::Null) => {
                if self.catalog.source().is_builtin() {
                    1
                } else {
                    return Err(COUNT_REQUIRED.to_string());
                }
            }
            Some(Value::Number(n)) => {
                if let Some(count) = n.as_u64() {
                    count
                } else {
                    match n.as_f64() {
                        Some(f) if f >= 0.0 && f.fract() == 0.0 && f <= u64::MAX as f64 => {
                            f as u64
                        }
                        _ => return Err(format!("'count' must be a non-negative integer, got {}.", n)),
                    }
                }
            }
            Some(other) => {
                return Err(format!(
                    "'count' must be a non-negative integer, got {}.",
                    json_type(other)
                ))
            }
        };

        if count > self.max_batch_size {
            return Err(format!(
                "'count' must not exceed {} (got {}).",
                self.max_batch_size, count
            ));
        }
        Ok(count)
    }

    fn next_seed(&self) -> Option<u64> {
        let index = self.invocations.fetch_add(1, Ordering::Relaxed);
        self.seed.map(|base| base.wrapping_add(index))
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
