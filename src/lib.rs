//! inventory-mcp
//!
//! An MCP server that seeds an inventory backend with realistic test data. Tools create
//! batches of products or customers by posting synthesized records to the backend, and
//! reset the test database behind an explicit confirmation.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod executor;
pub mod logging;
pub mod mcp;
pub mod synth;

pub use catalog::{Catalog, CatalogSource, Operation, OperationDescriptor};
pub use config::{ConfigLoader, ServerConfig};
pub use dispatch::{BatchEntry, Dispatcher, InvocationOutcome};
pub use error::{RequestFailure, ServiceError};
pub use executor::{BackoffExecutor, RequestResult, RetryPolicy};
