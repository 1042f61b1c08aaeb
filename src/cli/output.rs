//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::ServiceError;

/// Map service errors to a string for CLI output.
pub fn map_error(e: &ServiceError) -> String {
    match e {
        ServiceError::Validation(details) => {
            format!("Invalid configuration:\n{}", details)
        }
        ServiceError::UnknownOperation(name) => {
            format!("Unknown tool: {} (run 'inventory-mcp tools' to list tools)", name)
        }
        other => other.to_string(),
    }
}
