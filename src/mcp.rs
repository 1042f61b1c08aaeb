//! MCP stdio transport
//!
//! Newline-delimited JSON-RPC 2.0 over stdin/stdout, exposing the catalog as MCP tools.

pub mod protocol;
mod server;

pub use server::{McpServer, SERVER_NAME};
