//! Integration tests for the inventory-mcp server

mod config_layering;
mod dispatch_flow;
mod executor_http;
mod mcp_session;
mod test_utils;
