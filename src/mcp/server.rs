//! Server loop: one JSON-RPC message per line, answered in arrival order.

use super::protocol::*;
use crate::dispatch::Dispatcher;
use crate::error::ServiceError;
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};

pub const SERVER_NAME: &str = "inventory-mcp";

const PREVIEW_LEN: usize = 120;

pub struct McpServer {
    dispatcher: Arc<Dispatcher>,
}

impl McpServer {
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }

    /// Serve on the process's stdin/stdout until stdin closes.
    pub async fn run_stdio(&self) -> Result<(), ServiceError> {
        let stdin = BufReader::new(tokio::io::stdin());
        let stdout = tokio::io::stdout();
        self.serve(stdin, stdout).await
    }

    /// Serve over any line-oriented reader and writer; returns on EOF.
    pub async fn serve<R, W>(&self, reader: R, mut writer: W) -> Result<(), ServiceError>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        info!(server = SERVER_NAME, "Server started, waiting for messages");
        let mut lines = reader.lines();

        while let Some(line) = lines.next_line().await? {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            debug!(message = %preview(line), "<-");

            if let Some(response) = self.handle(line).await {
                let out = serde_json::to_string(&response)?;
                debug!(message = %preview(&out), "->");
                writer.write_all(out.as_bytes()).await?;
                writer.write_all(b"\n").await?;
                writer.flush().await?;
            }
        }

        info!("Input closed, server shutting down");
        Ok(())
    }

    /// Handle one message; `None` for notifications.
    pub async fn handle(&self, msg: &str) -> Option<JsonRpcResponse> {
        let value: Value = match serde_json::from_str(msg) {
            Ok(v) => v,
            Err(e) => return Some(JsonRpcResponse::error(None, PARSE_ERROR, e.to_string())),
        };
        let raw_id = value.get("id").cloned();
        let req: JsonRpcRequest = match serde_json::from_value(value) {
            Ok(r) => r,
            Err(e) => {
                return Some(JsonRpcResponse::error(
                    raw_id,
                    INVALID_REQUEST,
                    format!("Invalid request: {}", e),
                ))
            }
        };
        if req.jsonrpc != "2.0" {
            return Some(JsonRpcResponse::error(
                req.id,
                INVALID_REQUEST,
                format!("Unsupported jsonrpc version: {}", req.jsonrpc),
            ));
        }

        if req.is_notification() {
            debug!(method = %req.method, "Notification received");
            return None;
        }

        let id = req.id.clone();
        let response = match req.method.as_str() {
            "initialize" => self.initialize(req.params).and_then(to_result),
            "ping" => Ok(json!({})),
            "tools/list" => to_result(ToolsListResult {
                tools: self.dispatcher.catalog().list_operations(),
            }),
            "tools/call" => self.call_tool(req.params).await,
            other => Err((METHOD_NOT_FOUND, format!("Unknown method: {}", other))),
        };

        Some(match response {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err((code, message)) => JsonRpcResponse::error(id, code, message),
        })
    }

    fn initialize(&self, params: Value) -> Result<InitializeResult, (i32, String)> {
        let params: InitializeParams = if params.is_null() {
            InitializeParams::default()
        } else {
            serde_json::from_value(params).map_err(|e| (INVALID_PARAMS, e.to_string()))?
        };
        let protocol_version = params
            .protocol_version
            .unwrap_or_else(|| DEFAULT_PROTOCOL_VERSION.to_string());
        info!(protocol_version = %protocol_version, "Client initialized");

        Ok(InitializeResult {
            protocol_version,
            capabilities: ServerCapabilities {
                tools: ToolsCapability {
                    list_changed: false,
                },
            },
            server_info: ServerInfo {
                name: SERVER_NAME.into(),
                version: env!("CARGO_PKG_VERSION").into(),
            },
        })
    }

    async fn call_tool(&self, params: Value) -> Result<Value, (i32, String)> {
        let params: ToolCallParams =
            serde_json::from_value(params).map_err(|e| (INVALID_PARAMS, e.to_string()))?;

        info!(tool = %params.name, "Calling tool");
        let outcome = self
            .dispatcher
            .invoke(&params.name, &params.arguments)
            .await
            .map_err(|e| {
                warn!(tool = %params.name, error = %e, "Tool call failed");
                (error_code(&e), e.to_string())
            })?;

        let text = outcome
            .to_pretty_json()
            .map_err(|e| (INTERNAL_ERROR, e.to_string()))?;
        to_result(ToolCallResult::text(text, outcome.is_error()))
    }
}

fn error_code(error: &ServiceError) -> i32 {
    match error {
        ServiceError::UnknownOperation(_) | ServiceError::InvalidArgument { .. } => {
            INVALID_PARAMS
        }
        _ => INTERNAL_ERROR,
    }
}

fn to_result<T: Serialize>(value: T) -> Result<Value, (i32, String)> {
    serde_json::to_value(value)
        .map_err(|e| (INTERNAL_ERROR, format!("Serialization error: {}", e)))
}

fn preview(text: &str) -> String {
    match text.char_indices().nth(PREVIEW_LEN) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
