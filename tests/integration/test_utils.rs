//! Shared test utilities for integration tests
//!
//! Environment isolation for config tests and a scripted HTTP backend that records every
//! request it receives.

use axum::{
    body::Bytes,
    extract::State,
    http::{header, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Router,
};
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::Arc;
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Global mutex to serialize HOME / XDG / INVENTORY_MCP_* access across all tests
static ENV_MUTEX: std::sync::Mutex<()> = std::sync::Mutex::new(());

const ISOLATED_VARS: [&str; 3] = ["HOME", "XDG_CONFIG_HOME", "INVENTORY_MCP_ENV"];

/// Run `f` with HOME and XDG_CONFIG_HOME pointed into a temp dir; restores afterwards.
///
/// The closure receives the temp dir; the user-level config directory is
/// `<temp>/home/.config/inventory-mcp`.
pub fn with_isolated_env<F, R>(f: F) -> R
where
    F: FnOnce(&TempDir) -> R,
{
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let saved: Vec<(&str, Option<String>)> = ISOLATED_VARS
        .iter()
        .map(|name| (*name, std::env::var(name).ok()))
        .collect();

    let temp_dir = TempDir::new().unwrap();
    let home = temp_dir.path().join("home");
    std::fs::create_dir_all(&home).unwrap();
    std::env::set_var("HOME", &home);
    std::env::set_var("XDG_CONFIG_HOME", home.join(".config"));
    std::env::remove_var("INVENTORY_MCP_ENV");

    let result = f(&temp_dir);

    for (name, value) in saved {
        match value {
            Some(v) => std::env::set_var(name, v),
            None => std::env::remove_var(name),
        }
    }
    result
}

/// One request as seen by the stub backend.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub body: Value,
}

type Script = Arc<Mutex<VecDeque<(u16, String)>>>;

#[derive(Clone)]
struct StubState {
    script: Script,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

/// Scripted HTTP backend on a local port.
///
/// Answers each request with the next scripted `(status, body)`; once the script is spent
/// it answers `200 {"ok":true}`.
pub struct StubServer {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    handle: JoinHandle<()>,
}

impl StubServer {
    pub async fn start(script: Vec<(u16, &str)>) -> Self {
        let state = StubState {
            script: Arc::new(Mutex::new(
                script
                    .into_iter()
                    .map(|(status, body)| (status, body.to_string()))
                    .collect(),
            )),
            requests: Arc::new(Mutex::new(Vec::new())),
        };
        let requests = state.requests.clone();
        let app = Router::new().fallback(answer).with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr,
            requests,
            handle,
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}/", self.addr)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().clone()
    }
}

impl Drop for StubServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// A base URL nothing is listening on.
pub async fn unreachable_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/", addr)
}

/// Catch-all handler: record the request, reply with the next scripted answer.
async fn answer(
    State(state): State<StubState>,
    method: Method,
    uri: Uri,
    body: Bytes,
) -> Response {
    state.requests.lock().push(RecordedRequest {
        method: method.to_string(),
        path: uri.path().to_string(),
        body: serde_json::from_slice(&body).unwrap_or(Value::Null),
    });

    let (status, payload) = state
        .script
        .lock()
        .pop_front()
        .unwrap_or((200, r#"{"ok":true}"#.to_string()));
    let status = StatusCode::from_u16(status).unwrap();
    (status, [(header::CONTENT_TYPE, "application/json")], payload).into_response()
}
