//! Backoff executor against a real local HTTP listener

use super::test_utils::{unreachable_base_url, StubServer};
use inventory_mcp::executor::{BackoffExecutor, Connector, HttpConnector, RequestResult, RetryPolicy};
use serde_json::json;
use std::time::Duration;

fn fast_executor(max_attempts: u32) -> BackoffExecutor {
    BackoffExecutor::new(RetryPolicy {
        max_attempts,
        backoff_unit: Duration::from_millis(5),
    })
}

fn connector(base_url: String) -> HttpConnector {
    HttpConnector::new(base_url, Duration::from_secs(5), Duration::from_secs(2))
}

#[tokio::test]
async fn test_two_server_errors_then_success() {
    let server = StubServer::start(vec![
        (500, r#"{"detail":"db locked"}"#),
        (500, r#"{"detail":"db locked"}"#),
        (201, r#"{"id":42,"name":"Widget"}"#),
    ])
    .await;
    let transport = connector(server.base_url()).connect().unwrap();

    let result = fast_executor(3)
        .execute(transport.as_ref(), "/products/products", &json!({"name": "Widget"}))
        .await;

    assert_eq!(
        result,
        RequestResult::Success {
            data: json!({"id": 42, "name": "Widget"})
        }
    );
    let requests = server.requests();
    assert_eq!(requests.len(), 3);
    assert!(requests.iter().all(|r| r.method == "POST"));
    assert!(requests.iter().all(|r| r.path == "/products/products"));
    assert!(requests.iter().all(|r| r.body == json!({"name": "Widget"})));
}

#[tokio::test]
async fn test_status_error_carries_body_and_payload() {
    let server = StubServer::start(vec![(422, r#"{"detail":"bad email"}"#); 2]).await;
    let transport = connector(server.base_url()).connect().unwrap();
    let payload = json!({"email": "not-an-email"});

    let result = fast_executor(2)
        .execute(transport.as_ref(), "customers", &payload)
        .await;

    match result {
        RequestResult::Error { error, payload: echoed } => {
            assert!(error.contains("422"), "unexpected error: {}", error);
            assert!(error.contains("bad email"));
            assert_eq!(echoed, payload);
        }
        other => panic!("expected error, got {:?}", other),
    }
    assert_eq!(server.requests().len(), 2);
    assert_eq!(server.requests()[0].path, "/customers");
}

#[tokio::test]
async fn test_unreachable_backend_exhausts_attempts() {
    let transport = connector(unreachable_base_url().await).connect().unwrap();
    let result = fast_executor(3)
        .execute(transport.as_ref(), "/customers", &json!({"firstName": "Ada"}))
        .await;
    match result {
        RequestResult::Error { payload, .. } => {
            assert_eq!(payload, json!({"firstName": "Ada"}))
        }
        other => panic!("expected error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_empty_success_body_is_null() {
    let server = StubServer::start(vec![(200, "")]).await;
    let transport = connector(server.base_url()).connect().unwrap();
    let result = fast_executor(3)
        .execute(transport.as_ref(), "/admin/reset-test-db", &json!({}))
        .await;
    assert_eq!(result, RequestResult::Success { data: json!(null) });
    assert_eq!(server.requests().len(), 1);
}

#[tokio::test]
async fn test_undecodable_success_body_is_retried() {
    let server = StubServer::start(vec![(200, "<html>oops</html>"), (200, r#"{"ok":1}"#)]).await;
    let transport = connector(server.base_url()).connect().unwrap();
    let result = fast_executor(3)
        .execute(transport.as_ref(), "/products", &json!({}))
        .await;
    assert_eq!(result, RequestResult::Success { data: json!({"ok": 1}) });
    assert_eq!(server.requests().len(), 2);
}
