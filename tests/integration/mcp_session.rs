//! Full MCP session over in-memory streams, backed by the stub HTTP server

use super::test_utils::StubServer;
use inventory_mcp::config::ServerConfig;
use inventory_mcp::dispatch::Dispatcher;
use inventory_mcp::mcp::McpServer;
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::io::BufReader;

async fn run_session(server: &StubServer, messages: &[String]) -> Vec<Value> {
    let mut config = ServerConfig::default();
    config.api.base_url = server.base_url();
    config.api.backoff_unit_ms = 5;
    let mcp = McpServer::new(Arc::new(Dispatcher::from_config(&config)));

    let input = messages.join("\n");
    let mut output = Vec::new();
    mcp.serve(BufReader::new(input.as_bytes()), &mut output)
        .await
        .unwrap();

    String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

fn call(id: u64, name: &str, arguments: Value) -> String {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "method": "tools/call",
        "params": {"name": name, "arguments": arguments}
    })
    .to_string()
}

#[tokio::test]
async fn test_session_lifecycle() {
    let backend = StubServer::start(vec![]).await;
    let responses = run_session(
        &backend,
        &[
            json!({"jsonrpc": "2.0", "id": 1, "method": "initialize",
                   "params": {"protocolVersion": "2024-11-05",
                              "clientInfo": {"name": "test", "version": "0"}}})
            .to_string(),
            json!({"jsonrpc": "2.0", "method": "notifications/initialized"}).to_string(),
            json!({"jsonrpc": "2.0", "id": 2, "method": "tools/list"}).to_string(),
            call(3, "create_test_customers", json!({"count": 2})),
            call(4, "clear_test_data", json!({})),
            call(5, "launch_missiles", json!({})),
            "this is not json".to_string(),
        ],
    )
    .await;

    // The notification produces nothing
    assert_eq!(responses.len(), 6);

    assert_eq!(responses[0]["result"]["protocolVersion"], json!("2024-11-05"));
    assert_eq!(responses[1]["result"]["tools"].as_array().unwrap().len(), 3);

    let text = responses[2]["result"]["content"][0]["text"].as_str().unwrap();
    let entries: Value = serde_json::from_str(text).unwrap();
    let entries = entries.as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["status"], json!("success"));
    assert!(entries[0]["customer"]["email"].is_string());

    let text = responses[3]["result"]["content"][0]["text"].as_str().unwrap();
    assert_eq!(
        serde_json::from_str::<Value>(text).unwrap(),
        json!({"status": "cancelled", "reason": "Confirmation required"})
    );

    assert_eq!(responses[4]["id"], json!(5));
    assert_eq!(responses[4]["error"]["code"], json!(-32602));
    assert_eq!(responses[4]["error"]["message"], json!("Unknown tool: launch_missiles"));

    assert_eq!(responses[5]["error"]["code"], json!(-32700));

    // Two customers posted; the cancelled reset and unknown tool made no calls
    let requests = backend.requests();
    assert_eq!(requests.len(), 2);
    assert!(requests.iter().all(|r| r.path == "/customers"));
    assert_ne!(requests[0].body["email"], requests[1].body["email"]);
}

#[tokio::test]
async fn test_backend_failure_is_reported_in_content() {
    let backend = StubServer::start(vec![(503, "{}"); 3]).await;
    let responses = run_session(&backend, &[call(1, "clear_test_data", json!({"confirm": true}))]).await;

    let result = &responses[0]["result"];
    // Remote failures are data, not tool errors
    assert!(result.get("isError").is_none());
    let text: Value = serde_json::from_str(result["content"][0]["text"].as_str().unwrap()).unwrap();
    assert_eq!(text["status"], json!("error"));
    assert_eq!(text["payload"], json!({}));
    assert_eq!(backend.requests().len(), 3);
}
