//! Dispatcher end to end over HTTP

use super::test_utils::StubServer;
use inventory_mcp::config::{CatalogMode, EndpointSpec, ServerConfig};
use inventory_mcp::dispatch::{Dispatcher, InvocationOutcome};
use inventory_mcp::executor::RequestResult;
use serde_json::json;

fn config_for(server: &StubServer) -> ServerConfig {
    let mut config = ServerConfig::default();
    config.api.base_url = server.base_url();
    config.api.backoff_unit_ms = 5;
    config.generation.seed = Some(2024);
    config
}

#[tokio::test]
async fn test_builtin_product_batch() {
    let server = StubServer::start(vec![]).await;
    let dispatcher = Dispatcher::from_config(&config_for(&server));

    let outcome = dispatcher
        .invoke("create_test_products", &json!({"count": 3, "category": "garden"}))
        .await
        .unwrap();

    let InvocationOutcome::Batch(entries) = outcome else {
        panic!("expected a batch");
    };
    assert_eq!(entries.len(), 3);
    assert!(entries.iter().all(|e| e.is_success()));

    let requests = server.requests();
    assert_eq!(requests.len(), 3);
    for request in &requests {
        assert_eq!(request.path, "/products/products");
        let keys: Vec<_> = request.body.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["name", "description", "category", "price", "quantity"]);
        assert_eq!(request.body["category"], json!("garden"));
        let quantity = request.body["quantity"].as_i64().unwrap();
        assert!((0..=1000).contains(&quantity));
    }

    // Each success echoes the record that was sent
    let first = serde_json::to_value(&entries[0]).unwrap();
    assert_eq!(first["status"], json!("success"));
    assert_eq!(first["product"], requests[0].body);
}

#[tokio::test]
async fn test_customer_batch_keeps_failures_in_order() {
    let server = StubServer::start(vec![
        (201, r#"{"id":1}"#),
        (500, "{}"),
        (500, "{}"),
        (500, "{}"),
        (201, r#"{"id":3}"#),
    ])
    .await;
    let dispatcher = Dispatcher::from_config(&config_for(&server));

    let outcome = dispatcher
        .invoke("create_test_customers", &json!({"count": 3}))
        .await
        .unwrap();
    let InvocationOutcome::Batch(entries) = outcome else {
        panic!("expected a batch");
    };

    assert_eq!(entries[0].result, RequestResult::Success { data: json!({"id": 1}) });
    assert!(!entries[1].is_success());
    assert_eq!(entries[2].result, RequestResult::Success { data: json!({"id": 3}) });

    let requests = server.requests();
    assert_eq!(requests.len(), 5);
    let address = requests[0].body["address"].as_str().unwrap();
    assert!(!address.contains('\n'));
}

#[tokio::test]
async fn test_reset_requires_confirmation() {
    let server = StubServer::start(vec![(200, r#"{"message":"reset"}"#)]).await;
    let dispatcher = Dispatcher::from_config(&config_for(&server));

    let outcome = dispatcher
        .invoke("clear_test_data", &json!({"confirm": false}))
        .await
        .unwrap();
    assert!(matches!(outcome, InvocationOutcome::Cancelled { .. }));
    assert!(server.requests().is_empty());

    let outcome = dispatcher
        .invoke("clear_test_data", &json!({"confirm": true}))
        .await
        .unwrap();
    assert_eq!(
        outcome,
        InvocationOutcome::Single(RequestResult::Success {
            data: json!({"message": "reset"})
        })
    );
    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].path, "/admin/reset-test-db");
    assert_eq!(requests[0].body, json!({}));
}

#[tokio::test]
async fn test_configured_endpoints_drive_paths_and_fields() {
    let server = StubServer::start(vec![]).await;
    let mut config = config_for(&server);
    config.catalog.mode = CatalogMode::Configured;
    config.endpoints.insert(
        "products".to_string(),
        EndpointSpec::new(
            "/api/v2/items",
            [("title", "catch_phrase"), ("sku", "sku"), ("stock", "int"), ("mood", "vibes")]
                .into_iter()
                .collect(),
        ),
    );
    let dispatcher = Dispatcher::from_config(&config.validated().unwrap());

    let outcome = dispatcher
        .invoke("create_test_products", &json!({"count": 2}))
        .await
        .unwrap();
    assert!(matches!(outcome, InvocationOutcome::Batch(ref e) if e.len() == 2));

    let requests = server.requests();
    assert_eq!(requests[0].path, "/api/v2/items");
    assert_eq!(requests[0].body["mood"], json!("<unknown generator: vibes>"));
    let sku = requests[0].body["sku"].as_str().unwrap();
    assert_eq!(sku.len(), 9);
    assert_eq!(&sku[4..5], "-");

    // Customers and reset are not configured
    assert!(dispatcher
        .invoke("clear_test_data", &json!({"confirm": true}))
        .await
        .is_err());
}
