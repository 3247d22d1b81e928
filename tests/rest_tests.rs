//! End-to-end tests of the REST exposure
//!
//! Requests go through the full Axum router built by `ServerBuilder`, backed
//! by an in-memory store.

mod support;

use axum::http::StatusCode;
use axum_test::TestServer;
use optica::prelude::*;
use serde_json::{Value, json};
use support::*;

fn create_test_server(store: InMemoryRecordStore) -> TestServer {
    let app = ServerBuilder::new()
        .with_store(store)
        .build()
        .expect("Failed to build app");

    TestServer::try_new(app).expect("Failed to create test server")
}

fn valid_body() -> Value {
    json!({
        "patientName": "Raj Kumar",
        "contactNumber": "9876543210",
        "lenses": "Single vision",
        "amount": 2500,
        "advanceAmount": "500",
        "paymentMode": "GPay",
        "attachment": {
            "fileName": "prescription_1.jpg",
            "mimeType": "image/jpeg",
            "sizeBytes": 48213
        }
    })
}

// =============================================================================
// Health Check Tests
// =============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server(InMemoryRecordStore::new());

    let response = server.get("/health").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "optica-records");

    server.get("/healthz").await.assert_status_ok();
}

// =============================================================================
// Create Record Tests
// =============================================================================

#[tokio::test]
async fn test_create_record_returns_201() {
    let store = InMemoryRecordStore::new();
    let server = create_test_server(store.clone());

    let response = server.post("/api/records").json(&valid_body()).await;
    response.assert_status(StatusCode::CREATED);

    let body: Value = response.json();
    assert_eq!(body["patientName"], "Raj Kumar");
    assert_eq!(body["paymentMode"], "GPay");

    let stored = store.all().unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(body["id"], stored[0].id.to_string());
    assert_eq!(stored[0].amount(), &decimal("2500"));
    assert_eq!(stored[0].advance_amount(), &decimal("500"));
    assert_eq!(body, serde_json::to_value(&stored[0]).unwrap());
}

#[tokio::test]
async fn test_create_record_reports_every_violation() {
    let store = InMemoryRecordStore::new();
    let server = create_test_server(store.clone());

    let mut body = valid_body();
    body["contactNumber"] = json!("98765432100");
    body["paymentMode"] = json!("Card");
    body["attachment"]["sizeBytes"] = json!(2_097_153);

    let response = server.post("/api/records").json(&body).await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);

    let error: Value = response.json();
    assert_eq!(error["code"], "VALIDATION_ERROR");
    let fields = error["details"]["fields"].as_array().unwrap();
    let got: Vec<(&str, &str)> = fields
        .iter()
        .map(|f| (f["field"].as_str().unwrap(), f["kind"].as_str().unwrap()))
        .collect();
    assert_eq!(
        got,
        vec![
            ("contactNumber", "FormatError"),
            ("paymentMode", "InvalidEnum"),
            ("attachment", "TooLarge"),
        ]
    );
    assert!(store.is_empty().unwrap());
}

#[tokio::test]
async fn test_create_record_cross_field_violation() {
    let server = create_test_server(InMemoryRecordStore::new());

    let mut body = valid_body();
    body["advanceAmount"] = json!(3000);

    let response = server.post("/api/records").json(&body).await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);

    let error: Value = response.json();
    assert_eq!(error["details"]["fields"][0]["field"], "advanceAmount");
    assert_eq!(error["details"]["fields"][0]["kind"], "CrossFieldViolation");
}

#[tokio::test]
async fn test_exponent_amount_is_rejected_and_listing_stays_usable() {
    let store = sample_store();
    let server = create_test_server(store.clone());

    let mut body = valid_body();
    body["amount"] = json!("1e-50000000");
    body["advanceAmount"] = json!("1e9");

    let response = server.post("/api/records").json(&body).await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);

    let error: Value = response.json();
    let fields: Vec<&str> = error["details"]["fields"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["amount", "advanceAmount"]);
    assert_eq!(store.len().unwrap(), 3);

    let response = server
        .get("/api/records")
        .add_query_param("from", "2024-07-01")
        .add_query_param("to", "2024-07-31")
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["count"], 2);
}

// =============================================================================
// List Records Tests
// =============================================================================

#[tokio::test]
async fn test_list_records_in_range() {
    let server = create_test_server(sample_store());

    let response = server
        .get("/api/records")
        .add_query_param("from", "2024-07-01")
        .add_query_param("to", "2024-07-31")
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["count"], 2);
    assert_eq!(body["matches"][0]["patientName"], "Raj Kumar");
    assert_eq!(body["matches"][1]["patientName"], "Priya Sharma");

    let total: BigDecimal = serde_json::from_value(body["totalAmount"].clone()).unwrap();
    assert_eq!(total, decimal("5700"));
    let balance: BigDecimal = serde_json::from_value(body["balanceDue"].clone()).unwrap();
    assert_eq!(balance, decimal("5200"));
}

#[tokio::test]
async fn test_list_records_with_search() {
    let server = create_test_server(sample_store());

    let response = server
        .get("/api/records")
        .add_query_param("from", "2024-01-01")
        .add_query_param("to", "2024-12-31")
        .add_query_param("search", "gpay")
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["count"], 1);
    assert_eq!(body["matches"][0]["paymentMode"], "GPay");
}

#[tokio::test]
async fn test_list_records_inverted_range() {
    let server = create_test_server(sample_store());

    let response = server
        .get("/api/records")
        .add_query_param("from", "2024-07-31")
        .add_query_param("to", "2024-07-01")
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let error: Value = response.json();
    assert_eq!(error["code"], "INVALID_RANGE");
}

#[tokio::test]
async fn test_list_records_bad_timestamp() {
    let server = create_test_server(sample_store());

    let response = server
        .get("/api/records")
        .add_query_param("from", "yesterday")
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let error: Value = response.json();
    assert_eq!(error["code"], "INVALID_TIMESTAMP");
}

#[tokio::test]
async fn test_list_defaults_to_trailing_month() {
    let store = sample_store();
    let server = create_test_server(store.clone());

    server.post("/api/records").json(&valid_body()).await.assert_status(StatusCode::CREATED);

    let response = server.get("/api/records").await;
    response.assert_status_ok();

    // Only the record created just now falls inside the last month
    let body: Value = response.json();
    assert_eq!(body["count"], 1);
    assert_eq!(store.len().unwrap(), 4);
}

// =============================================================================
// Get Record Tests
// =============================================================================

#[tokio::test]
async fn test_get_record_by_id() {
    let store = sample_store();
    let first = store.all().unwrap().remove(0);
    let server = create_test_server(store);

    let response = server.get(&format!("/api/records/{}", first.id)).await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body, serde_json::to_value(&first).unwrap());
}

#[tokio::test]
async fn test_get_unknown_record_returns_404() {
    let server = create_test_server(InMemoryRecordStore::new());

    let response = server.get(&format!("/api/records/{}", Uuid::new_v4())).await;
    response.assert_status(StatusCode::NOT_FOUND);

    let error: Value = response.json();
    assert_eq!(error["code"], "RECORD_NOT_FOUND");
}
