use super::common::*;
use crate::quoting::router::{create_quote_handler, get_customer_handler, get_quote_handler};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde_json::Value;

#[tokio::test]
async fn create_quote_returns_the_persisted_record() {
    let (service, _) = build_service();

    let response =
        create_quote_handler::<MemoryStore>(State(service), axum::Json(prefill_request())).await;

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(
        payload.pointer("/prefill/basis").and_then(Value::as_str),
        Some("email+zip")
    );
    assert_eq!(
        payload
            .pointer("/prefill/customer_id")
            .and_then(Value::as_str),
        Some("cust-001")
    );
    assert_eq!(
        payload
            .pointer("/premium_breakdown/final_6mo")
            .and_then(Value::as_f64),
        Some(581.75)
    );
    assert!(payload.get("quote_id").and_then(Value::as_str).is_some());
}

#[tokio::test]
async fn create_quote_rejects_requests_with_nothing_to_rate() {
    let (service, _) = build_service();

    let response = create_quote_handler::<MemoryStore>(
        State(service),
        axum::Json(crate::quoting::domain::QuoteRequest::default()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let payload = read_json_body(response).await;
    assert!(payload
        .get("error")
        .and_then(Value::as_str)
        .expect("error message")
        .contains("no vehicles"));
}

#[tokio::test]
async fn quote_lookup_round_trips() {
    let (service, _) = build_service();
    let record = service
        .create_quote(standalone_request())
        .expect("quote issues");

    let response =
        get_quote_handler::<MemoryStore>(State(service), Path(record.quote_id.clone())).await;

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(
        payload.get("quote_id").and_then(Value::as_str),
        Some(record.quote_id.as_str())
    );
}

#[tokio::test]
async fn unknown_quote_id_returns_not_found() {
    let (service, _) = build_service();

    let response =
        get_quote_handler::<MemoryStore>(State(service), Path("missing".to_string())).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let payload = read_json_body(response).await;
    assert_eq!(
        payload.get("error").and_then(Value::as_str),
        Some("not_found")
    );
}

#[tokio::test]
async fn customer_endpoint_serves_the_roster_verbatim() {
    let (service, _) = build_service();

    let response =
        get_customer_handler::<MemoryStore>(State(service.clone()), Path("cust-002".to_string()))
            .await;
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(
        payload.pointer("/person/first_name").and_then(Value::as_str),
        Some("Rhea")
    );

    let missing =
        get_customer_handler::<MemoryStore>(State(service), Path("cust-404".to_string())).await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}
