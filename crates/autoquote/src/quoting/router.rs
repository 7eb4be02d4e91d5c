use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::domain::QuoteRequest;
use super::service::{QuoteService, QuoteServiceError};
use super::store::{QuoteStore, StoreError};

/// Router builder exposing the quote and customer endpoints. Authentication
/// is layered on by the host service.
pub fn quote_router<S>(service: Arc<QuoteService<S>>) -> Router
where
    S: QuoteStore + 'static,
{
    Router::new()
        .route("/quotes", post(create_quote_handler::<S>))
        .route("/quotes/:quote_id", get(get_quote_handler::<S>))
        .route("/customers/:customer_id", get(get_customer_handler::<S>))
        .with_state(service)
}

pub(crate) async fn create_quote_handler<S>(
    State(service): State<Arc<QuoteService<S>>>,
    axum::Json(request): axum::Json<QuoteRequest>,
) -> Response
where
    S: QuoteStore + 'static,
{
    match service.create_quote(request) {
        Ok(record) => (StatusCode::OK, axum::Json(record)).into_response(),
        Err(error @ QuoteServiceError::NoVehicles) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(QuoteServiceError::Store(StoreError::Conflict)) => {
            let payload = json!({ "error": "quote id collision" });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn get_quote_handler<S>(
    State(service): State<Arc<QuoteService<S>>>,
    Path(quote_id): Path<String>,
) -> Response
where
    S: QuoteStore + 'static,
{
    match service.quote(&quote_id) {
        Ok(record) => (StatusCode::OK, axum::Json(record)).into_response(),
        Err(QuoteServiceError::QuoteNotFound) => not_found(),
        Err(other) => internal_error(other),
    }
}

pub(crate) async fn get_customer_handler<S>(
    State(service): State<Arc<QuoteService<S>>>,
    Path(customer_id): Path<String>,
) -> Response
where
    S: QuoteStore + 'static,
{
    match service.customer(&customer_id) {
        Ok(record) => (StatusCode::OK, axum::Json(record)).into_response(),
        Err(QuoteServiceError::CustomerNotFound) => not_found(),
        Err(other) => internal_error(other),
    }
}

fn not_found() -> Response {
    let payload = json!({ "error": "not_found" });
    (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
}

fn internal_error(error: QuoteServiceError) -> Response {
    let payload = json!({ "error": error.to_string() });
    (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
}
