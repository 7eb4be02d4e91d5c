use std::sync::Arc;

use autoquote::auth::{
    bearer_token, TokenSigner, DEMO_AUTHORIZATION_CODE, DEMO_REFRESH_TOKEN,
};
use autoquote::config::AuthConfig;
use autoquote::quoting::{quote_router, QuoteService, QuoteStore};
use axum::extract::{Query, Request, State};
use axum::http::{header, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Extension, Form, Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::infra::AppState;

const OPENAPI_DOCUMENT: &str = include_str!("../openapi.yaml");
const PLUGIN_MANIFEST: &str = include_str!("../ai-plugin.json");

#[derive(Clone)]
pub(crate) struct OAuthState {
    pub(crate) signer: TokenSigner,
    pub(crate) client_id: String,
    pub(crate) client_secret: String,
}

impl OAuthState {
    pub(crate) fn new(signer: TokenSigner, auth: &AuthConfig) -> Self {
        Self {
            signer,
            client_id: auth.client_id.clone(),
            client_secret: auth.client_secret.clone(),
        }
    }
}

/// Full application router: bearer-protected quoting endpoints plus the
/// public OAuth, health, and document endpoints.
pub(crate) fn app_router<S>(
    service: Arc<QuoteService<S>>,
    signer: TokenSigner,
    auth: &AuthConfig,
) -> Router
where
    S: QuoteStore + 'static,
{
    let protected = quote_router(service)
        .route_layer(middleware::from_fn_with_state(signer.clone(), require_bearer));
    let oauth = Router::new()
        .route("/oauth/authorize", get(authorize_endpoint))
        .route("/oauth/token", post(token_endpoint))
        .with_state(OAuthState::new(signer, auth));

    Router::new()
        .merge(protected)
        .merge(oauth)
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/openapi.yaml", get(openapi_document))
        .route("/ai-plugin.json", get(plugin_manifest))
}

pub(crate) async fn require_bearer(
    State(signer): State<TokenSigner>,
    request: Request,
    next: Next,
) -> Response {
    let authorized = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(bearer_token)
        .is_some_and(|token| signer.verify(token).is_ok());

    if authorized {
        next.run(request).await
    } else {
        let payload = json!({ "error": "unauthorized" });
        (StatusCode::UNAUTHORIZED, Json(payload)).into_response()
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct AuthorizeParams {
    #[serde(default)]
    pub(crate) redirect_uri: String,
    #[serde(default)]
    pub(crate) state: String,
}

/// Demo consent screen: auto-approves and bounces straight back to the
/// caller with the fixed authorization code.
pub(crate) async fn authorize_endpoint(Query(params): Query<AuthorizeParams>) -> Response {
    let location = format!(
        "{}?code={}&state={}",
        params.redirect_uri, DEMO_AUTHORIZATION_CODE, params.state
    );
    (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct TokenRequest {
    #[serde(default)]
    pub(crate) grant_type: String,
    #[serde(default)]
    pub(crate) client_id: String,
    #[serde(default)]
    pub(crate) client_secret: String,
    #[serde(default)]
    pub(crate) code: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct TokenResponse {
    pub(crate) token_type: &'static str,
    pub(crate) access_token: String,
    pub(crate) expires_in: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) refresh_token: Option<&'static str>,
}

pub(crate) async fn token_endpoint(
    State(state): State<OAuthState>,
    Form(body): Form<TokenRequest>,
) -> Response {
    if body.client_id.is_empty()
        || body.client_secret.is_empty()
        || body.client_id != state.client_id
        || body.client_secret != state.client_secret
    {
        return oauth_error("invalid_client");
    }

    match body.grant_type.as_str() {
        "client_credentials" => issue_token(&state, &body.client_id, None),
        "authorization_code" => {
            if body.code != DEMO_AUTHORIZATION_CODE {
                return oauth_error("invalid_grant");
            }
            issue_token(&state, &body.client_id, Some(DEMO_REFRESH_TOKEN))
        }
        "refresh_token" => issue_token(&state, &body.client_id, None),
        _ => oauth_error("unsupported_grant_type"),
    }
}

fn issue_token(state: &OAuthState, subject: &str, refresh_token: Option<&'static str>) -> Response {
    match state.signer.issue(subject) {
        Ok(access_token) => (
            StatusCode::OK,
            Json(TokenResponse {
                token_type: "Bearer",
                access_token,
                expires_in: state.signer.ttl_seconds(),
                refresh_token,
            }),
        )
            .into_response(),
        Err(error) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}

fn oauth_error(code: &str) -> Response {
    let payload = json!({ "error": code });
    (StatusCode::BAD_REQUEST, Json(payload)).into_response()
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn openapi_document() -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/yaml")],
        OPENAPI_DOCUMENT,
    )
}

pub(crate) async fn plugin_manifest() -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        PLUGIN_MANIFEST,
    )
}
