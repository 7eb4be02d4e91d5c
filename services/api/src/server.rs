use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryQuoteStore};
use crate::routes::app_router;
use autoquote::auth::TokenSigner;
use autoquote::config::AppConfig;
use autoquote::error::AppError;
use autoquote::quoting::{CustomerRoster, QuoteService};
use autoquote::telemetry;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let store = Arc::new(InMemoryQuoteStore::default());
    let service = Arc::new(QuoteService::new(CustomerRoster::demo(), store));
    let signer = TokenSigner::new(&config.auth.jwt_secret, config.auth.token_ttl_seconds);

    // Browser callers hit the API directly; CORS stays open.
    let app = app_router(service, signer, &config.auth)
        .layer(Extension(app_state))
        .layer(prometheus_layer)
        .layer(CorsLayer::permissive());

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "quote service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
