//! shiptrack API: tracking proxy and timeline endpoints
pub mod carrier;
pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod sanitize;

use std::sync::Arc;

use axum::{
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::carrier::{CarrierClient, HttpCarrierClient};
use crate::config::ProxyConfig;
use crate::metrics::Metrics;

#[derive(Clone)]
pub struct AppState {
    pub carrier: Arc<dyn CarrierClient>,
    pub metrics: Arc<Metrics>,
}

impl AppState {
    pub fn new(carrier: Arc<dyn CarrierClient>) -> Result<Self, prometheus::Error> {
        Ok(Self {
            carrier,
            metrics: Arc::new(Metrics::new()?),
        })
    }
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/v1/track", post(handlers::track))
        .route("/v1/timeline", post(handlers::timeline))
        .route("/track/{tracking_number}", get(handlers::page))
        .route("/v1/health", get(handlers::health))
        .route("/metrics", get(handlers::metrics))
        .with_state(state)
        .layer(from_fn(middleware::request_id))
        .layer(middleware::cors())
        .layer(TraceLayer::new_for_http())
}

pub async fn run(config: ProxyConfig) -> anyhow::Result<()> {
    let carrier = HttpCarrierClient::new(&config.carrier)?;
    let state = AppState::new(Arc::new(carrier))
        .map_err(|e| anyhow::anyhow!("metrics registry: {}", e))?;
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(&config.addr).await?;
    tracing::info!(addr = %config.addr, carrier = %config.carrier.url, "shiptrack API listening");
    axum::serve(listener, app).await?;
    Ok(())
}
