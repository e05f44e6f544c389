//! Portal router

use axum::{
    middleware,
    routing::{any, get},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::request_id::request_id_middleware;
use super::{proxy, session};
use crate::config::{AppConfig, SessionConfig};
use crate::shared::{AppError, AppResult};

/// State shared by the proxy and session handlers
#[derive(Clone)]
pub struct PortalState {
    pub http: reqwest::Client,
    /// `{backend}/api`, without a trailing slash
    pub api_base: String,
    pub session: SessionConfig,
}

impl PortalState {
    pub fn from_config(config: &AppConfig) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.backend.timeout())
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            api_base: format!("{}/api", config.backend.base_url.trim_end_matches('/')),
            session: config.session.clone(),
        })
    }
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub fn create_router(state: PortalState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route(
            "/api/session",
            get(session::current).post(session::set).delete(session::clear),
        )
        .route("/api/proxy/{*path}", any(proxy::forward))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
