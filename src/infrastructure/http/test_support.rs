//! In-process mock backend for gateway and proxy tests

use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;

use super::ApiClient;
use crate::config::BackendConfig;
use crate::session::SharedSession;

/// Serve `router` on an ephemeral port and return its base URL.
pub async fn spawn_backend(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Backend settings with millisecond retry delays
pub fn fast_config(base_url: &str) -> BackendConfig {
    BackendConfig {
        base_url: base_url.to_string(),
        timeout_secs: 5,
        retry_attempts: 3,
        retry_delay_ms: 1,
    }
}

pub fn client_for(base_url: &str, session: SharedSession) -> Arc<ApiClient> {
    Arc::new(ApiClient::new(&fast_config(base_url), session).unwrap())
}
