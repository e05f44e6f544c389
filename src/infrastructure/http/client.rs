//! Backend API client
//!
//! Thin wrapper over `reqwest` shared by every gateway. It attaches the bearer
//! token, unwraps response envelopes, maps failures onto `AppError` and owns
//! the one-shot refresh-and-replay on `401`.

use reqwest::Method;
use serde::Serialize;
use serde_json::{json, Value};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::envelope::{extract_error_message, unwrap_data};
use crate::config::BackendConfig;
use crate::domain::AuthTokens;
use crate::infrastructure::mappers::tokens_from_wire;
use crate::session::SharedSession;
use crate::shared::{retry_linear, AppError, AppResult, RetryConfig};

/// Relative to `{base_url}/api/`
pub const REFRESH_PATH: &str = "Auth/refresh-token";

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: SharedSession,
    retry: RetryConfig,
    /// Serialises refreshes so concurrent 401s trigger a single exchange
    refresh_lock: Mutex<()>,
}

impl ApiClient {
    pub fn new(config: &BackendConfig, session: SharedSession) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session,
            retry: config.retry(),
            refresh_lock: Mutex::new(()),
        })
    }

    pub fn session(&self) -> &SharedSession {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub async fn get(&self, path: &str) -> AppResult<Value> {
        self.send(Method::GET, path, None).await
    }

    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> AppResult<Value> {
        let body = serde_json::to_value(body)?;
        self.send(Method::POST, path, Some(body)).await
    }

    /// POST without a request body
    pub async fn post_empty(&self, path: &str) -> AppResult<Value> {
        self.send(Method::POST, path, None).await
    }

    pub async fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> AppResult<Value> {
        let body = serde_json::to_value(body)?;
        self.send(Method::PUT, path, Some(body)).await
    }

    pub async fn delete(&self, path: &str) -> AppResult<Value> {
        self.send(Method::DELETE, path, None).await
    }

    /// GET `primary`; if the backend does not know that route (404), try
    /// `secondary` once. Any other failure is returned as is.
    pub async fn get_with_fallback(&self, primary: &str, secondary: &str) -> AppResult<Value> {
        match self.get(primary).await {
            Err(err) if err.is_not_found() => {
                debug!(primary, secondary, "Endpoint not found, using fallback name");
                self.get(secondary).await
            }
            other => other,
        }
    }

    /// Call without the session token and without refresh handling.
    /// Used for login, where a 401 means bad credentials.
    pub async fn post_anonymous<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> AppResult<Value> {
        let body = serde_json::to_value(body)?;
        self.fetch(Method::POST, path, Some(&body), None).await
    }

    /// Authenticated request with one refresh-and-replay on 401.
    pub async fn send(&self, method: Method, path: &str, body: Option<Value>) -> AppResult<Value> {
        let token = self.session.access_token();
        match self
            .fetch(method.clone(), path, body.as_ref(), token.as_deref())
            .await
        {
            Err(AppError::Unauthorized(_)) => {
                debug!(path, "Received 401, refreshing session");
                self.refresh_after(token.as_deref()).await?;

                let token = self.session.access_token();
                match self.fetch(method, path, body.as_ref(), token.as_deref()).await {
                    Err(AppError::Unauthorized(_)) => {
                        warn!(path, "Still unauthorized after refresh");
                        self.session.clear();
                        Err(AppError::SessionExpired)
                    }
                    other => other,
                }
            }
            other => other,
        }
    }

    /// Exchange the refresh token for a new pair and store it in the session.
    pub async fn refresh_tokens(&self) -> AppResult<AuthTokens> {
        let refresh = self.session.refresh_token().ok_or(AppError::SessionExpired)?;
        let body = json!({ "refreshToken": refresh });
        let value = self
            .fetch(Method::POST, REFRESH_PATH, Some(&body), None)
            .await?;

        let mut tokens = tokens_from_wire(&value)?;
        if tokens.refresh_token.is_none() {
            tokens.refresh_token = Some(refresh);
        }
        self.session.save(tokens.clone());
        info!("Session token refreshed");
        Ok(tokens)
    }

    /// Refresh unless another request already replaced `stale`.
    /// Any failure ends the session.
    async fn refresh_after(&self, stale: Option<&str>) -> AppResult<()> {
        let _guard = self.refresh_lock.lock().await;

        let current = self.session.access_token();
        if current.is_some() && current.as_deref() != stale {
            debug!("Token already refreshed by a concurrent request");
            return Ok(());
        }

        match self.refresh_tokens().await {
            Ok(_) => Ok(()),
            Err(e) => {
                warn!(error = %e, "Token refresh failed, clearing session");
                self.session.clear();
                Err(AppError::SessionExpired)
            }
        }
    }

    /// One logical request with the linear retry for 502/503/transport errors.
    async fn fetch(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        token: Option<&str>,
    ) -> AppResult<Value> {
        let url = self.url(path);
        let url = url.as_str();
        retry_linear(
            &self.retry,
            move || self.fetch_once(method.clone(), url, body, token),
            path,
        )
        .await
    }

    async fn fetch_once(
        &self,
        method: Method,
        url: &str,
        body: Option<&Value>,
        token: Option<&str>,
    ) -> AppResult<Value> {
        let mut request = self.http.request(method, url);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let message = extract_error_message(&text, status);
            debug!(url, status = status.as_u16(), %message, "Backend request failed");
            return Err(AppError::from_status(status.as_u16(), message));
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        match serde_json::from_str::<Value>(&text) {
            Ok(value) => unwrap_data(value),
            // Some endpoints answer with a bare string such as a checkout URL
            Err(_) => Ok(Value::String(text.trim().to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AuthTokens;
    use crate::infrastructure::http::test_support::{client_for, spawn_backend};
    use crate::session::Session;
    use axum::http::{HeaderMap, StatusCode};
    use axum::response::IntoResponse;
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn bearer(headers: &HeaderMap) -> Option<String> {
        headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(str::to_string)
    }

    fn session_with(access: &str, refresh: Option<&str>) -> SharedSession {
        let session = Session::in_memory().shared();
        session.save(AuthTokens::new(access, refresh.map(str::to_string), 3600));
        session
    }

    #[tokio::test]
    async fn sends_bearer_and_unwraps_envelope() {
        let router = Router::new().route(
            "/api/Booking/BK-1",
            get(|headers: HeaderMap| async move {
                Json(json!({
                    "success": true,
                    "message": "ok",
                    "data": { "BookingID": "BK-1", "token": bearer(&headers) }
                }))
            }),
        );
        let base = spawn_backend(router).await;
        let client = client_for(&base, session_with("tok-1", None));

        let value = client.get("Booking/BK-1").await.unwrap();
        assert_eq!(value["BookingID"], "BK-1");
        assert_eq!(value["token"], "tok-1");
    }

    #[tokio::test]
    async fn retries_503_with_linear_backoff() {
        let hits = Arc::new(AtomicUsize::new(0));
        let h = hits.clone();
        let router = Router::new().route(
            "/api/Battery/B-1",
            get(move || {
                let h = h.clone();
                async move {
                    if h.fetch_add(1, Ordering::SeqCst) < 2 {
                        StatusCode::SERVICE_UNAVAILABLE.into_response()
                    } else {
                        Json(json!({ "BatteryID": "B-1" })).into_response()
                    }
                }
            }),
        );
        let base = spawn_backend(router).await;
        let client = client_for(&base, session_with("tok", None));

        let value = client.get("Battery/B-1").await.unwrap();
        assert_eq!(value["BatteryID"], "B-1");
        assert_eq!(hits.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn does_not_retry_500_and_extracts_message() {
        let hits = Arc::new(AtomicUsize::new(0));
        let h = hits.clone();
        let router = Router::new().route(
            "/api/Battery/B-1",
            get(move || {
                let h = h.clone();
                async move {
                    h.fetch_add(1, Ordering::SeqCst);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        Json(json!({ "errors": ["Battery registry offline"] })),
                    )
                }
            }),
        );
        let base = spawn_backend(router).await;
        let client = client_for(&base, session_with("tok", None));

        let err = client.get("Battery/B-1").await.unwrap_err();
        assert_eq!(err.user_message(), "Battery registry offline");
        assert_eq!(err.status(), Some(500));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    fn refreshing_backend(refreshes: Arc<AtomicUsize>, refresh_ok: bool) -> Router {
        Router::new()
            .route(
                "/api/Booking/BK-1",
                get(|headers: HeaderMap| async move {
                    if bearer(&headers).as_deref() == Some("new") {
                        Json(json!({ "BookingID": "BK-1" })).into_response()
                    } else {
                        (StatusCode::UNAUTHORIZED, "expired").into_response()
                    }
                }),
            )
            .route(
                "/api/Auth/refresh-token",
                post(move |Json(body): Json<Value>| {
                    let refreshes = refreshes.clone();
                    async move {
                        refreshes.fetch_add(1, Ordering::SeqCst);
                        if refresh_ok && body["refreshToken"] == "r-1" {
                            Json(json!({ "accessToken": "new", "refreshToken": "r-2" }))
                                .into_response()
                        } else {
                            StatusCode::UNAUTHORIZED.into_response()
                        }
                    }
                }),
            )
    }

    #[tokio::test]
    async fn refreshes_once_and_replays_on_401() {
        let refreshes = Arc::new(AtomicUsize::new(0));
        let base = spawn_backend(refreshing_backend(refreshes.clone(), true)).await;
        let session = session_with("old", Some("r-1"));
        let client = client_for(&base, session.clone());

        let value = client.get("Booking/BK-1").await.unwrap();
        assert_eq!(value["BookingID"], "BK-1");
        assert_eq!(refreshes.load(Ordering::SeqCst), 1);
        assert_eq!(session.access_token().as_deref(), Some("new"));
        assert_eq!(session.refresh_token().as_deref(), Some("r-2"));
    }

    #[tokio::test]
    async fn concurrent_401s_share_one_refresh() {
        let refreshes = Arc::new(AtomicUsize::new(0));
        let base = spawn_backend(refreshing_backend(refreshes.clone(), true)).await;
        let client = client_for(&base, session_with("old", Some("r-1")));

        let (a, b) = tokio::join!(client.get("Booking/BK-1"), client.get("Booking/BK-1"));
        assert!(a.is_ok() && b.is_ok());
        assert_eq!(refreshes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failed_refresh_clears_session() {
        let refreshes = Arc::new(AtomicUsize::new(0));
        let base = spawn_backend(refreshing_backend(refreshes.clone(), false)).await;
        let session = session_with("old", Some("r-1"));
        let client = client_for(&base, session.clone());

        let err = client.get("Booking/BK-1").await.unwrap_err();
        assert!(matches!(err, AppError::SessionExpired));
        assert!(session.access_token().is_none());
        assert!(session.is_expired());
    }

    #[tokio::test]
    async fn missing_refresh_token_is_session_expired() {
        let base = spawn_backend(refreshing_backend(Arc::new(AtomicUsize::new(0)), true)).await;
        let session = session_with("old", None);
        let client = client_for(&base, session.clone());

        let err = client.get("Booking/BK-1").await.unwrap_err();
        assert!(matches!(err, AppError::SessionExpired));
        assert!(session.tokens().is_none());
    }

    #[tokio::test]
    async fn falls_back_to_secondary_endpoint_on_404() {
        let router = Router::new().route(
            "/api/Bookings/BK-1",
            get(|| async { Json(json!({ "BookingID": "BK-1" })) }),
        );
        let base = spawn_backend(router).await;
        let client = client_for(&base, session_with("tok", None));

        let value = client
            .get_with_fallback("Booking/BK-1", "Bookings/BK-1")
            .await
            .unwrap();
        assert_eq!(value["BookingID"], "BK-1");
    }

    #[tokio::test]
    async fn plain_text_body_is_returned_as_string() {
        let router = Router::new().route(
            "/api/Payment/P-1/create-payment-link",
            post(|| async { "https://pay.example/checkout/P-1" }),
        );
        let base = spawn_backend(router).await;
        let client = client_for(&base, session_with("tok", None));

        let value = client
            .post_empty("Payment/P-1/create-payment-link")
            .await
            .unwrap();
        assert_eq!(value, json!("https://pay.example/checkout/P-1"));
    }
}
