//! Session cookie endpoints
//!
//! The portal keeps the bearer token in an HttpOnly cookie so the proxy can
//! attach it. `POST` mirrors a fresh login into cookies, `GET` reports who
//! the cookies belong to, `DELETE` expires them.

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use validator::Validate;

use super::cookies::{
    append_cookie, cookie_value, expire_cookie, CookieOptions, REFRESH_COOKIE, ROLE_COOKIE,
    TOKEN_COOKIE,
};
use super::router::PortalState;
use super::validated_json::ValidatedJson;
use super::ApiResponse;
use crate::domain::Role;
use crate::session::decode_claims;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SetSessionRequest {
    #[validate(length(min = 1, message = "Access token is required"))]
    pub access_token: String,
    pub refresh_token: Option<String>,
    #[validate(length(min = 1, message = "Role is required"))]
    pub role: String,
}

/// Identity read from the session cookies; never includes the token.
#[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
    pub authenticated: bool,
    pub role: Option<Role>,
    pub user_id: Option<String>,
    pub station_id: Option<String>,
    pub email: Option<String>,
    pub name: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
    pub has_refresh_token: bool,
}

impl SessionInfo {
    fn from_cookies(token: Option<&str>, role: Option<&str>, has_refresh_token: bool) -> Self {
        let Some(token) = token else {
            return Self::default();
        };
        let claims = match decode_claims(token) {
            Ok(claims) => Some(claims),
            Err(e) => {
                warn!(error = %e, "Session cookie holds an unreadable token");
                None
            }
        };
        let readable = claims.is_some();
        let claims = claims.unwrap_or_default();

        Self {
            authenticated: readable && (!claims.is_expired() || has_refresh_token),
            role: claims.role.or_else(|| role.map(Role::parse)),
            user_id: claims.subject,
            station_id: claims.station_id,
            email: claims.email,
            name: claims.name,
            expires_at: claims.expires_at,
            has_refresh_token,
        }
    }
}

/// GET /api/session
pub async fn current(headers: HeaderMap) -> Json<ApiResponse<SessionInfo>> {
    let token = cookie_value(&headers, TOKEN_COOKIE);
    let role = cookie_value(&headers, ROLE_COOKIE);
    let has_refresh = cookie_value(&headers, REFRESH_COOKIE).is_some();
    Json(ApiResponse::success(SessionInfo::from_cookies(
        token.as_deref(),
        role.as_deref(),
        has_refresh,
    )))
}

/// POST /api/session
pub async fn set(
    State(state): State<PortalState>,
    ValidatedJson(body): ValidatedJson<SetSessionRequest>,
) -> Response {
    let refresh_token = body
        .refresh_token
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty());
    let max_age = if refresh_token.is_some() {
        state.session.refresh_max_age_secs
    } else {
        state.session.access_max_age_secs
    };
    let secure = state.session.secure_cookies;
    let private = CookieOptions {
        max_age_secs: max_age.max(0) as u64,
        http_only: true,
        secure,
    };
    let public = CookieOptions {
        http_only: false,
        ..private
    };
    let role = Role::parse(&body.role);

    let mut headers = HeaderMap::new();
    append_cookie(&mut headers, TOKEN_COOKIE, body.access_token.trim(), private);
    append_cookie(&mut headers, ROLE_COOKIE, role.as_str(), public);
    if let Some(refresh) = refresh_token {
        append_cookie(&mut headers, REFRESH_COOKIE, refresh, private);
    }

    let info = SessionInfo::from_cookies(
        Some(body.access_token.trim()),
        Some(role.as_str()),
        refresh_token.is_some(),
    );
    info!(role = %role, user_id = ?info.user_id, max_age, "Session cookies set");
    (StatusCode::OK, headers, Json(ApiResponse::success(info))).into_response()
}

/// DELETE /api/session
pub async fn clear(State(state): State<PortalState>) -> Response {
    let secure = state.session.secure_cookies;
    let mut headers = HeaderMap::new();
    expire_cookie(&mut headers, TOKEN_COOKIE, true, secure);
    expire_cookie(&mut headers, ROLE_COOKIE, false, secure);
    expire_cookie(&mut headers, REFRESH_COOKIE, true, secure);
    info!("Session cookies cleared");
    (
        StatusCode::OK,
        headers,
        Json(ApiResponse::<()>::success(()).with_message(Some("Signed out".into()))),
    )
        .into_response()
}
