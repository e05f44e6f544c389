//! Backend pass-through
//!
//! `ANY /api/proxy/{*path}` is forwarded to `{backend}/api/{path}` with the
//! caller's method, query, body and credentials. The answer is re-shaped to
//! camelCase and wrapped as `{ success, message, data }` with the backend's
//! status code.

use axum::body::Bytes;
use axum::extract::{Path, RawQuery, State};
use axum::http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, COOKIE};
use axum::http::{HeaderMap, HeaderName, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::Value;
use tracing::{debug, warn};

use super::casing::camelize_keys;
use super::cookies::{cookie_value, TOKEN_COOKIE};
use super::request_id::REQUEST_ID_HEADER;
use super::router::PortalState;
use super::ApiResponse;
use crate::infrastructure::http::extract_error_message;
use crate::shared::CONNECTIVITY_MESSAGE;

const FORWARDED_HEADERS: [HeaderName; 4] = [AUTHORIZATION, COOKIE, CONTENT_TYPE, ACCEPT];

/// The decoded tail must stay below `/api`: no dot segments, and nothing
/// that would start a query or fragment or act as a separator.
fn is_forwardable(path: &str) -> bool {
    path.split('/').all(|segment| {
        segment != "."
            && segment != ".."
            && !segment
                .chars()
                .any(|c| matches!(c, '\\' | '?' | '#') || c.is_control())
    })
}

pub async fn forward(
    State(state): State<PortalState>,
    Path(path): Path<String>,
    RawQuery(query): RawQuery,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    if !is_forwardable(&path) {
        warn!(%method, path = %path, "Refusing proxy path outside the API");
        let body = ApiResponse::<Value>::error("Invalid proxy path");
        return (StatusCode::BAD_REQUEST, Json(body)).into_response();
    }
    let url = match query.as_deref().filter(|q| !q.is_empty()) {
        Some(q) => format!("{}/{}?{}", state.api_base, path, q),
        None => format!("{}/{}", state.api_base, path),
    };
    debug!(%method, %url, "Proxying request");

    let mut request = state.http.request(method.clone(), &url);
    for name in &FORWARDED_HEADERS {
        for value in headers.get_all(name) {
            request = request.header(name, value);
        }
    }
    if let Some(id) = headers.get(REQUEST_ID_HEADER) {
        request = request.header(REQUEST_ID_HEADER, id);
    }
    // browsers only hold the HttpOnly cookie, the backend wants a bearer
    if !headers.contains_key(AUTHORIZATION) {
        if let Some(token) = cookie_value(&headers, TOKEN_COOKIE) {
            request = request.bearer_auth(token);
        }
    }
    if !body.is_empty() {
        request = request.body(body);
    }

    let response = match request.send().await {
        Ok(response) => response,
        Err(e) => {
            warn!(%method, path = %path, error = %e, "Backend unreachable");
            let body = ApiResponse::<Value>::error(CONNECTIVITY_MESSAGE);
            return (StatusCode::BAD_GATEWAY, Json(body)).into_response();
        }
    };

    let status = response.status();
    let text = match response.text().await {
        Ok(text) => text,
        Err(e) => {
            warn!(%method, path = %path, error = %e, "Failed to read backend response");
            String::new()
        }
    };
    if !status.is_success() {
        debug!(%method, path = %path, status = status.as_u16(), "Backend returned an error");
    }

    (status, Json(reshape(status, &text))).into_response()
}

/// Parse, camelCase and wrap a backend body.
pub fn reshape(status: StatusCode, text: &str) -> ApiResponse<Value> {
    let parsed = if text.trim().is_empty() {
        Value::Null
    } else {
        serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
    };
    let error_message = || Some(extract_error_message(text, status));

    match camelize_keys(parsed) {
        Value::Object(mut obj) if obj.get("success").is_some_and(Value::is_boolean) => {
            let success = status.is_success()
                && obj.remove("success").and_then(|v| v.as_bool()) == Some(true);
            let message = if success {
                obj.remove("message")
                    .and_then(|m| m.as_str().map(String::from))
            } else {
                error_message()
            };
            let data = obj.remove("data").unwrap_or_else(|| {
                obj.remove("message");
                obj.remove("errors");
                if obj.is_empty() {
                    Value::Null
                } else {
                    Value::Object(obj)
                }
            });
            ApiResponse {
                success,
                message,
                data: Some(data),
            }
        }
        body if status.is_success() => ApiResponse::success(body),
        _ => ApiResponse::error(error_message().unwrap_or_default()),
    }
}
