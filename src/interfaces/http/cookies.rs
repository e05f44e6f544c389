//! Session cookie helpers

use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::{HeaderMap, HeaderValue};
use tracing::warn;

pub const TOKEN_COOKIE: &str = "token";
pub const ROLE_COOKIE: &str = "role";
pub const REFRESH_COOKIE: &str = "refreshToken";

#[derive(Debug, Clone, Copy)]
pub struct CookieOptions {
    pub max_age_secs: u64,
    pub http_only: bool,
    pub secure: bool,
}

/// Value of cookie `name` from the request's `Cookie` headers.
pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|raw| raw.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_string())
        .filter(|value| !value.is_empty())
}

fn is_cookie_safe(value: &str) -> bool {
    value
        .chars()
        .all(|c| c.is_ascii_graphic() && !matches!(c, ';' | ',' | '"' | '\\'))
}

pub fn render_cookie(name: &str, value: &str, options: CookieOptions) -> String {
    let mut cookie = format!(
        "{}={}; Path=/; Max-Age={}; SameSite=Lax",
        name, value, options.max_age_secs
    );
    if options.http_only {
        cookie.push_str("; HttpOnly");
    }
    if options.secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Append a `Set-Cookie` header. A value that cannot be carried in a cookie
/// is logged and skipped; the rest of the response still goes out.
pub fn append_cookie(
    headers: &mut HeaderMap,
    name: &str,
    value: &str,
    options: CookieOptions,
) -> bool {
    if !is_cookie_safe(value) {
        warn!(cookie = name, "Refusing to set cookie with unsafe characters");
        return false;
    }
    match HeaderValue::from_str(&render_cookie(name, value, options)) {
        Ok(header) => {
            headers.append(SET_COOKIE, header);
            true
        }
        Err(e) => {
            warn!(cookie = name, error = %e, "Failed to set cookie");
            false
        }
    }
}

/// Append an already-expired cookie so the browser drops it.
pub fn expire_cookie(headers: &mut HeaderMap, name: &str, http_only: bool, secure: bool) {
    let options = CookieOptions {
        max_age_secs: 0,
        http_only,
        secure,
    };
    if let Ok(header) = HeaderValue::from_str(&render_cookie(name, "", options)) {
        headers.append(SET_COOKIE, header);
    }
}
