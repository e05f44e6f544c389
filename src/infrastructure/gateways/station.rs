//! Station resolution for station-scoped lists

use tracing::debug;

use super::auth::fetch_profile;
use crate::infrastructure::http::ApiClient;
use crate::shared::{AppError, AppResult};

/// Pick the station to scope a request to.
///
/// Order: explicit argument, station claim in the access token, cached
/// profile, then a profile lookup. A user with no station is refused.
pub async fn resolve_station(client: &ApiClient, explicit: Option<&str>) -> AppResult<String> {
    if let Some(id) = explicit.map(str::trim).filter(|s| !s.is_empty()) {
        return Ok(id.to_string());
    }

    let session = client.session();
    if let Some(id) = session.claims().and_then(|c| c.station_id) {
        return Ok(id);
    }
    if let Some(id) = session.user().and_then(|u| u.station_id) {
        return Ok(id);
    }

    debug!("No station in token, asking the backend for the profile");
    fetch_profile(client)
        .await?
        .station_id
        .ok_or_else(|| AppError::Forbidden("no station assigned to this account".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AuthTokens;
    use crate::infrastructure::http::test_support::{client_for, spawn_backend};
    use crate::session::claims::tests::token_with;
    use crate::session::Session;
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::json;

    #[tokio::test]
    async fn explicit_station_wins() {
        let client = client_for("http://127.0.0.1:9", Session::in_memory().shared());
        assert_eq!(resolve_station(&client, Some("ST-1")).await.unwrap(), "ST-1");
    }

    #[tokio::test]
    async fn station_claim_is_used() {
        let session = Session::in_memory().shared();
        let token = token_with(json!({ "sub": "U-1", "StationID": "ST-7" }));
        session.save(AuthTokens::new(token, None, 3600));
        let client = client_for("http://127.0.0.1:9", session);
        assert_eq!(resolve_station(&client, None).await.unwrap(), "ST-7");
    }

    #[tokio::test]
    async fn profile_lookup_then_forbidden() {
        let router = Router::new()
            .route("/api/Auth/me", get(|| async { Json(json!({ "UserID": "U-2" })) }));
        let base = spawn_backend(router).await;
        let session = Session::in_memory().shared();
        session.save(AuthTokens::new(token_with(json!({ "sub": "U-2" })), None, 3600));
        let client = client_for(&base, session);

        let err = resolve_station(&client, None).await.unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[tokio::test]
    async fn profile_lookup_finds_station() {
        let router = Router::new().route(
            "/api/Auth/me",
            get(|| async { Json(json!({ "UserID": "U-3", "Station": { "StationID": "ST-9" } })) }),
        );
        let base = spawn_backend(router).await;
        let session = Session::in_memory().shared();
        session.save(AuthTokens::new("opaque", None, 3600));
        let client = client_for(&base, session);

        assert_eq!(resolve_station(&client, None).await.unwrap(), "ST-9");
    }
}
