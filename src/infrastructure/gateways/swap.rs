//! HTTP implementation of SwapGateway

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::swap::{validate_battery_pair, SwapGateway};
use crate::domain::{NewSwapTransaction, SwapTransaction};
use crate::infrastructure::http::{path_segment, ApiClient};
use crate::infrastructure::mappers::{swap_from_wire, swaps_from_wire};
use crate::shared::AppResult;

pub struct HttpSwapGateway {
    client: Arc<ApiClient>,
}

impl HttpSwapGateway {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

fn complete_path(id: &str, soh: Option<f64>) -> String {
    match soh {
        Some(soh) => format!("SwapTransaction/{}/complete?SoH={}", id, soh),
        None => format!("SwapTransaction/{}/complete", id),
    }
}

#[async_trait]
impl SwapGateway for HttpSwapGateway {
    async fn get_by_id(&self, id: &str) -> AppResult<SwapTransaction> {
        let id = path_segment("swapId", id)?;
        let value = self
            .client
            .get_with_fallback(
                &format!("SwapTransaction/{}", id),
                &format!("SwapTransactions/{}", id),
            )
            .await?;
        swap_from_wire(&value)
    }

    async fn get_by_station(&self, station_id: &str) -> AppResult<Vec<SwapTransaction>> {
        let station_id = path_segment("stationId", station_id)?;
        let value = self
            .client
            .get_with_fallback(
                &format!("SwapTransaction/station/{}", station_id),
                &format!("SwapTransactions/station/{}", station_id),
            )
            .await?;
        swaps_from_wire(&value)
    }

    async fn create(&self, swap: NewSwapTransaction) -> AppResult<SwapTransaction> {
        validate_battery_pair(&swap.old_battery_id, &swap.new_battery_id)?;

        let value = self.client.post("SwapTransaction", &swap).await?;
        let created = swap_from_wire(&value)?;
        info!(
            swap_id = %created.id,
            old_battery = %swap.old_battery_id,
            new_battery = %swap.new_battery_id,
            "Swap transaction created"
        );
        Ok(created)
    }

    async fn complete(&self, id: &str, soh: Option<f64>) -> AppResult<()> {
        let id = path_segment("swapId", id)?;
        self.client.post_empty(&complete_path(id, soh)).await?;
        info!(swap_id = id, ?soh, "Swap transaction completed");
        Ok(())
    }

    async fn cancel(&self, id: &str) -> AppResult<()> {
        let id = path_segment("swapId", id)?;
        self.client
            .post_empty(&format!("SwapTransaction/{}/cancel", id))
            .await?;
        info!(swap_id = id, "Swap transaction cancelled");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AuthTokens, SwapStatus};
    use crate::infrastructure::http::test_support::{client_for, spawn_backend};
    use crate::session::Session;
    use crate::shared::AppError;
    use axum::body::Bytes;
    use axum::extract::{Path, Query};
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::{json, Value};
    use std::collections::HashMap;
    use std::sync::Mutex;

    fn gateway(base: &str) -> HttpSwapGateway {
        let session = Session::in_memory().shared();
        session.save(AuthTokens::new("tok", None, 3600));
        HttpSwapGateway::new(client_for(base, session))
    }

    #[test]
    fn complete_path_carries_soh_query() {
        assert_eq!(
            complete_path("SW-1", Some(87.5)),
            "SwapTransaction/SW-1/complete?SoH=87.5"
        );
        assert_eq!(complete_path("SW-1", None), "SwapTransaction/SW-1/complete");
    }

    #[tokio::test]
    async fn create_maps_response() {
        let router = Router::new().route(
            "/api/SwapTransaction",
            post(|Json(body): Json<Value>| async move {
                Json(json!({
                    "success": true,
                    "data": {
                        "SwapTransactionID": "SW-1",
                        "BookingID": body["BookingID"],
                        "OldBatteryID": body["OldBatteryID"],
                        "NewBatteryID": body["NewBatteryID"],
                        "StationID": body["StationID"],
                        "Status": "Pending"
                    }
                }))
            }),
        );
        let base = spawn_backend(router).await;

        let swap = NewSwapTransaction::new(Some("BK-1001".into()), "BAT-55", "BAT-77", "ST-7", 0.0)
            .unwrap();
        let created = gateway(&base).create(swap).await.unwrap();
        assert_eq!(created.id, "SW-1");
        assert_eq!(created.booking_id.as_deref(), Some("BK-1001"));
        assert_eq!(created.status, SwapStatus::Pending);
    }

    #[tokio::test]
    async fn tampered_payload_is_rejected_before_network() {
        let mut swap = NewSwapTransaction::new(None, "BAT-55", "BAT-77", "ST-7", 0.0).unwrap();
        swap.new_battery_id = "BAT-55".into();
        let err = gateway("http://127.0.0.1:9").create(swap).await.unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn complete_sends_no_body() {
        let seen: Arc<Mutex<Option<(String, usize)>>> = Arc::new(Mutex::new(None));
        let sink = seen.clone();
        let router = Router::new().route(
            "/api/SwapTransaction/{id}/complete",
            post(
                move |Path(id): Path<String>, Query(q): Query<HashMap<String, String>>, body: Bytes| {
                    let sink = sink.clone();
                    async move {
                        let soh = q.get("SoH").cloned().unwrap_or_default();
                        *sink.lock().unwrap() = Some((format!("{}:{}", id, soh), body.len()));
                        Json(json!({ "success": true, "message": "Swap completed" }))
                    }
                },
            ),
        );
        let base = spawn_backend(router).await;

        gateway(&base).complete("SW-1", Some(92.0)).await.unwrap();
        let (key, body_len) = seen.lock().unwrap().clone().unwrap();
        assert_eq!(key, "SW-1:92");
        assert_eq!(body_len, 0);
    }
}
