//! HTTP implementation of BookingGateway
//!
//! Station booking lists are cached per station for the configured TTL.
//! Any status change or cancellation drops the whole cache, since the
//! changed booking may belong to a list cached under another key.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;
use serde_json::json;
use tracing::{debug, info};

use super::station::resolve_station;
use crate::domain::booking::BookingGateway;
use crate::domain::{Booking, BookingStatus, NewBooking};
use crate::infrastructure::http::{path_segment, ApiClient};
use crate::infrastructure::mappers::{booking_from_wire, bookings_from_wire};
use crate::shared::{AppError, AppResult};

pub struct HttpBookingGateway {
    client: Arc<ApiClient>,
    cache: Cache<String, Vec<Booking>>,
}

impl HttpBookingGateway {
    pub fn new(client: Arc<ApiClient>, ttl: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(256)
            .time_to_live(ttl)
            .build();
        Self { client, cache }
    }

    /// Drop every cached station list
    pub fn invalidate(&self) {
        self.cache.invalidate_all();
    }
}

fn require_id(id: &str) -> AppResult<&str> {
    path_segment("bookingId", id)
}

#[async_trait]
impl BookingGateway for HttpBookingGateway {
    async fn get_by_id(&self, id: &str) -> AppResult<Booking> {
        let id = require_id(id)?;
        let value = self
            .client
            .get_with_fallback(&format!("Booking/{}", id), &format!("Bookings/{}", id))
            .await?;
        booking_from_wire(&value)
    }

    async fn list_for_station(&self, station_id: Option<&str>) -> AppResult<Vec<Booking>> {
        let station = resolve_station(&self.client, station_id).await?;
        let station = path_segment("stationId", &station)?.to_string();

        if let Some(cached) = self.cache.get(&station).await {
            debug!(station = %station, "Booking list cache hit");
            return Ok(cached);
        }

        let value = self
            .client
            .get_with_fallback(
                &format!("Booking/station/{}", station),
                &format!("Bookings/station/{}", station),
            )
            .await?;
        let bookings = bookings_from_wire(&value)?;
        self.cache.insert(station, bookings.clone()).await;
        Ok(bookings)
    }

    async fn create(&self, booking: NewBooking) -> AppResult<Booking> {
        if booking.station_id.trim().is_empty() {
            return Err(AppError::validation("stationId", "Station is required"));
        }
        if booking.vehicle_id.trim().is_empty() {
            return Err(AppError::validation("vehicleId", "Vehicle is required"));
        }

        let value = self.client.post("Booking", &booking).await?;
        let created = booking_from_wire(&value)?;
        self.cache.invalidate(&booking.station_id).await;
        info!(booking_id = %created.id, station = %booking.station_id, "Booking created");
        Ok(created)
    }

    async fn update_status(&self, id: &str, status: BookingStatus) -> AppResult<Booking> {
        let id = require_id(id)?;
        let value = self
            .client
            .put(
                &format!("Booking/{}/status", id),
                &json!({ "Status": status.as_str() }),
            )
            .await?;
        self.invalidate();
        info!(booking_id = id, status = %status, "Booking status updated");

        if value.is_null() {
            return self.get_by_id(id).await;
        }
        booking_from_wire(&value)
    }

    async fn cancel(&self, id: &str) -> AppResult<()> {
        let id = require_id(id)?;
        self.client
            .post_empty(&format!("Booking/{}/cancel", id))
            .await?;
        self.invalidate();
        info!(booking_id = id, "Booking cancelled");
        Ok(())
    }
}
