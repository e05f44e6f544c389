//! Booking gateway interface

use async_trait::async_trait;

use super::model::{Booking, BookingStatus, NewBooking};
use crate::shared::AppResult;

#[async_trait]
pub trait BookingGateway: Send + Sync {
    /// Fetch one booking (the reservation code scanned at the station)
    async fn get_by_id(&self, id: &str) -> AppResult<Booking>;

    /// List bookings for a station.
    ///
    /// With `station_id = None` the station is resolved from the session.
    async fn list_for_station(&self, station_id: Option<&str>) -> AppResult<Vec<Booking>>;

    /// Create a booking for a customer
    async fn create(&self, booking: NewBooking) -> AppResult<Booking>;

    /// Move a booking to a new status (check-in, complete)
    async fn update_status(&self, id: &str, status: BookingStatus) -> AppResult<Booking>;

    /// Cancel a booking
    async fn cancel(&self, id: &str) -> AppResult<()>;
}
