//! Unified access to all backend gateways
//!
//! The workflow controller and the portal pages only see this trait, so the
//! HTTP-backed bundle and in-memory fakes are interchangeable:
//!
//! ```ignore
//! async fn handle(gateways: &dyn GatewayProvider) -> AppResult<()> {
//!     let booking = gateways.bookings().get_by_id("BK-1001").await?;
//!     let slots = gateways.batteries().slots_by_station(&booking.station_id).await?;
//!     Ok(())
//! }
//! ```

use super::battery::BatteryGateway;
use super::booking::BookingGateway;
use super::payment::PaymentGateway;
use super::swap::SwapGateway;
use super::transfer::TransferGateway;
use super::user::AuthGateway;

pub trait GatewayProvider: Send + Sync {
    fn auth(&self) -> &dyn AuthGateway;
    fn bookings(&self) -> &dyn BookingGateway;
    fn batteries(&self) -> &dyn BatteryGateway;
    fn swaps(&self) -> &dyn SwapGateway;
    fn payments(&self) -> &dyn PaymentGateway;
    fn transfers(&self) -> &dyn TransferGateway;
}
