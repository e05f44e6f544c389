//! Booking aggregate

pub mod gateway;
pub mod model;

pub use gateway::BookingGateway;
pub use model::{normalize_ui_status, Booking, BookingStatus, NewBooking, UiBookingStatus};
