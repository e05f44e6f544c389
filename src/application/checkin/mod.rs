//! Battery-swap check-in at the station terminal

pub mod controller;
pub mod state;

pub use controller::CheckInController;
pub use state::{CheckInState, CheckInStep, CustomerInfo};
