//! HTTP gateways over the backend REST API

pub mod auth;
pub mod battery;
pub mod booking;
pub mod payment;
pub mod provider;
pub mod station;
pub mod swap;
pub mod transfer;

pub use auth::HttpAuthGateway;
pub use battery::HttpBatteryGateway;
pub use booking::HttpBookingGateway;
pub use payment::HttpPaymentGateway;
pub use provider::HttpGateways;
pub use station::resolve_station;
pub use swap::HttpSwapGateway;
pub use transfer::HttpTransferGateway;
