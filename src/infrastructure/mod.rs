//! Infrastructure layer - backend HTTP client, gateways and wire mappers

pub mod gateways;
pub mod http;
pub mod mappers;

pub use gateways::HttpGateways;
pub use http::ApiClient;
