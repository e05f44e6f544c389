//! Swap transaction aggregate

pub mod gateway;
pub mod model;

pub use gateway::SwapGateway;
pub use model::{validate_battery_pair, NewSwapTransaction, SwapStatus, SwapTransaction};
