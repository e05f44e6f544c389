//! Battery transfer aggregate

pub mod gateway;
pub mod model;

pub use gateway::TransferGateway;
pub use model::{transfer_wire_status, BatteryTransfer, NewBatteryTransfer, TransferStatus};
