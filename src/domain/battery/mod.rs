//! Battery aggregate (batteries, station slots, condition logs)

pub mod gateway;
pub mod model;

pub use gateway::BatteryGateway;
pub use model::{Battery, BatteryLocation, BatterySlot, BatteryStatus, ConditionLog, SlotStatus};
