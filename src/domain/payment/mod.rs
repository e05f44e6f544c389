//! Payment aggregate

pub mod gateway;
pub mod model;

pub use gateway::PaymentGateway;
pub use model::{NewPayment, Payment, PaymentMethod, PaymentStatus};
