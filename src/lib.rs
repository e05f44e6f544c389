//! # Swapstation portal
//!
//! Staff and admin portal for an EV battery-swap network.
//!
//! ## Architecture
//!
//! - **domain**: entities, status enumerations and gateway traits
//! - **session**: token store with persisted state and claim decoding
//! - **infrastructure**: backend HTTP client, gateways and wire mappers
//! - **application**: role guard and the station check-in workflow
//! - **notifications**: toast bus for success and error messages
//! - **interfaces**: proxy and session-cookie HTTP endpoints

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod notifications;
pub mod session;
pub mod shared;

pub use config::{default_config_path, AppConfig};

pub use application::{CheckInController, CheckInStep, RoleGuard};
pub use infrastructure::{ApiClient, HttpGateways};
pub use interfaces::{create_router, PortalState};
pub use notifications::{create_notifier, SharedNotifier, Toast};
pub use session::{Session, SharedSession};
pub use shared::{AppError, AppResult};
