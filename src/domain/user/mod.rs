//! Users, roles and tokens

pub mod gateway;
pub mod model;

pub use gateway::AuthGateway;
pub use model::{AuthTokens, AuthUser, LoginResult, Role};
