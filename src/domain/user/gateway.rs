//! Auth gateway interface

use async_trait::async_trait;

use super::model::{AuthTokens, AuthUser, LoginResult};
use crate::shared::AppResult;

#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Exchange credentials for tokens and store them in the session.
    async fn login(&self, email: &str, password: &str) -> AppResult<LoginResult>;

    /// Exchange the stored refresh token for a new pair.
    async fn refresh(&self) -> AppResult<AuthTokens>;

    /// Profile of the user owning the current access token.
    async fn me(&self) -> AppResult<AuthUser>;

    /// Drop the local session. The backend keeps no server-side state to revoke.
    async fn logout(&self);
}
