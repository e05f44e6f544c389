//! HTTP implementation of AuthGateway

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::info;

use crate::domain::user::AuthGateway;
use crate::domain::{AuthTokens, AuthUser, LoginResult};
use crate::infrastructure::http::ApiClient;
use crate::infrastructure::mappers::{embedded_user, tokens_from_wire, user_from_wire};
use crate::shared::{AppError, AppResult};

const LOGIN_PATH: &str = "Auth/login";
pub(crate) const ME_PATH: &str = "Auth/me";
pub(crate) const ME_FALLBACK_PATH: &str = "Users/me";

pub struct HttpAuthGateway {
    client: Arc<ApiClient>,
}

impl HttpAuthGateway {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

/// Fetch the current profile and cache it on the session.
pub(crate) async fn fetch_profile(client: &ApiClient) -> AppResult<AuthUser> {
    let value = client.get_with_fallback(ME_PATH, ME_FALLBACK_PATH).await?;
    let user = user_from_wire(&value)?;
    client.session().set_user(user.clone());
    Ok(user)
}

#[async_trait]
impl AuthGateway for HttpAuthGateway {
    async fn login(&self, email: &str, password: &str) -> AppResult<LoginResult> {
        let email = email.trim();
        if email.is_empty() {
            return Err(AppError::validation("email", "Email is required"));
        }
        if password.is_empty() {
            return Err(AppError::validation("password", "Password is required"));
        }

        let value = self
            .client
            .post_anonymous(LOGIN_PATH, &json!({ "email": email, "password": password }))
            .await?;
        let tokens = tokens_from_wire(&value)?;
        let user = embedded_user(&value);

        let session = self.client.session();
        session.save(tokens.clone());
        if let Some(user) = &user {
            session.set_user(user.clone());
        }
        info!(email, "Signed in");

        Ok(LoginResult { tokens, user })
    }

    async fn refresh(&self) -> AppResult<AuthTokens> {
        self.client.refresh_tokens().await
    }

    async fn me(&self) -> AppResult<AuthUser> {
        fetch_profile(&self.client).await
    }

    async fn logout(&self) {
        self.client.session().clear();
        info!("Signed out");
    }
}
