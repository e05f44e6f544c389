//! Role guard for protected views
//!
//! A UX convenience only. The backend enforces authorization on every call.

use crate::domain::{AuthUser, Role};
use crate::session::{Session, SessionState};
use crate::shared::{AppError, AppResult};

pub const LOGIN_PATH: &str = "/login";
pub const NEUTRAL_PATH: &str = "/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowedRoles {
    /// Any authenticated user
    Any,
    Only(Vec<Role>),
}

impl AllowedRoles {
    /// Station terminal screens
    pub fn staff() -> Self {
        Self::Only(vec![Role::Staff, Role::Admin])
    }

    pub fn admin() -> Self {
        Self::Only(vec![Role::Admin])
    }

    pub fn admits(&self, role: Role) -> bool {
        match self {
            Self::Any => true,
            Self::Only(roles) => roles.contains(&role),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redirect {
    Login,
    /// Signed in, but not allowed here
    Neutral,
}

impl Redirect {
    pub fn path(&self) -> &'static str {
        match self {
            Self::Login => LOGIN_PATH,
            Self::Neutral => NEUTRAL_PATH,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum GuardOutcome {
    /// Session not initialised yet; render a placeholder
    Loading,
    Redirect(Redirect),
    Allow(AuthUser),
}

#[derive(Debug, Clone)]
pub struct RoleGuard {
    allowed: AllowedRoles,
}

impl RoleGuard {
    pub fn new(allowed: AllowedRoles) -> Self {
        Self { allowed }
    }

    pub fn evaluate(&self, state: &SessionState) -> GuardOutcome {
        match state {
            SessionState::Loading => GuardOutcome::Loading,
            SessionState::Anonymous => GuardOutcome::Redirect(Redirect::Login),
            SessionState::Authenticated(user) if self.allowed.admits(user.role) => {
                GuardOutcome::Allow(user.clone())
            }
            SessionState::Authenticated(_) => GuardOutcome::Redirect(Redirect::Neutral),
        }
    }

    /// Same decision as `evaluate`, as a result for non-view callers.
    pub fn require(&self, session: &Session) -> AppResult<AuthUser> {
        match self.evaluate(&session.state()) {
            GuardOutcome::Allow(user) => Ok(user),
            GuardOutcome::Loading => Err(AppError::Unauthorized(
                "Session is still loading".to_string(),
            )),
            GuardOutcome::Redirect(Redirect::Login) => {
                Err(AppError::Unauthorized("Sign in required".to_string()))
            }
            GuardOutcome::Redirect(Redirect::Neutral) => Err(AppError::Forbidden(
                session
                    .user()
                    .map(|u| format!("{} cannot open this page", u.role))
                    .unwrap_or_default(),
            )),
        }
    }
}
