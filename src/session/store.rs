//! The single authoritative session object
//!
//! One `Session` is created at bootstrap, `init`ialised from storage and then
//! shared as `Arc<Session>` with every gateway, guard and workflow. Cookie
//! mirrors are derived from it at the session endpoint only.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, info, warn};

use super::claims::{decode_claims, TokenClaims};
use super::storage::{FileTokenStorage, MemoryTokenStorage, PersistedSession, TokenStorage};
use crate::config::SessionConfig;
use crate::domain::{AuthTokens, AuthUser};

/// What the role guard sees
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    /// `init` has not run yet
    Loading,
    Anonymous,
    Authenticated(AuthUser),
}

#[derive(Default)]
struct Inner {
    initialized: bool,
    tokens: Option<AuthTokens>,
    user: Option<AuthUser>,
}

pub struct Session {
    inner: RwLock<Inner>,
    storage: Arc<dyn TokenStorage>,
}

pub type SharedSession = Arc<Session>;

impl Session {
    pub fn new(storage: Arc<dyn TokenStorage>) -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
            storage,
        }
    }

    /// Session backed by memory only, already initialised and empty.
    pub fn in_memory() -> Self {
        let session = Self::new(Arc::new(MemoryTokenStorage::new()));
        session.init();
        session
    }

    /// File-backed session at `storage_path`, or the default data dir.
    /// Not yet initialised.
    pub fn from_config(config: &SessionConfig) -> Self {
        let path = config
            .storage_path
            .clone()
            .unwrap_or_else(FileTokenStorage::default_path);
        debug!(path = %path.display(), "Using file token storage");
        Self::new(Arc::new(FileTokenStorage::new(path)))
    }

    pub fn shared(self) -> SharedSession {
        Arc::new(self)
    }

    fn read(&self) -> RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }

    /// Load persisted tokens and user info. Call once on bootstrap.
    pub fn init(&self) {
        let persisted = match self.storage.load() {
            Ok(p) => p.unwrap_or_default(),
            Err(e) => {
                warn!("Failed to load persisted session: {}", e);
                PersistedSession::default()
            }
        };

        let mut inner = self.write();
        inner.user = persisted.user.or_else(|| {
            persisted
                .tokens
                .as_ref()
                .and_then(|t| decode_claims(&t.access_token).ok())
                .and_then(|c| c.to_user())
        });
        inner.tokens = persisted.tokens;
        inner.initialized = true;
        debug!(authenticated = inner.tokens.is_some(), "Session initialised");
    }

    /// Store freshly issued tokens. The user is derived from the token
    /// claims unless one is already known for the same subject.
    pub fn save(&self, tokens: AuthTokens) {
        let claimed_user = decode_claims(&tokens.access_token)
            .ok()
            .and_then(|c| c.to_user());

        let snapshot = {
            let mut inner = self.write();
            let keep_user = match (&inner.user, &claimed_user) {
                (Some(current), Some(claimed)) => current.id == claimed.id,
                (Some(_), None) => true,
                _ => false,
            };
            if !keep_user {
                inner.user = claimed_user;
            }
            inner.tokens = Some(tokens);
            inner.initialized = true;
            PersistedSession {
                tokens: inner.tokens.clone(),
                user: inner.user.clone(),
            }
        };
        self.persist(&snapshot);
    }

    pub fn set_user(&self, user: AuthUser) {
        let snapshot = {
            let mut inner = self.write();
            inner.user = Some(user);
            PersistedSession {
                tokens: inner.tokens.clone(),
                user: inner.user.clone(),
            }
        };
        self.persist(&snapshot);
    }

    pub fn access_token(&self) -> Option<String> {
        self.read().tokens.as_ref().map(|t| t.access_token.clone())
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.read().tokens.as_ref().and_then(|t| t.refresh_token.clone())
    }

    pub fn tokens(&self) -> Option<AuthTokens> {
        self.read().tokens.clone()
    }

    /// True when there is no token or it is past its expiry.
    ///
    /// `clear` does not cancel requests already sent with the old token,
    /// so callers check this before reusing one.
    pub fn is_expired(&self) -> bool {
        self.read().tokens.as_ref().map_or(true, AuthTokens::is_expired)
    }

    pub fn user(&self) -> Option<AuthUser> {
        self.read().user.clone()
    }

    pub fn claims(&self) -> Option<TokenClaims> {
        self.access_token().and_then(|t| decode_claims(&t).ok())
    }

    pub fn state(&self) -> SessionState {
        let inner = self.read();
        if !inner.initialized {
            return SessionState::Loading;
        }
        match (&inner.tokens, &inner.user) {
            (Some(_), Some(user)) => SessionState::Authenticated(user.clone()),
            _ => SessionState::Anonymous,
        }
    }

    /// Forget tokens and user, locally and in storage.
    pub fn clear(&self) {
        {
            let mut inner = self.write();
            inner.tokens = None;
            inner.user = None;
        }
        if let Err(e) = self.storage.clear() {
            warn!("Failed to clear persisted session: {}", e);
        }
        info!("Session cleared");
    }

    fn persist(&self, snapshot: &PersistedSession) {
        if let Err(e) = self.storage.save(snapshot) {
            warn!("Failed to persist session: {}", e);
        }
    }
}
