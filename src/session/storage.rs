//! Persistence for the client-local session blob

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::domain::{AuthTokens, AuthUser};
use crate::shared::{AppError, AppResult};

/// What survives a restart: tokens plus the cached user info.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedSession {
    pub tokens: Option<AuthTokens>,
    pub user: Option<AuthUser>,
}

pub trait TokenStorage: Send + Sync {
    fn load(&self) -> AppResult<Option<PersistedSession>>;
    fn save(&self, session: &PersistedSession) -> AppResult<()>;
    fn clear(&self) -> AppResult<()>;
}

/// In-memory storage for tests and server-side use
#[derive(Default)]
pub struct MemoryTokenStorage {
    inner: Mutex<Option<PersistedSession>>,
}

impl MemoryTokenStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(session: PersistedSession) -> Self {
        Self {
            inner: Mutex::new(Some(session)),
        }
    }
}

impl TokenStorage for MemoryTokenStorage {
    fn load(&self) -> AppResult<Option<PersistedSession>> {
        Ok(self.inner.lock().unwrap_or_else(|e| e.into_inner()).clone())
    }

    fn save(&self, session: &PersistedSession) -> AppResult<()> {
        *self.inner.lock().unwrap_or_else(|e| e.into_inner()) = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> AppResult<()> {
        *self.inner.lock().unwrap_or_else(|e| e.into_inner()) = None;
        Ok(())
    }
}

/// JSON file on the operator's machine
pub struct FileTokenStorage {
    path: PathBuf,
}

impl FileTokenStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<data dir>/swapstation/session.json`
    pub fn default_path() -> PathBuf {
        dirs_next::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("swapstation")
            .join("session.json")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStorage for FileTokenStorage {
    fn load(&self) -> AppResult<Option<PersistedSession>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = std::fs::read_to_string(&self.path)
            .map_err(|e| AppError::Config(format!("Cannot read {}: {}", self.path.display(), e)))?;
        if raw.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_str(&raw)?))
    }

    fn save(&self, session: &PersistedSession) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                AppError::Config(format!("Cannot create {}: {}", parent.display(), e))
            })?;
        }
        let raw = serde_json::to_string_pretty(session)?;
        std::fs::write(&self.path, raw)
            .map_err(|e| AppError::Config(format!("Cannot write {}: {}", self.path.display(), e)))
    }

    fn clear(&self) -> AppResult<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::Config(format!(
                "Cannot remove {}: {}",
                self.path.display(),
                e
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Role;

    fn sample() -> PersistedSession {
        PersistedSession {
            tokens: Some(AuthTokens::new("access", Some("refresh".into()), 3600)),
            user: Some(AuthUser {
                id: "U-1".into(),
                email: Some("a@b.c".into()),
                name: None,
                phone: None,
                role: Role::Staff,
                station_id: Some("ST-7".into()),
            }),
        }
    }

    #[test]
    fn file_storage_persists_and_clears() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileTokenStorage::new(dir.path().join("nested").join("session.json"));
        assert_eq!(storage.load().unwrap(), None);

        let session = sample();
        storage.save(&session).unwrap();
        assert_eq!(storage.load().unwrap(), Some(session));

        storage.clear().unwrap();
        assert_eq!(storage.load().unwrap(), None);
        // clearing twice is fine
        storage.clear().unwrap();
    }

    #[test]
    fn memory_storage_roundtrip() {
        let storage = MemoryTokenStorage::new();
        storage.save(&sample()).unwrap();
        assert!(storage.load().unwrap().is_some());
        storage.clear().unwrap();
        assert!(storage.load().unwrap().is_none());
    }
}
