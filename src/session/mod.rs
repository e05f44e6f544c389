//! Session and token store

pub mod claims;
pub mod storage;
pub mod store;

pub use claims::{decode_claims, TokenClaims};
pub use storage::{FileTokenStorage, MemoryTokenStorage, PersistedSession, TokenStorage};
pub use store::{Session, SessionState, SharedSession};
