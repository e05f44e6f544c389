use thiserror::Error;

/// Coarse classification used to decide how a failure is surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Rejected locally, before any network call.
    Validation,
    /// 401 that could not be recovered by a token refresh.
    Authentication,
    /// 403 or a role mismatch.
    Authorization,
    /// Any other non-success answer from the backend.
    Backend,
    /// Transport-level failure (DNS, connect, timeout, 502/503).
    Network,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation: {field}: {message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Session expired, please sign in again")]
    SessionExpired,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Backend error {status}: {message}")]
    Backend { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Config error: {0}")]
    Config(String),
}

pub type AppResult<T> = Result<T, AppError>;

pub const CONNECTIVITY_MESSAGE: &str =
    "Cannot reach the server. Check your connection and try again.";

impl AppError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation { .. } => ErrorKind::Validation,
            Self::Unauthorized(_) | Self::SessionExpired => ErrorKind::Authentication,
            Self::Forbidden(_) => ErrorKind::Authorization,
            Self::Backend { .. } | Self::Decode(_) | Self::Config(_) => ErrorKind::Backend,
            Self::Network(_) => ErrorKind::Network,
        }
    }

    /// HTTP status carried by the error, if it came from the backend.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Backend { status, .. } => Some(*status),
            Self::Unauthorized(_) | Self::SessionExpired => Some(401),
            Self::Forbidden(_) => Some(403),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Text suitable for a toast or an inline field message.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation { message, .. } => message.clone(),
            Self::Unauthorized(_) | Self::SessionExpired => {
                "Your session has expired. Please sign in again.".to_string()
            }
            Self::Forbidden(msg) if msg.is_empty() => "Insufficient role".to_string(),
            Self::Forbidden(msg) => format!("Insufficient role: {}", msg),
            Self::Backend { message, .. } => message.clone(),
            Self::Network(_) => CONNECTIVITY_MESSAGE.to_string(),
            Self::Decode(msg) | Self::Config(msg) => msg.clone(),
        }
    }

    /// Map an HTTP status plus an extracted message onto the taxonomy.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            401 => Self::Unauthorized(message),
            403 => Self::Forbidden(message),
            502 | 503 => Self::Network(format!("{} ({})", message, status)),
            _ => Self::Backend { status, message },
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return Self::Decode(err.to_string());
        }
        match err.status() {
            Some(status) => Self::from_status(status.as_u16(), err.to_string()),
            None => Self::Network(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}
