//! Toast messages shown to station staff

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::shared::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastLevel {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
    pub at: DateTime<Utc>,
}

impl Toast {
    pub fn new(level: ToastLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            at: Utc::now(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(ToastLevel::Success, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(ToastLevel::Error, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(ToastLevel::Info, message)
    }
}

impl From<&AppError> for Toast {
    fn from(err: &AppError) -> Self {
        Self::error(err.user_message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_toast_uses_user_message() {
        let toast = Toast::from(&AppError::Network("timeout".into()));
        assert_eq!(toast.level, ToastLevel::Error);
        assert_eq!(toast.message, crate::shared::errors::CONNECTIVITY_MESSAGE);
    }

    #[test]
    fn level_serialises_lowercase() {
        let json = serde_json::to_value(Toast::success("Swap completed")).unwrap();
        assert_eq!(json["level"], "success");
        assert_eq!(json["message"], "Swap completed");
    }
}
