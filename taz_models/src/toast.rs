use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToastSeverity {
    Success,
    Error,
    Warning,
    Info,
}

impl ToastSeverity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

/// A transient notice about the outcome of an action.
///
/// Notices without `auto_dismiss` stay visible until they are closed or
/// replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastNotice {
    pub message: String,
    pub severity: ToastSeverity,
    pub auto_dismiss: Option<Duration>,
}

impl ToastNotice {
    pub const DEFAULT_DURATION: Duration = Duration::from_millis(5000);

    pub fn new(severity: ToastSeverity, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity,
            auto_dismiss: Some(Self::DEFAULT_DURATION),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(ToastSeverity::Success, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(ToastSeverity::Error, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(ToastSeverity::Warning, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(ToastSeverity::Info, message)
    }

    /// Set the auto dismiss timeout. A zero duration disables auto dismissal.
    pub fn with_auto_dismiss(mut self, duration: Duration) -> Self {
        self.auto_dismiss = (!duration.is_zero()).then_some(duration);
        self
    }
}
