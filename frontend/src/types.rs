//! Common types used across the frontend application.
//!
//! # Categories
//!
//! - **Notice Types** - transient user-facing messages
//! - **Error Types** - frontend error handling

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

// =============================================================================
// Notice Types
// =============================================================================

/// Notice severity level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    /// Informational message
    Info,
    /// Success/completion message
    Success,
    /// Recoverable problem, the flow continues
    Warning,
    /// Failed operation
    Error,
}

impl NoticeLevel {
    /// Bootstrap alert class for styling.
    pub fn css_class(&self) -> &'static str {
        match self {
            NoticeLevel::Info => "alert-info",
            NoticeLevel::Success => "alert-success",
            NoticeLevel::Warning => "alert-warning",
            NoticeLevel::Error => "alert-danger",
        }
    }

    /// Emoji prefix for display.
    pub fn emoji(&self) -> &'static str {
        match self {
            NoticeLevel::Info => "ℹ️",
            NoticeLevel::Success => "✅",
            NoticeLevel::Warning => "⚠️",
            NoticeLevel::Error => "❌",
        }
    }
}

static NEXT_NOTICE_ID: AtomicU64 = AtomicU64::new(1);

/// A transient toast message.
#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    /// Unique per page lifetime, used to dismiss this notice
    pub id: u64,
    /// Severity level
    pub level: NoticeLevel,
    /// Message text
    pub message: String,
    /// Timestamp string (HH:MM:SS)
    pub timestamp: String,
}

impl Notice {
    pub fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            id: NEXT_NOTICE_ID.fetch_add(1, Ordering::Relaxed),
            level,
            message: message.into(),
            timestamp: chrono::Local::now().format("%H:%M:%S").to_string(),
        }
    }
}

// =============================================================================
// Error Types
// =============================================================================

/// Frontend application errors.
#[derive(Clone, Debug, PartialEq)]
pub enum AppError {
    /// Files rejected by the extension filter.
    Validation(String),
    /// Submit attempted with nothing staged.
    EmptySelection,
    /// Submit attempted while an upload is running.
    InFlight,
    /// Server answered with a non-200 status.
    Server { status: u16 },
    /// Transport-level failure.
    Network(String),
    /// A browser API call failed.
    Dom(String),
    /// Malformed runtime configuration.
    Config(String),
}

impl AppError {
    /// Wrap a `JsValue` error coming from a browser API.
    pub fn dom(context: &str, err: impl fmt::Debug) -> Self {
        AppError::Dom(format!("{}: {:?}", context, err))
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Validation(msg) => write!(f, "Validation error: {}", msg),
            AppError::EmptySelection => write!(f, "Please select at least one file"),
            AppError::InFlight => write!(f, "An upload is already in progress"),
            AppError::Server { status } => write!(f, "Upload failed (HTTP {})", status),
            AppError::Network(msg) => write!(f, "Upload error: {}", msg),
            AppError::Dom(msg) => write!(f, "Browser error: {}", msg),
            AppError::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

/// Result type alias for frontend operations.
pub type AppResult<T> = Result<T, AppError>;
