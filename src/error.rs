//! Error types for tab transfer operations.

use thiserror::Error;

use crate::snapshot::GroupId;

/// Primary error type for tab transfer operations.
#[derive(Error, Debug)]
pub enum TtError {
    // Relay errors
    #[error("Relay server offline at {url}: {reason}")]
    RelayOffline { url: String, reason: String },

    #[error("Relay rejected the request ({status}): {message}")]
    RelayRejected { status: u16, message: String },

    #[error("No tab data available on the relay")]
    NoSnapshot,

    #[error("Relay failed to start on {addr}: {reason}")]
    RelayBindFailed { addr: String, reason: String },

    // Snapshot errors
    #[error("Snapshot parse error: {0}")]
    SnapshotParse(String),

    // Browser errors
    #[error("Browser operation failed: {0}")]
    Browser(String),

    #[error("Window not found: {id}")]
    WindowNotFound { id: i32 },

    #[error("Tab not found: {id}")]
    TabNotFound { id: i32 },

    #[error("Tab group not found: {id}")]
    GroupNotFound { id: GroupId },

    // General errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl TtError {
    /// Returns true if the error is recoverable by the user.
    pub const fn is_user_recoverable(&self) -> bool {
        matches!(
            self,
            Self::RelayOffline { .. }
                | Self::NoSnapshot
                | Self::RelayBindFailed { .. }
        )
    }

    /// Returns a suggestion for how to fix the error.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::RelayOffline { .. } => Some("Start the relay with: tt serve"),
            Self::NoSnapshot => Some("Export tabs first (tt push, or the browser extension)"),
            Self::RelayBindFailed { .. } => Some("Is another relay already running on that port?"),
            _ => None,
        }
    }
}

/// Convenience type alias for Results using TtError.
pub type Result<T> = std::result::Result<T, TtError>;

/// Extension trait for adding context to errors.
pub trait ResultExt<T> {
    fn with_context<F, S>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T, E: std::error::Error> ResultExt<T> for std::result::Result<T, E> {
    fn with_context<F, S>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| TtError::Other(format!("{}: {e}", f().into())))
    }
}
