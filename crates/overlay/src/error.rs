//! Error types for overlay surfaces.

use thiserror::Error;

/// Errors a surface can report while attaching or removing the bubble.
///
/// These never reach the controller; the dispatcher logs and drops them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OverlayError {
    /// The window service is not available (e.g., host shutting down).
    #[error("overlay surface unavailable: {0}")]
    Unavailable(String),

    /// The host lacks permission to draw over other apps.
    #[error("overlay permission not granted")]
    PermissionDenied,

    /// Attaching the bubble view failed.
    #[error("failed to show bubble: {0}")]
    ShowFailed(String),

    /// Removing the bubble view failed.
    #[error("failed to hide bubble: {0}")]
    HideFailed(String),
}
