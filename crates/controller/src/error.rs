//! Error types for the bubble controller.

use std::path::PathBuf;
use thiserror::Error;

/// Errors loading or validating [`BubbleSettings`](crate::BubbleSettings).
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Failed to read the settings file.
    #[error("failed to read settings file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Settings file is not valid JSON for the settings schema.
    #[error("invalid settings in '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Debounce interval must be positive.
    #[error("debounce interval must be greater than zero")]
    ZeroDebounce,
}

/// Errors talking to a running [`BubbleService`](crate::BubbleService).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// The service task has shut down.
    #[error("bubble service is not running")]
    Stopped,
}
