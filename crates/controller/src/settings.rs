//! User-tunable bubble settings.

use std::path::{Path, PathBuf};
use std::time::Duration;

use focus_bubble_overlay::BubblePlacement;
use serde::{Deserialize, Serialize};

use crate::error::SettingsError;

/// Default delay after the last positive signal before the bubble hides.
pub const DEFAULT_DEBOUNCE_MS: u64 = 2000;

/// Settings file name inside the config directory.
pub const SETTINGS_FILE_NAME: &str = "settings.json";

/// Bubble behaviour settings.
///
/// Every field is optional in the JSON file; missing ones take defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BubbleSettings {
    /// Inactivity delay before auto-hide, in milliseconds.
    pub debounce_ms: u64,
    /// Hide the bubble when the user clicks an element that is not a text field.
    pub hide_on_outside_click: bool,
    pub placement: BubblePlacement,
}

impl Default for BubbleSettings {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            hide_on_outside_click: false,
            placement: BubblePlacement::default(),
        }
    }
}

impl BubbleSettings {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Set the debounce interval, rounded up to whole milliseconds.
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        let millis = debounce.as_nanos().div_ceil(1_000_000);
        self.debounce_ms = u64::try_from(millis).unwrap_or(u64::MAX);
        self
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.debounce_ms == 0 {
            return Err(SettingsError::ZeroDebounce);
        }
        Ok(())
    }

    /// Parse and validate settings from a JSON file.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let settings: Self =
            serde_json::from_str(&content).map_err(|source| SettingsError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        settings.validate()?;
        tracing::debug!(path = %path.display(), ?settings, "loaded bubble settings");
        Ok(settings)
    }

    /// Like [`load`](Self::load), but a missing file yields defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, SettingsError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no settings file, using defaults");
            return Ok(Self::default());
        }
        Self::load(path)
    }
}

/// Default settings location (e.g., `~/.config/focus-bubble/settings.json`).
pub fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|config| config.join("focus-bubble").join(SETTINGS_FILE_NAME))
}
