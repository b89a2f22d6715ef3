//! Shared event contracts for focus-bubble.
//!
//! Defines the values that cross component boundaries: focus notifications
//! coming in from the platform, overlay commands going out, service actions
//! and visibility-change payloads for observers. Using shared types keeps
//! the platform adapter, the controller and the replay tool in agreement on
//! field names.

pub mod accessibility;

use std::str::FromStr;

use focus_bubble_classifier::UiElementDescriptor;
use serde::{Deserialize, Serialize};

/// A notification from the focus event source.
///
/// Producers: platform adapter ([`accessibility`]), replay tool
/// Consumers: bubble controller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "element", rename_all = "snake_case")]
pub enum FocusEvent {
    /// An element received input focus.
    FieldFocused(UiElementDescriptor),
    /// The text of an element changed.
    TextChanged(UiElementDescriptor),
    /// An element was clicked.
    Clicked(UiElementDescriptor),
    /// The foreground window changed.
    WindowChanged,
}

impl FocusEvent {
    /// The element the event refers to, if any.
    pub fn element(&self) -> Option<&UiElementDescriptor> {
        match self {
            FocusEvent::FieldFocused(d) | FocusEvent::TextChanged(d) | FocusEvent::Clicked(d) => {
                Some(d)
            }
            FocusEvent::WindowChanged => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FocusEvent::FieldFocused(_) => "field_focused",
            FocusEvent::TextChanged(_) => "text_changed",
            FocusEvent::Clicked(_) => "clicked",
            FocusEvent::WindowChanged => "window_changed",
        }
    }
}

/// Command for the overlay surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlayCommand {
    Show,
    Hide,
}

impl std::fmt::Display for OverlayCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OverlayCommand::Show => write!(f, "show"),
            OverlayCommand::Hide => write!(f, "hide"),
        }
    }
}

/// Direct request to the bubble service, outside the focus heuristic.
///
/// Parsed from the action strings the host uses (`"show_bubble"`,
/// `"hide_bubble"`, `"toggle_bubble"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServiceAction {
    #[serde(rename = "show_bubble")]
    Show,
    #[serde(rename = "hide_bubble")]
    Hide,
    #[serde(rename = "toggle_bubble")]
    Toggle,
}

impl ServiceAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceAction::Show => "show_bubble",
            ServiceAction::Hide => "hide_bubble",
            ServiceAction::Toggle => "toggle_bubble",
        }
    }
}

/// Action string that is not one of the known service actions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown bubble action: {0}")]
pub struct UnknownAction(pub String);

impl FromStr for ServiceAction {
    type Err = UnknownAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "show_bubble" => Ok(ServiceAction::Show),
            "hide_bubble" => Ok(ServiceAction::Hide),
            "toggle_bubble" => Ok(ServiceAction::Toggle),
            other => Err(UnknownAction(other.to_string())),
        }
    }
}

/// Why the bubble changed visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisibilityCause {
    FieldFocused,
    TextChanged,
    WindowChanged,
    OutsideClick,
    Timeout,
    ManualShow,
    Dismissed,
    Shutdown,
}

/// Event emitted when the bubble becomes visible or hidden.
///
/// Producers: bubble service
/// Consumers: host UI, replay tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibilityChanged {
    /// Visibility after the transition.
    pub visible: bool,
    pub cause: VisibilityCause,
    /// Timestamp in milliseconds since epoch.
    pub timestamp_ms: i64,
}

impl VisibilityChanged {
    pub fn now(visible: bool, cause: VisibilityCause) -> Self {
        Self {
            visible,
            cause,
            timestamp_ms: chrono::Utc::now().timestamp_millis(),
        }
    }
}

/// Event names as constants to prevent typos.
pub mod event_names {
    /// Bubble visibility changed.
    pub const VISIBILITY_CHANGED: &str = "bubble:visibility_changed";
}
