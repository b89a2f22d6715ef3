//! Mapping from raw accessibility notifications to [`FocusEvent`]s.
//!
//! The platform layer forwards whatever the accessibility service receives;
//! this module keeps the event-type codes and the null handling in one place
//! so the controller never sees a platform type.

use focus_bubble_classifier::UiElementDescriptor;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::FocusEvent;

/// `TYPE_VIEW_CLICKED`
pub const TYPE_VIEW_CLICKED: u32 = 0x0000_0001;
/// `TYPE_VIEW_FOCUSED`
pub const TYPE_VIEW_FOCUSED: u32 = 0x0000_0008;
/// `TYPE_VIEW_TEXT_CHANGED`
pub const TYPE_VIEW_TEXT_CHANGED: u32 = 0x0000_0010;
/// `TYPE_WINDOW_STATE_CHANGED`
pub const TYPE_WINDOW_STATE_CHANGED: u32 = 0x0000_0020;

/// Notification throttle requested from the platform.
pub const DEFAULT_NOTIFICATION_TIMEOUT: Duration = Duration::from_millis(100);

/// An accessibility notification as delivered by the platform.
///
/// Every field except the type may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAccessibilityEvent {
    pub event_type: u32,
    #[serde(default)]
    pub class_name: Option<String>,
    /// Editable flag of the source node; `None` when the node is gone.
    #[serde(default)]
    pub source_editable: Option<bool>,
    #[serde(default)]
    pub content_description: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

impl RawAccessibilityEvent {
    fn descriptor(self) -> UiElementDescriptor {
        UiElementDescriptor::from_parts(
            self.class_name,
            self.source_editable,
            self.content_description,
            self.text,
        )
    }

    /// Convert into a [`FocusEvent`].
    ///
    /// Returns `None` for event types the bubble does not react to.
    pub fn into_focus_event(self) -> Option<FocusEvent> {
        match self.event_type {
            TYPE_VIEW_FOCUSED => Some(FocusEvent::FieldFocused(self.descriptor())),
            TYPE_VIEW_TEXT_CHANGED => Some(FocusEvent::TextChanged(self.descriptor())),
            TYPE_VIEW_CLICKED => Some(FocusEvent::Clicked(self.descriptor())),
            TYPE_WINDOW_STATE_CHANGED => Some(FocusEvent::WindowChanged),
            _ => None,
        }
    }
}

/// What the platform adapter must subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionInfo {
    /// Bitmask of accessibility event types.
    pub event_types: u32,
    pub notification_timeout: Duration,
}

impl Default for SubscriptionInfo {
    fn default() -> Self {
        Self {
            event_types: TYPE_VIEW_FOCUSED
                | TYPE_VIEW_CLICKED
                | TYPE_WINDOW_STATE_CHANGED
                | TYPE_VIEW_TEXT_CHANGED,
            notification_timeout: DEFAULT_NOTIFICATION_TIMEOUT,
        }
    }
}

impl SubscriptionInfo {
    pub fn includes(&self, event_type: u32) -> bool {
        event_type != 0 && self.event_types & event_type == event_type
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_maps_with_defaults() {
        let raw = RawAccessibilityEvent {
            event_type: TYPE_VIEW_FOCUSED,
            class_name: Some("android.widget.EditText".to_string()),
            ..Default::default()
        };
        let event = raw.into_focus_event().unwrap();
        let element = event.element().unwrap();
        assert_eq!(element.class_name, "android.widget.EditText");
        assert!(!element.is_editable);
        assert_eq!(element.text_content, "");
    }

    #[test]
    fn test_window_state_maps_to_window_changed() {
        let raw = RawAccessibilityEvent {
            event_type: TYPE_WINDOW_STATE_CHANGED,
            class_name: Some("com.example.MainActivity".to_string()),
            ..Default::default()
        };
        assert_eq!(raw.into_focus_event(), Some(FocusEvent::WindowChanged));
    }

    #[test]
    fn test_click_and_text_change() {
        let click = RawAccessibilityEvent {
            event_type: TYPE_VIEW_CLICKED,
            ..Default::default()
        };
        assert!(matches!(click.into_focus_event(), Some(FocusEvent::Clicked(_))));

        let changed = RawAccessibilityEvent {
            event_type: TYPE_VIEW_TEXT_CHANGED,
            text: Some("hi".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            changed.into_focus_event(),
            Some(FocusEvent::TextChanged(d)) if d.text_content == "hi"
        ));
    }

    #[test]
    fn test_unknown_type_ignored() {
        // TYPE_VIEW_SCROLLED
        let raw = RawAccessibilityEvent {
            event_type: 0x0000_1000,
            ..Default::default()
        };
        assert_eq!(raw.into_focus_event(), None);
    }

    #[test]
    fn test_raw_deserialize_with_nulls() {
        let json = r#"{"eventType": 8, "className": null, "sourceEditable": null}"#;
        let raw: RawAccessibilityEvent = serde_json::from_str(json).unwrap();
        assert_eq!(raw.event_type, TYPE_VIEW_FOCUSED);
        assert!(raw.class_name.is_none());
    }

    #[test]
    fn test_default_subscription() {
        let info = SubscriptionInfo::default();
        assert_eq!(info.event_types, 0x39);
        assert!(info.includes(TYPE_VIEW_FOCUSED));
        assert!(info.includes(TYPE_WINDOW_STATE_CHANGED));
        assert!(!info.includes(0x0000_1000));
        assert!(!info.includes(0));
        assert_eq!(info.notification_timeout, Duration::from_millis(100));
    }
}
