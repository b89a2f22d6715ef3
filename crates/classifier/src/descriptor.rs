//! Description of a UI element taken from a single focus notification.

use serde::{Deserialize, Deserializer, Serialize};

/// Snapshot of the element that produced a focus, click or text-change event.
///
/// Built fresh for every event. Fields the platform did not report are empty
/// strings or `false`; a JSON `null` deserializes the same way.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiElementDescriptor {
    /// Widget class name (e.g., "android.widget.EditText")
    #[serde(default, deserialize_with = "null_as_default")]
    pub class_name: String,

    /// Whether the platform reports the element as editable
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_editable: bool,

    /// Accessibility label of the element
    #[serde(default, deserialize_with = "null_as_default")]
    pub content_description: String,

    /// Current text of the element
    #[serde(default, deserialize_with = "null_as_default")]
    pub text_content: String,
}

impl UiElementDescriptor {
    pub fn with_class_name(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            ..Self::default()
        }
    }

    /// Build a descriptor from optional platform values.
    pub fn from_parts(
        class_name: Option<String>,
        is_editable: Option<bool>,
        content_description: Option<String>,
        text_content: Option<String>,
    ) -> Self {
        Self {
            class_name: class_name.unwrap_or_default(),
            is_editable: is_editable.unwrap_or(false),
            content_description: content_description.unwrap_or_default(),
            text_content: text_content.unwrap_or_default(),
        }
    }

    pub fn editable(mut self, is_editable: bool) -> Self {
        self.is_editable = is_editable;
        self
    }

    pub fn content_description(mut self, description: impl Into<String>) -> Self {
        self.content_description = description.into();
        self
    }

    pub fn text_content(mut self, text: impl Into<String>) -> Self {
        self.text_content = text.into();
        self
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full() {
        let json = r#"{
            "className": "android.widget.EditText",
            "isEditable": true,
            "contentDescription": "Message",
            "textContent": "hello"
        }"#;
        let descriptor: UiElementDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(descriptor.class_name, "android.widget.EditText");
        assert!(descriptor.is_editable);
        assert_eq!(descriptor.content_description, "Message");
        assert_eq!(descriptor.text_content, "hello");
    }

    #[test]
    fn test_deserialize_missing_fields() {
        let descriptor: UiElementDescriptor = serde_json::from_str("{}").unwrap();
        assert_eq!(descriptor, UiElementDescriptor::default());
    }

    #[test]
    fn test_deserialize_null_fields() {
        let json = r#"{"className": null, "isEditable": null, "textContent": null}"#;
        let descriptor: UiElementDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(descriptor.class_name, "");
        assert!(!descriptor.is_editable);
        assert_eq!(descriptor.text_content, "");
    }

    #[test]
    fn test_from_parts_defaults() {
        let descriptor = UiElementDescriptor::from_parts(None, None, None, None);
        assert_eq!(descriptor, UiElementDescriptor::default());
    }
}
