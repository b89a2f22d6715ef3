//! Text-field matching rules.

use crate::descriptor::UiElementDescriptor;

/// Class-name substrings that mark a text field on their own.
///
/// Ordered most specific first so [`explain`] names the closest match.
pub const TEXT_FIELD_CLASS_MARKERS: &[&str] = &[
    "MultiAutoCompleteTextView",
    "AutoCompleteTextView",
    "SearchAutoComplete",
    "SearchView",
    "TextInput",
    "EditText",
    "Input",
    "Field",
];

/// Class-name substrings that only count when the element is editable.
pub const EDITABLE_CLASS_MARKERS: &[&str] = &["TextView", "WebView"];

/// Content-description substrings hinting at a text entry.
pub const CONTENT_DESCRIPTION_HINTS: &[&str] = &["input", "text"];

/// Text content at or above this many characters does not count as a field.
pub const MAX_TEXT_CONTENT_CHARS: usize = 1000;

/// The clause that made an element count as a text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchReason {
    /// Class name contains a text-field marker.
    ClassName(&'static str),
    /// Class name contains a marker that requires the editable flag.
    EditableClassName(&'static str),
    /// Element reports itself as editable.
    Editable,
    /// Content description contains a hint.
    ContentDescription(&'static str),
    /// Element holds a short, non-empty text.
    ShortText,
}

impl std::fmt::Display for MatchReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchReason::ClassName(marker) => write!(f, "class name contains {marker:?}"),
            MatchReason::EditableClassName(marker) => {
                write!(f, "editable and class name contains {marker:?}")
            }
            MatchReason::Editable => write!(f, "editable"),
            MatchReason::ContentDescription(hint) => {
                write!(f, "content description contains {hint:?}")
            }
            MatchReason::ShortText => write!(f, "short text content"),
        }
    }
}

/// Whether the element looks like a text-entry field.
pub fn classify(descriptor: &UiElementDescriptor) -> bool {
    let reason = explain(descriptor);
    tracing::trace!(
        class_name = %descriptor.class_name,
        editable = descriptor.is_editable,
        reason = ?reason,
        "text field check"
    );
    reason.is_some()
}

/// The first matching clause, or `None` if the element is not a text field.
///
/// Clauses are checked in order: class name, editable class name, editable
/// flag, content description, text content.
pub fn explain(descriptor: &UiElementDescriptor) -> Option<MatchReason> {
    let class_name = descriptor.class_name.as_str();

    if let Some(marker) = find_marker(class_name, TEXT_FIELD_CLASS_MARKERS) {
        return Some(MatchReason::ClassName(marker));
    }

    if descriptor.is_editable {
        if let Some(marker) = find_marker(class_name, EDITABLE_CLASS_MARKERS) {
            return Some(MatchReason::EditableClassName(marker));
        }
        return Some(MatchReason::Editable);
    }

    if let Some(hint) = find_marker(&descriptor.content_description, CONTENT_DESCRIPTION_HINTS) {
        return Some(MatchReason::ContentDescription(hint));
    }

    if is_short_text(&descriptor.text_content) {
        return Some(MatchReason::ShortText);
    }

    None
}

fn find_marker(haystack: &str, markers: &[&'static str]) -> Option<&'static str> {
    markers.iter().copied().find(|marker| haystack.contains(marker))
}

fn is_short_text(text: &str) -> bool {
    !text.is_empty() && text.chars().count() < MAX_TEXT_CONTENT_CHARS
}
