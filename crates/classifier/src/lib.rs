//! Field classification for focus-bubble.
//!
//! Decides whether a focused or edited UI element is a text-entry field.
//! The heuristic is deliberately coarse: a handful of class-name substrings,
//! the editable flag, a content-description hint and a short-text check.
//! Almost any populated text widget matches.
//!
//! Pure domain logic - no I/O, no platform dependencies.
//!
//! # Example
//!
//! ```
//! use focus_bubble_classifier::{classify, UiElementDescriptor};
//!
//! let field = UiElementDescriptor::with_class_name("android.widget.EditText");
//! assert!(classify(&field));
//!
//! let button = UiElementDescriptor::with_class_name("android.widget.Button");
//! assert!(!classify(&button));
//! ```

mod descriptor;
mod rules;

pub use descriptor::UiElementDescriptor;
pub use rules::{
    classify, explain, MatchReason, CONTENT_DESCRIPTION_HINTS, EDITABLE_CLASS_MARKERS,
    MAX_TEXT_CONTENT_CHARS, TEXT_FIELD_CLASS_MARKERS,
};
