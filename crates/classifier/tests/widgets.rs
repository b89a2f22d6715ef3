//! Classification of descriptors as the accessibility layer reports them.

use focus_bubble_classifier::{classify, explain, MatchReason, UiElementDescriptor};

fn parse(json: &str) -> UiElementDescriptor {
    serde_json::from_str(json).expect("valid descriptor JSON")
}

#[test]
fn test_messaging_compose_box() {
    let descriptor = parse(
        r#"{"className": "android.widget.EditText", "isEditable": true,
            "contentDescription": null, "textContent": ""}"#,
    );
    assert!(classify(&descriptor));
}

#[test]
fn test_toolbar_button_without_text() {
    let descriptor = parse(
        r#"{"className": "android.widget.ImageButton", "isEditable": false,
            "contentDescription": "Navigate up", "textContent": null}"#,
    );
    assert!(!classify(&descriptor));
}

#[test]
fn test_labelled_button_matches_on_text() {
    // Any populated widget with short text counts.
    let descriptor = parse(r#"{"className": "android.widget.Button", "textContent": "Send"}"#);
    assert_eq!(explain(&descriptor), Some(MatchReason::ShortText));
}

#[test]
fn test_browser_content_editable() {
    let descriptor = parse(r#"{"className": "android.webkit.WebView", "isEditable": true}"#);
    assert_eq!(
        explain(&descriptor),
        Some(MatchReason::EditableClassName("WebView"))
    );
}

#[test]
fn test_article_body_too_long() {
    let body = "lorem ipsum ".repeat(100);
    let descriptor = UiElementDescriptor::with_class_name("android.widget.TextView")
        .text_content(body);
    assert!(!classify(&descriptor));
}
