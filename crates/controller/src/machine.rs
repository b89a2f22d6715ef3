//! Bubble visibility state machine.
//!
//! Pure decision logic: takes one input at a time and returns the effects
//! to perform. Timing and overlay I/O live in the service.

use std::time::Duration;

use focus_bubble_classifier::explain;
use focus_bubble_events::{FocusEvent, OverlayCommand, ServiceAction, VisibilityCause};
use serde::{Deserialize, Serialize};

use crate::settings::BubbleSettings;

/// Visibility of the bubble as the controller sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BubbleVisibility {
    #[default]
    Hidden,
    Visible,
}

impl BubbleVisibility {
    pub fn is_visible(&self) -> bool {
        matches!(self, BubbleVisibility::Visible)
    }
}

/// Something the caller must do after feeding the machine an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Send a command to the overlay surface.
    Overlay(OverlayCommand),
    /// Start the hide timer, replacing any outstanding one.
    ScheduleHide(Duration),
    /// Cancel the outstanding hide timer.
    CancelHide,
    /// Visibility actually changed.
    VisibilityChanged {
        visible: bool,
        cause: VisibilityCause,
    },
}

/// Debounced show/hide decisions for the bubble.
///
/// State: `Hidden` (initial) or `Visible`, plus whether a hide timer is
/// outstanding. A show always re-arms the timer; a hide always clears it.
#[derive(Debug, Clone)]
pub struct BubbleMachine {
    debounce: Duration,
    hide_on_outside_click: bool,
    visibility: BubbleVisibility,
    hide_pending: bool,
}

impl BubbleMachine {
    pub fn new(settings: &BubbleSettings) -> Self {
        Self {
            debounce: settings.debounce(),
            hide_on_outside_click: settings.hide_on_outside_click,
            visibility: BubbleVisibility::Hidden,
            hide_pending: false,
        }
    }

    pub fn visibility(&self) -> BubbleVisibility {
        self.visibility
    }

    /// Whether a hide timer is outstanding.
    pub fn hide_pending(&self) -> bool {
        self.hide_pending
    }

    /// Handle a notification from the focus event source.
    pub fn on_event(&mut self, event: &FocusEvent) -> Vec<Effect> {
        match event {
            FocusEvent::FieldFocused(element) | FocusEvent::TextChanged(element) => {
                let Some(reason) = explain(element) else {
                    tracing::debug!(
                        event = event.label(),
                        class_name = %element.class_name,
                        "not a text field, ignoring"
                    );
                    return Vec::new();
                };

                tracing::debug!(
                    event = event.label(),
                    class_name = %element.class_name,
                    %reason,
                    "text field active, showing bubble"
                );
                let cause = match event {
                    FocusEvent::TextChanged(_) => VisibilityCause::TextChanged,
                    _ => VisibilityCause::FieldFocused,
                };
                self.show(cause)
            }
            FocusEvent::Clicked(element) => {
                if self.hide_on_outside_click && explain(element).is_none() {
                    tracing::debug!(
                        class_name = %element.class_name,
                        "clicked outside text field, hiding bubble"
                    );
                    return self.hide(VisibilityCause::OutsideClick);
                }
                Vec::new()
            }
            FocusEvent::WindowChanged => {
                tracing::debug!("window changed, hiding bubble");
                self.hide(VisibilityCause::WindowChanged)
            }
        }
    }

    /// Handle expiry of the hide timer.
    ///
    /// Ignored unless a timer is outstanding from the most recent show.
    pub fn on_hide_timer_expired(&mut self) -> Vec<Effect> {
        if !self.hide_pending {
            tracing::debug!("stale hide timer, ignoring");
            return Vec::new();
        }
        self.hide_pending = false;

        if !self.visibility.is_visible() {
            return Vec::new();
        }

        tracing::debug!(debounce = ?self.debounce, "inactivity timeout, hiding bubble");
        self.visibility = BubbleVisibility::Hidden;
        vec![
            Effect::Overlay(OverlayCommand::Hide),
            Effect::VisibilityChanged {
                visible: false,
                cause: VisibilityCause::Timeout,
            },
        ]
    }

    /// Handle a direct request (manual show, close button, toggle).
    pub fn on_action(&mut self, action: ServiceAction) -> Vec<Effect> {
        match action {
            ServiceAction::Show => self.show(VisibilityCause::ManualShow),
            ServiceAction::Hide => self.hide(VisibilityCause::Dismissed),
            ServiceAction::Toggle if self.visibility.is_visible() => {
                self.hide(VisibilityCause::Dismissed)
            }
            ServiceAction::Toggle => self.show(VisibilityCause::ManualShow),
        }
    }

    /// Tear down: cancel the timer and take the bubble off screen.
    pub fn shutdown(&mut self) -> Vec<Effect> {
        self.hide(VisibilityCause::Shutdown)
    }

    fn show(&mut self, cause: VisibilityCause) -> Vec<Effect> {
        let mut effects = vec![
            Effect::Overlay(OverlayCommand::Show),
            Effect::ScheduleHide(self.debounce),
        ];

        if !self.visibility.is_visible() {
            effects.push(Effect::VisibilityChanged {
                visible: true,
                cause,
            });
        }

        self.visibility = BubbleVisibility::Visible;
        self.hide_pending = true;
        effects
    }

    fn hide(&mut self, cause: VisibilityCause) -> Vec<Effect> {
        let mut effects = vec![Effect::Overlay(OverlayCommand::Hide)];

        if self.hide_pending {
            effects.push(Effect::CancelHide);
        }

        if self.visibility.is_visible() {
            effects.push(Effect::VisibilityChanged {
                visible: false,
                cause,
            });
        }

        self.visibility = BubbleVisibility::Hidden;
        self.hide_pending = false;
        effects
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use focus_bubble_classifier::UiElementDescriptor;

    fn machine() -> BubbleMachine {
        BubbleMachine::new(&BubbleSettings::default())
    }

    fn edit_text() -> UiElementDescriptor {
        UiElementDescriptor::with_class_name("android.widget.EditText")
    }

    fn button() -> UiElementDescriptor {
        UiElementDescriptor::with_class_name("android.widget.Button")
    }

    fn count(effects: &[Effect], command: OverlayCommand) -> usize {
        effects
            .iter()
            .filter(|e| **e == Effect::Overlay(command))
            .count()
    }

    #[test]
    fn test_initial_state_hidden() {
        let machine = machine();
        assert_eq!(machine.visibility(), BubbleVisibility::Hidden);
        assert!(!machine.hide_pending());
    }

    #[test]
    fn test_focus_on_text_field_shows() {
        let mut machine = machine();
        let effects = machine.on_event(&FocusEvent::FieldFocused(edit_text()));

        assert_eq!(machine.visibility(), BubbleVisibility::Visible);
        assert_eq!(count(&effects, OverlayCommand::Show), 1);
        assert!(effects.contains(&Effect::ScheduleHide(Duration::from_millis(2000))));
        assert!(effects.contains(&Effect::VisibilityChanged {
            visible: true,
            cause: VisibilityCause::FieldFocused,
        }));
    }

    #[test]
    fn test_text_change_shows() {
        let mut machine = machine();
        let effects = machine.on_event(&FocusEvent::TextChanged(edit_text()));

        assert!(machine.visibility().is_visible());
        assert!(effects.contains(&Effect::VisibilityChanged {
            visible: true,
            cause: VisibilityCause::TextChanged,
        }));
    }

    #[test]
    fn test_focus_on_button_ignored() {
        let mut machine = machine();
        let effects = machine.on_event(&FocusEvent::FieldFocused(button()));

        assert!(effects.is_empty());
        assert_eq!(machine.visibility(), BubbleVisibility::Hidden);
    }

    #[test]
    fn test_window_change_hides_and_cancels() {
        let mut machine = machine();
        machine.on_event(&FocusEvent::FieldFocused(edit_text()));

        let effects = machine.on_event(&FocusEvent::WindowChanged);
        assert_eq!(machine.visibility(), BubbleVisibility::Hidden);
        assert_eq!(count(&effects, OverlayCommand::Hide), 1);
        assert!(effects.contains(&Effect::CancelHide));
        assert!(!machine.hide_pending());
    }

    #[test]
    fn test_window_change_while_hidden_still_hides() {
        let mut machine = machine();
        let effects = machine.on_event(&FocusEvent::WindowChanged);

        assert_eq!(effects, vec![Effect::Overlay(OverlayCommand::Hide)]);
    }

    #[test]
    fn test_second_focus_rearms_timer() {
        let mut machine = machine();
        machine.on_event(&FocusEvent::FieldFocused(edit_text()));
        let effects = machine.on_event(&FocusEvent::FieldFocused(edit_text()));

        assert!(machine.visibility().is_visible());
        assert!(effects.contains(&Effect::ScheduleHide(Duration::from_millis(2000))));
        // Already visible, so no second transition
        assert!(!effects
            .iter()
            .any(|e| matches!(e, Effect::VisibilityChanged { .. })));
    }

    #[test]
    fn test_timer_expiry_hides_once() {
        let mut machine = machine();
        machine.on_event(&FocusEvent::FieldFocused(edit_text()));

        let effects = machine.on_hide_timer_expired();
        assert_eq!(count(&effects, OverlayCommand::Hide), 1);
        assert_eq!(machine.visibility(), BubbleVisibility::Hidden);

        assert!(machine.on_hide_timer_expired().is_empty());
    }

    #[test]
    fn test_timer_expiry_after_window_change_ignored() {
        let mut machine = machine();
        machine.on_event(&FocusEvent::FieldFocused(edit_text()));
        machine.on_event(&FocusEvent::WindowChanged);

        assert!(machine.on_hide_timer_expired().is_empty());
    }

    #[test]
    fn test_click_ignored_by_default() {
        let mut machine = machine();
        machine.on_event(&FocusEvent::FieldFocused(edit_text()));

        assert!(machine.on_event(&FocusEvent::Clicked(button())).is_empty());
        assert!(machine.visibility().is_visible());
    }

    #[test]
    fn test_outside_click_hides_when_enabled() {
        let settings = BubbleSettings {
            hide_on_outside_click: true,
            ..BubbleSettings::default()
        };
        let mut machine = BubbleMachine::new(&settings);
        machine.on_event(&FocusEvent::FieldFocused(edit_text()));

        assert!(machine.on_event(&FocusEvent::Clicked(edit_text())).is_empty());
        assert!(machine.visibility().is_visible());

        let effects = machine.on_event(&FocusEvent::Clicked(button()));
        assert!(effects.contains(&Effect::VisibilityChanged {
            visible: false,
            cause: VisibilityCause::OutsideClick,
        }));
        assert_eq!(machine.visibility(), BubbleVisibility::Hidden);
    }

    #[test]
    fn test_toggle_action() {
        let mut machine = machine();

        machine.on_action(ServiceAction::Toggle);
        assert!(machine.visibility().is_visible());
        assert!(machine.hide_pending());

        machine.on_action(ServiceAction::Toggle);
        assert_eq!(machine.visibility(), BubbleVisibility::Hidden);
        assert!(!machine.hide_pending());
    }

    #[test]
    fn test_manual_show_and_dismiss() {
        let mut machine = machine();
        let effects = machine.on_action(ServiceAction::Show);
        assert!(effects.contains(&Effect::VisibilityChanged {
            visible: true,
            cause: VisibilityCause::ManualShow,
        }));

        let effects = machine.on_action(ServiceAction::Hide);
        assert!(effects.contains(&Effect::VisibilityChanged {
            visible: false,
            cause: VisibilityCause::Dismissed,
        }));
    }

    #[test]
    fn test_shutdown_cancels_timer() {
        let mut machine = machine();
        machine.on_event(&FocusEvent::FieldFocused(edit_text()));

        let effects = machine.shutdown();
        assert!(effects.contains(&Effect::CancelHide));
        assert!(!machine.hide_pending());
        assert!(machine.on_hide_timer_expired().is_empty());
    }
}
