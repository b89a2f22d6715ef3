//! Fire-and-forget command delivery to an overlay surface.

use focus_bubble_events::OverlayCommand;

use crate::{BubblePlacement, OverlaySurfaceRef};

/// Delivers overlay commands, skipping ones that would not change anything.
///
/// Tracks whether the bubble is attached. A failed command leaves that state
/// untouched, so the next command of the same kind is retried.
pub struct OverlayDispatcher {
    surface: OverlaySurfaceRef,
    placement: BubblePlacement,
    attached: bool,
}

impl OverlayDispatcher {
    pub fn new(surface: OverlaySurfaceRef, placement: BubblePlacement) -> Self {
        Self {
            surface,
            placement,
            attached: false,
        }
    }

    /// Whether the last successful command left the bubble on screen.
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Apply a command. Failures are logged and dropped.
    pub fn apply(&mut self, command: OverlayCommand) {
        let want_attached = command == OverlayCommand::Show;
        if self.attached == want_attached {
            tracing::debug!(%command, "overlay already in requested state, skipping");
            return;
        }

        let result = match command {
            OverlayCommand::Show => self.surface.show(&self.placement),
            OverlayCommand::Hide => self.surface.hide(),
        };

        match result {
            Ok(()) => {
                self.attached = want_attached;
                tracing::debug!(%command, "overlay command applied");
            }
            Err(e) => {
                tracing::warn!(%command, error = %e, "overlay command failed");
            }
        }
    }
}
