//! Built-in surfaces: recording, logging and no-op.

use std::sync::{Mutex, MutexGuard};

use focus_bubble_events::OverlayCommand;

use crate::{BubblePlacement, OverlayError, OverlaySurface};

/// In-memory surface for tests and headless runs.
///
/// Records every command it receives, including the ones it was told to fail.
#[derive(Default)]
pub struct RecordingSurface {
    inner: Mutex<RecordingState>,
}

#[derive(Default)]
struct RecordingState {
    commands: Vec<OverlayCommand>,
    visible: bool,
    failures_pending: usize,
    last_placement: Option<BubblePlacement>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, RecordingState> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Make the next `count` commands fail with [`OverlayError::Unavailable`].
    pub fn fail_next(&self, count: usize) {
        self.state().failures_pending = count;
    }

    /// All commands received so far.
    pub fn commands(&self) -> Vec<OverlayCommand> {
        self.state().commands.clone()
    }

    /// Number of received commands of one kind.
    pub fn count(&self, command: OverlayCommand) -> usize {
        self.state()
            .commands
            .iter()
            .filter(|c| **c == command)
            .count()
    }

    /// Whether the bubble is currently attached.
    pub fn is_visible(&self) -> bool {
        self.state().visible
    }

    pub fn last_placement(&self) -> Option<BubblePlacement> {
        self.state().last_placement
    }

    fn record(&self, command: OverlayCommand) -> Result<(), OverlayError> {
        let mut state = self.state();
        state.commands.push(command);

        if state.failures_pending > 0 {
            state.failures_pending -= 1;
            return Err(OverlayError::Unavailable("simulated failure".to_string()));
        }

        state.visible = command == OverlayCommand::Show;
        Ok(())
    }
}

impl OverlaySurface for RecordingSurface {
    fn show(&self, placement: &BubblePlacement) -> Result<(), OverlayError> {
        self.record(OverlayCommand::Show)?;
        self.state().last_placement = Some(*placement);
        Ok(())
    }

    fn hide(&self) -> Result<(), OverlayError> {
        self.record(OverlayCommand::Hide)
    }
}

/// Surface that only logs, for the replay tool.
pub struct LoggingSurface;

impl OverlaySurface for LoggingSurface {
    fn show(&self, placement: &BubblePlacement) -> Result<(), OverlayError> {
        tracing::info!(
            gravity = ?placement.gravity,
            x = placement.x,
            y = placement.y,
            "bubble shown"
        );
        Ok(())
    }

    fn hide(&self) -> Result<(), OverlayError> {
        tracing::info!("bubble hidden");
        Ok(())
    }
}

/// No-op surface that accepts every command.
pub struct NullSurface;

impl OverlaySurface for NullSurface {
    fn show(&self, _placement: &BubblePlacement) -> Result<(), OverlayError> {
        Ok(())
    }

    fn hide(&self) -> Result<(), OverlayError> {
        Ok(())
    }
}
