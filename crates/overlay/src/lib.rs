//! Overlay surface for the floating writing bubble.
//!
//! The surface is whatever actually draws the bubble (a system overlay
//! window on Android, a test recorder, a log line). The controller never
//! talks to it directly: commands go through an [`OverlayDispatcher`], which
//! skips redundant commands and swallows surface failures.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use focus_bubble_events::OverlayCommand;
//! use focus_bubble_overlay::{BubblePlacement, OverlayDispatcher, RecordingSurface};
//!
//! let surface = Arc::new(RecordingSurface::new());
//! let mut dispatcher = OverlayDispatcher::new(surface.clone(), BubblePlacement::default());
//!
//! dispatcher.apply(OverlayCommand::Show);
//! dispatcher.apply(OverlayCommand::Show);
//! assert_eq!(surface.commands(), vec![OverlayCommand::Show]);
//! ```

mod dispatcher;
mod error;
mod placement;
mod surface;

use std::sync::Arc;

pub use dispatcher::OverlayDispatcher;
pub use error::OverlayError;
pub use placement::{BubblePlacement, Gravity};
pub use surface::{LoggingSurface, NullSurface, RecordingSurface};

/// Something that can attach and remove the bubble window.
///
/// Implementations are called from a single task and need no internal
/// ordering guarantees beyond `Send + Sync`.
pub trait OverlaySurface: Send + Sync {
    /// Attach the bubble at the given placement.
    fn show(&self, placement: &BubblePlacement) -> Result<(), OverlayError>;

    /// Remove the bubble.
    fn hide(&self) -> Result<(), OverlayError>;
}

/// Type alias for a shared overlay surface.
pub type OverlaySurfaceRef = Arc<dyn OverlaySurface>;
