//! Bubble controller for focus-bubble.
//!
//! Turns focus notifications into show/hide commands for the floating
//! writing bubble, hiding it again after a period of inactivity.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Domain Layer                             │
//! │  machine.rs  - Visibility state machine (pure)              │
//! │  settings.rs - Debounce, click policy, placement            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   Application Layer                          │
//! │  timer.rs   - Single-slot cancellable hide timer            │
//! │  service.rs - Serialized event loop driving the overlay     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use focus_bubble_controller::{BubbleService, BubbleSettings};
//! use focus_bubble_events::FocusEvent;
//! use focus_bubble_overlay::LoggingSurface;
//! use std::sync::Arc;
//!
//! let service = BubbleService::spawn(BubbleSettings::default(), Arc::new(LoggingSurface))?;
//! let handle = service.handle();
//!
//! handle.submit(FocusEvent::FieldFocused(descriptor))?;
//! // ... two seconds later the bubble hides on its own
//! service.shutdown().await;
//! ```

mod error;
mod machine;
mod service;
mod settings;
mod timer;

pub use error::{ServiceError, SettingsError};
pub use machine::{BubbleMachine, BubbleVisibility, Effect};
pub use service::{BubbleHandle, BubbleService, BubbleServiceBuilder, VisibilityCallback};
pub use settings::{default_settings_path, BubbleSettings, DEFAULT_DEBOUNCE_MS, SETTINGS_FILE_NAME};
pub use timer::{DebounceTimer, TimerHandle};
