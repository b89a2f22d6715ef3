//! Bubble service - the task that owns the machine, the timer and the overlay.

use std::sync::Arc;

use focus_bubble_events::accessibility::RawAccessibilityEvent;
use focus_bubble_events::{FocusEvent, ServiceAction, VisibilityChanged};
use focus_bubble_overlay::{OverlayDispatcher, OverlaySurfaceRef};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::error::{ServiceError, SettingsError};
use crate::machine::{BubbleMachine, BubbleVisibility, Effect};
use crate::settings::BubbleSettings;
use crate::timer::DebounceTimer;

/// Callback type for visibility changes.
pub type VisibilityCallback = Arc<dyn Fn(VisibilityChanged) + Send + Sync + 'static>;

enum Request {
    Event(FocusEvent),
    Action(ServiceAction),
}

/// Cheap, cloneable handle for feeding a running [`BubbleService`].
#[derive(Clone)]
pub struct BubbleHandle {
    tx: mpsc::UnboundedSender<Request>,
    visibility: watch::Receiver<BubbleVisibility>,
}

impl BubbleHandle {
    /// Queue a focus notification.
    pub fn submit(&self, event: FocusEvent) -> Result<(), ServiceError> {
        self.tx
            .send(Request::Event(event))
            .map_err(|_| ServiceError::Stopped)
    }

    /// Map and queue a raw accessibility notification.
    ///
    /// Returns `Ok(false)` if the event type is not one the bubble reacts to.
    pub fn submit_raw(&self, raw: RawAccessibilityEvent) -> Result<bool, ServiceError> {
        let event_type = raw.event_type;
        match raw.into_focus_event() {
            Some(event) => self.submit(event).map(|_| true),
            None => {
                tracing::trace!(event_type, "ignoring accessibility event");
                Ok(false)
            }
        }
    }

    /// Queue a direct show/hide/toggle request.
    pub fn perform(&self, action: ServiceAction) -> Result<(), ServiceError> {
        self.tx
            .send(Request::Action(action))
            .map_err(|_| ServiceError::Stopped)
    }

    /// Visibility after the last processed input.
    pub fn visibility(&self) -> BubbleVisibility {
        *self.visibility.borrow()
    }

    pub fn is_visible(&self) -> bool {
        self.visibility().is_visible()
    }

    /// Receiver that is notified on every visibility change.
    pub fn watch_visibility(&self) -> watch::Receiver<BubbleVisibility> {
        self.visibility.clone()
    }
}

/// Builder for [`BubbleService`].
pub struct BubbleServiceBuilder {
    settings: BubbleSettings,
    surface: OverlaySurfaceRef,
    callbacks: Vec<VisibilityCallback>,
}

impl BubbleServiceBuilder {
    pub fn settings(mut self, settings: BubbleSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Register an observer for visibility changes.
    pub fn on_visibility_changed(mut self, callback: VisibilityCallback) -> Self {
        self.callbacks.push(callback);
        self
    }

    /// Spawn the service task. Must be called within a tokio runtime.
    ///
    /// Fails if the settings do not pass [`BubbleSettings::validate`].
    pub fn spawn(self) -> Result<BubbleService, SettingsError> {
        self.settings.validate()?;

        let (tx, rx) = mpsc::unbounded_channel();
        let (visibility_tx, visibility_rx) = watch::channel(BubbleVisibility::Hidden);
        let cancel_token = CancellationToken::new();

        let worker = Worker {
            machine: BubbleMachine::new(&self.settings),
            timer: DebounceTimer::new(),
            dispatcher: OverlayDispatcher::new(self.surface, self.settings.placement),
            visibility_tx,
            callbacks: self.callbacks,
        };

        tracing::info!(debounce = ?self.settings.debounce(), "starting bubble service");
        let task = tokio::spawn(worker.run(rx, cancel_token.child_token()));

        Ok(BubbleService {
            handle: BubbleHandle {
                tx,
                visibility: visibility_rx,
            },
            cancel_token,
            task: Some(task),
        })
    }
}

/// Running bubble controller.
///
/// All inputs and timer expiries are processed on one task, so the state
/// machine, the hide timer and the overlay are never touched concurrently.
/// Dropping the service stops the task; use [`shutdown`](Self::shutdown) to
/// wait for it.
pub struct BubbleService {
    handle: BubbleHandle,
    cancel_token: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl BubbleService {
    pub fn builder(surface: OverlaySurfaceRef) -> BubbleServiceBuilder {
        BubbleServiceBuilder {
            settings: BubbleSettings::default(),
            surface,
            callbacks: Vec::new(),
        }
    }

    /// Spawn with the given settings and no observers.
    pub fn spawn(
        settings: BubbleSettings,
        surface: OverlaySurfaceRef,
    ) -> Result<Self, SettingsError> {
        Self::builder(surface).settings(settings).spawn()
    }

    pub fn handle(&self) -> BubbleHandle {
        self.handle.clone()
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Stop the task and wait for it to finish.
    ///
    /// The outstanding hide timer is cancelled and the bubble is taken off
    /// screen before this returns.
    pub async fn shutdown(mut self) {
        self.cancel_token.cancel();

        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                tracing::warn!("bubble service task failed: {}", e);
            }
        }
    }
}

impl Drop for BubbleService {
    fn drop(&mut self) {
        self.cancel_token.cancel();
    }
}

struct Worker {
    machine: BubbleMachine,
    timer: DebounceTimer,
    dispatcher: OverlayDispatcher,
    visibility_tx: watch::Sender<BubbleVisibility>,
    callbacks: Vec<VisibilityCallback>,
}

impl Worker {
    async fn run(mut self, mut rx: mpsc::UnboundedReceiver<Request>, cancel: CancellationToken) {
        tracing::info!("bubble service started");

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    tracing::info!("bubble service cancelled");
                    break;
                }
                request = rx.recv() => {
                    let Some(request) = request else {
                        tracing::info!("all bubble handles dropped");
                        break;
                    };
                    let effects = match request {
                        Request::Event(event) => self.machine.on_event(&event),
                        Request::Action(action) => {
                            tracing::debug!(action = action.as_str(), "bubble action");
                            self.machine.on_action(action)
                        }
                    };
                    self.apply(effects);
                }
                handle = self.timer.expired() => {
                    tracing::debug!(?handle, "hide timer expired");
                    let effects = self.machine.on_hide_timer_expired();
                    self.apply(effects);
                }
            }
        }

        let effects = self.machine.shutdown();
        self.apply(effects);
        tracing::info!("bubble service stopped");
    }

    fn apply(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Overlay(command) => self.dispatcher.apply(command),
                Effect::ScheduleHide(delay) => {
                    let handle = self.timer.schedule(delay);
                    tracing::trace!(?handle, ?delay, "hide timer scheduled");
                }
                Effect::CancelHide => {
                    if let Some(handle) = self.timer.cancel_pending() {
                        tracing::trace!(?handle, "hide timer cancelled");
                    }
                }
                Effect::VisibilityChanged { visible, cause } => {
                    let visibility = if visible {
                        BubbleVisibility::Visible
                    } else {
                        BubbleVisibility::Hidden
                    };
                    self.visibility_tx.send_replace(visibility);

                    let event = VisibilityChanged::now(visible, cause);
                    tracing::info!(visible, cause = ?cause, "bubble visibility changed");
                    for callback in &self.callbacks {
                        callback(event.clone());
                    }
                }
            }
        }
    }
}
