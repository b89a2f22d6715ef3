//! Single-slot cancellable hide timer.

use std::time::Duration;
use tokio::time::Instant;

/// Identifies one scheduled expiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

/// A timer with at most one outstanding deadline.
///
/// Scheduling replaces the previous deadline, so only the most recent
/// schedule can ever expire. Owned by the service task and polled through
/// [`expired`](Self::expired) inside its `select!`.
#[derive(Debug, Default)]
pub struct DebounceTimer {
    next_id: u64,
    pending: Option<(TimerHandle, Instant)>,
}

impl DebounceTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule an expiry `delay` from now, replacing any outstanding one.
    pub fn schedule(&mut self, delay: Duration) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;

        if let Some((replaced, _)) = self.pending.replace((handle, Instant::now() + delay)) {
            tracing::trace!(?replaced, ?handle, "hide timer replaced");
        }
        handle
    }

    /// Cancel a scheduled expiry.
    ///
    /// Safe to call with a handle that already expired or was replaced;
    /// returns whether anything was cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        match self.pending {
            Some((current, _)) if current == handle => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }

    /// Cancel whatever is outstanding.
    pub fn cancel_pending(&mut self) -> Option<TimerHandle> {
        self.pending.take().map(|(handle, _)| handle)
    }

    pub fn pending(&self) -> Option<TimerHandle> {
        self.pending.map(|(handle, _)| handle)
    }

    /// Wait for the outstanding deadline and return its handle.
    ///
    /// Never resolves while nothing is scheduled. Cancel-safe: dropping the
    /// future before it resolves leaves the schedule untouched.
    pub async fn expired(&mut self) -> TimerHandle {
        match self.pending {
            Some((handle, deadline)) => {
                tokio::time::sleep_until(deadline).await;
                self.pending = None;
                handle
            }
            None => std::future::pending().await,
        }
    }
}
