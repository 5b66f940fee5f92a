//! Copy confirmation: a two-state timed flag
//!
//! `Idle --trigger--> Confirmed --(window elapsed)--> Idle`
//!
//! Triggering while Confirmed restarts the window. The reset runs on a
//! [`DelayedTask`] that only holds a weak reference plus the generation it
//! was scheduled for, so a stale or orphaned reset can never flip the flag.

use crate::timer::DelayedTask;
use std::sync::{Arc, Mutex, MutexGuard, Weak};
use std::time::Duration;

/// How long the "copied" glyph stays up after a copy
pub const COPY_FEEDBACK: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConfirmState {
    #[default]
    Idle,
    Confirmed,
}

#[derive(Debug, Default)]
struct Inner {
    state: ConfirmState,
    /// Bumped on every trigger; a reset only applies to its own generation
    generation: u64,
}

fn lock(inner: &Mutex<Inner>) -> MutexGuard<'_, Inner> {
    inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Transient "copied" flag owned by one code block
#[derive(Debug)]
pub struct CopyConfirmation {
    inner: Arc<Mutex<Inner>>,
    /// Pending reset; dropping it with `self` cancels it
    reset: Option<DelayedTask>,
    window: Duration,
}

impl CopyConfirmation {
    pub fn new() -> Self {
        Self::with_window(COPY_FEEDBACK)
    }

    pub fn with_window(window: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner::default())),
            reset: None,
            window,
        }
    }

    /// Enter Confirmed now and (re)start the reset window
    ///
    /// Must be called from within a tokio runtime.
    pub fn trigger(&mut self) {
        let generation = {
            let mut inner = lock(&self.inner);
            inner.state = ConfirmState::Confirmed;
            inner.generation += 1;
            inner.generation
        };

        if let Some(previous) = self.reset.take() {
            previous.cancel();
        }

        let weak: Weak<Mutex<Inner>> = Arc::downgrade(&self.inner);
        self.reset = Some(DelayedTask::spawn(self.window, move || {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            let mut inner = lock(&inner);
            if inner.generation == generation {
                inner.state = ConfirmState::Idle;
            }
        }));
    }

    pub fn state(&self) -> ConfirmState {
        lock(&self.inner).state
    }

    pub fn is_confirmed(&self) -> bool {
        self.state() == ConfirmState::Confirmed
    }

    /// Whether a reset is scheduled and has not fired yet
    #[cfg(test)]
    pub fn has_pending_reset(&self) -> bool {
        self.reset.as_ref().is_some_and(DelayedTask::is_pending)
    }

    #[cfg(test)]
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Weak handle to the shared flag, for checking teardown
    #[cfg(test)]
    pub fn downgrade(&self) -> Weak<impl Sized> {
        Arc::downgrade(&self.inner)
    }
}

impl Default for CopyConfirmation {
    fn default() -> Self {
        Self::new()
    }
}
