use super::Location;
use crate::timer::DelayedTask;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Wait before looking up an anchor, so the new page is laid out first
pub const ANCHOR_DELAY: Duration = Duration::from_millis(100);

/// What the restorer needs from the view it scrolls
pub trait ScrollHost: Send + Sync + 'static {
    /// Row of the element carrying this anchor id, if it exists
    fn find_anchor(&self, id: &str) -> Option<usize>;

    /// Smoothly bring `row` into view
    fn scroll_into_view(&self, row: usize);

    /// Jump to the top, no animation
    fn scroll_to_origin(&self);
}

/// Scroll restoration on route changes
///
/// A background task subscribed to the router. On every location change:
/// - with an anchor: after [`ANCHOR_DELAY`], find the anchor and smoothly
///   scroll to it. A missing anchor is silently ignored.
/// - without one: scroll to the origin immediately.
///
/// A newer change cancels a lookup that has not fired yet. Dropping the
/// restorer unsubscribes and cancels any pending lookup.
#[derive(Debug)]
pub struct ScrollRestorer {
    handle: JoinHandle<()>,
}

impl ScrollRestorer {
    /// Start restoring. The current location is applied once on start.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(mut rx: watch::Receiver<Location>, host: Arc<dyn ScrollHost>) -> Self {
        let handle = tokio::spawn(async move {
            let initial = rx.borrow_and_update().clone();
            let mut pending = restore(&initial, &host);

            while rx.changed().await.is_ok() {
                let location = rx.borrow_and_update().clone();
                if let Some(stale) = pending.take() {
                    stale.cancel();
                }
                pending = restore(&location, &host);
            }
            tracing::debug!("Router gone, scroll restorer stopping");
        });
        Self { handle }
    }

    #[cfg(test)]
    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }
}

impl Drop for ScrollRestorer {
    fn drop(&mut self) {
        // Dropping the task future drops its pending DelayedTask as well
        self.handle.abort();
    }
}

fn restore(location: &Location, host: &Arc<dyn ScrollHost>) -> Option<DelayedTask> {
    let Some(anchor) = location.anchor.clone() else {
        tracing::trace!("Restore {}: scroll to origin", location);
        host.scroll_to_origin();
        return None;
    };

    let host = Arc::clone(host);
    Some(DelayedTask::spawn(ANCHOR_DELAY, move || {
        match host.find_anchor(&anchor) {
            Some(row) => {
                tracing::trace!("Anchor #{} at row {}", anchor, row);
                host.scroll_into_view(row);
            }
            None => tracing::debug!("Anchor #{} not found", anchor),
        }
    }))
}
