//! Deferred one-shot tasks on the tokio timer
//!
//! The copy confirmation reset and the anchor scroll lookup both run "a bit
//! later". They share this handle so the owner can cancel the pending work
//! when it is superseded or torn down.

use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// A closure scheduled to run once after a fixed delay
///
/// Dropping the handle cancels the task if it has not fired yet, so a
/// component that owns a `DelayedTask` never gets called back after it is gone.
#[derive(Debug)]
pub struct DelayedTask {
    handle: JoinHandle<()>,
}

impl DelayedTask {
    /// Schedule `f` to run `delay` from now
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn<F>(delay: Duration, f: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        // Deadline is fixed at scheduling time, not at first poll
        let deadline = Instant::now() + delay;
        let handle = tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            f();
        });
        Self { handle }
    }

    /// Cancel the task. No-op if it already fired.
    pub fn cancel(&self) {
        self.handle.abort();
    }

    /// Whether the task is still waiting to fire
    #[cfg(test)]
    pub fn is_pending(&self) -> bool {
        !self.handle.is_finished()
    }
}

impl Drop for DelayedTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn counter() -> (Arc<AtomicUsize>, impl FnOnce() + Send + 'static) {
        let hits = Arc::new(AtomicUsize::new(0));
        let inner = Arc::clone(&hits);
        (hits, move || {
            inner.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[tokio::test(start_paused = true)]
    async fn fires_after_delay() {
        let (hits, f) = counter();
        let task = DelayedTask::spawn(Duration::from_millis(100), f);

        tokio::time::sleep(Duration::from_millis(99)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 0);
        assert!(task.is_pending());

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert!(!task.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_prevents_firing() {
        let (hits, f) = counter();
        let task = DelayedTask::spawn(Duration::from_millis(100), f);
        task.cancel();

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn drop_cancels() {
        let (hits, f) = counter();
        drop(DelayedTask::spawn(Duration::from_millis(100), f));

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_after_fire_is_harmless() {
        let (hits, f) = counter();
        let task = DelayedTask::spawn(Duration::from_millis(10), f);

        tokio::time::sleep(Duration::from_millis(20)).await;
        task.cancel();
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }
}
