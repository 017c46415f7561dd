use std::future::Future;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// Cancellable one-shot auto-advance.
///
/// Dropping the timer aborts it; `disarm` releases it without aborting, for
/// use from inside the task that the timer itself spawned.
#[derive(Debug)]
pub(crate) struct AdvanceTimer {
    handle: Option<JoinHandle<()>>,
}

impl AdvanceTimer {
    /// Run `on_fire` after `delay` on the current runtime.
    ///
    /// Returns `None` when called outside a Tokio runtime.
    pub(crate) fn schedule<F>(delay: Duration, on_fire: F) -> Option<Self>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let runtime = Handle::try_current().ok()?;
        let handle = runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            on_fire.await;
        });
        Some(Self {
            handle: Some(handle),
        })
    }

    pub(crate) fn disarm(mut self) {
        self.handle.take();
    }
}

impl Drop for AdvanceTimer {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counter_timer(fired: &Arc<AtomicUsize>) -> AdvanceTimer {
        let fired = Arc::clone(fired);
        AdvanceTimer::schedule(Duration::from_millis(1500), async move {
            fired.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn fires_after_delay() {
        let fired = Arc::new(AtomicUsize::new(0));
        let _timer = counter_timer(&fired);
        tokio::time::sleep(Duration::from_millis(1499)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn dropped_timer_never_fires() {
        let fired = Arc::new(AtomicUsize::new(0));
        drop(counter_timer(&fired));
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn disarmed_timer_still_fires() {
        let fired = Arc::new(AtomicUsize::new(0));
        counter_timer(&fired).disarm();
        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn no_runtime_means_no_timer() {
        assert!(AdvanceTimer::schedule(Duration::from_millis(1), async {}).is_none());
    }
}
