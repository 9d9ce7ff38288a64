//! Debounced value: follows its input only after the input has been quiet
//! for a fixed delay.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Delay applied to search input before it reaches the API.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// A value that lags behind its input by a quiet period.
///
/// The output starts equal to the initial input. Each [`set`](Self::set)
/// cancels the pending timer and starts a new one, so only the last value of
/// a burst is ever emitted. Dropping the `Debounced` cancels the pending
/// timer; nothing is emitted after teardown.
///
/// Timers are Tokio tasks, so this must be used inside a Tokio runtime.
pub struct Debounced<T> {
    output: Arc<watch::Sender<T>>,
    delay: Duration,
    pending: Option<JoinHandle<()>>,
}

impl<T> Debounced<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    pub fn new(initial: T, delay: Duration) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self {
            output: Arc::new(tx),
            delay,
            pending: None,
        }
    }

    /// Feeds a new input value, restarting the quiet-period timer.
    pub fn set(&mut self, value: T) {
        self.cancel_pending();
        let output = Arc::clone(&self.output);
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            output.send_if_modified(|current| {
                if *current == value {
                    return false;
                }
                *current = value;
                true
            });
        }));
    }

    /// The current debounced value.
    pub fn get(&self) -> T {
        self.output.borrow().clone()
    }

    /// Receiver notified each time the debounced value changes.
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.output.subscribe()
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Whether an input is waiting for its quiet period to elapse.
    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl<T> Drop for Debounced<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn initial_value_is_immediate() {
        let debounced = Debounced::new("initial".to_string(), Duration::from_millis(300));
        assert_eq!(debounced.get(), "initial");
        assert!(!debounced.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn emits_after_quiet_period() {
        let mut debounced = Debounced::new("initial".to_string(), Duration::from_millis(100));
        debounced.set("changed".to_string());
        assert_eq!(debounced.get(), "initial");

        tokio::time::sleep(Duration::from_millis(99)).await;
        assert_eq!(debounced.get(), "initial");

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(debounced.get(), "changed");
    }

    #[tokio::test(start_paused = true)]
    async fn burst_emits_only_last_value() {
        let mut debounced = Debounced::new(String::new(), Duration::from_millis(300));
        let mut rx = debounced.subscribe();

        for text in ["t", "to", "toy", "toyo", "toyota"] {
            debounced.set(text.to_string());
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        // 100ms after the last keystroke: still the initial value
        assert_eq!(debounced.get(), "");
        assert!(debounced.is_pending());

        tokio::time::sleep(Duration::from_millis(250)).await;
        assert_eq!(debounced.get(), "toyota");

        // exactly one notification for the whole burst
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), "toyota");
        assert!(!rx.has_changed().unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn drop_cancels_pending_timer() {
        let mut debounced = Debounced::new(1u32, Duration::from_millis(50));
        let mut rx = debounced.subscribe();
        debounced.set(2);
        drop(debounced);

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(*rx.borrow_and_update(), 1);
        // the sender is gone once the aborted timer releases it
        assert!(rx.changed().await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn setting_same_value_does_not_notify() {
        let mut debounced = Debounced::new(7u32, Duration::from_millis(10));
        let rx = debounced.subscribe();
        debounced.set(7);
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!rx.has_changed().unwrap());
    }
}
