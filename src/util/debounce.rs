use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Coalesces rapid inputs: only the last value pushed within `delay` is
/// emitted. Dropping the debouncer cancels a pending emission.
pub struct Debouncer<T> {
    delay: Duration,
    tx: mpsc::UnboundedSender<T>,
    pending: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn new(delay: Duration) -> (Self, mpsc::UnboundedReceiver<T>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                delay,
                tx,
                pending: None,
            },
            rx,
        )
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Restart the timer with `value` as the candidate emission.
    /// Must be called inside a tokio runtime.
    pub fn push(&mut self, value: T) {
        self.cancel();
        let tx = self.tx.clone();
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // The receiver may be gone; nothing is waiting then.
            let _ = tx.send(value);
        }));
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl<T> Drop for Debouncer<T> {
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
    async fn rapid_inputs_emit_once() {
        let (mut debouncer, mut rx) = Debouncer::new(Duration::from_millis(500));
        debouncer.push("h".to_string());
        tokio::time::sleep(Duration::from_millis(100)).await;
        debouncer.push("he".to_string());
        tokio::time::sleep(Duration::from_millis(100)).await;
        debouncer.push("hello".to_string());

        assert_eq!(rx.recv().await.as_deref(), Some("hello"));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn emits_only_after_the_full_delay() {
        let (mut debouncer, mut rx) = Debouncer::new(Duration::from_millis(500));
        debouncer.push(1);
        tokio::time::sleep(Duration::from_millis(499)).await;
        assert!(rx.try_recv().is_err());
        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(rx.try_recv().ok(), Some(1));
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_cancels_pending_emission() {
        let (mut debouncer, mut rx) = Debouncer::new(Duration::from_millis(500));
        debouncer.push(1);
        drop(debouncer);
        assert_eq!(rx.recv().await, None);
    }
}
