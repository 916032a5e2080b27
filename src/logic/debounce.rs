use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Cancel-and-reschedule timer.
///
/// Each `schedule` call aborts whatever was pending and starts a new quiet
/// period; the action only runs if nothing else is scheduled before it ends.
#[derive(Debug, Default)]
pub struct Debouncer {
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule<Fut>(&mut self, quiet: Duration, action: Fut)
    where
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.cancel();
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(quiet).await;
            action.await;
        }));
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[tokio::test(start_paused = true)]
    async fn test_only_last_edit_fires_after_quiet_period() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut debouncer = Debouncer::new();
        let quiet = Duration::from_millis(500);

        for text in ["A", "Al", "Ali"] {
            let tx = tx.clone();
            debouncer.schedule(quiet, async move {
                let _ = tx.send(text);
            });
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        assert!(rx.try_recv().is_err());
        assert!(debouncer.is_pending());

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(rx.recv().await, Some("Ali"));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_drops_pending_action() {
        let (tx, mut rx) = mpsc::unbounded_channel::<()>();
        let mut debouncer = Debouncer::new();
        debouncer.schedule(Duration::from_millis(500), async move {
            let _ = tx.send(());
        });
        debouncer.cancel();
        assert!(!debouncer.is_pending());

        tokio::time::sleep(Duration::from_secs(1)).await;
        // sender was dropped with the aborted task
        assert_eq!(rx.recv().await, None);
    }
}
