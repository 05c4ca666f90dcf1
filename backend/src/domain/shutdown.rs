//! Process-wide cancellation shared by the HTTP server and background tasks.
//!
//! A single [`ShutdownCoordinator`] owns the sending side of a
//! `tokio::sync::watch` channel. Every long-lived task holds a
//! [`ShutdownSignal`] and stops once the coordinator triggers.

use tokio::sync::watch;

/// Owner of the shutdown flag.
#[derive(Debug)]
pub struct ShutdownCoordinator {
    sender: watch::Sender<bool>,
}

impl Default for ShutdownCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl ShutdownCoordinator {
    /// Create an untriggered coordinator.
    #[must_use]
    pub fn new() -> Self {
        let (sender, _receiver) = watch::channel(false);
        Self { sender }
    }

    /// Hand out a signal observing this coordinator.
    #[must_use]
    pub fn signal(&self) -> ShutdownSignal {
        ShutdownSignal {
            receiver: self.sender.subscribe(),
        }
    }

    /// Trigger shutdown. Repeated calls are no-ops.
    pub fn trigger(&self) {
        self.sender.send_if_modified(|triggered| {
            let changed = !*triggered;
            *triggered = true;
            changed
        });
    }

    /// True once shutdown has been requested.
    #[must_use]
    pub fn is_triggered(&self) -> bool {
        *self.sender.borrow()
    }
}

/// Observer side of the shutdown flag.
#[derive(Debug, Clone)]
pub struct ShutdownSignal {
    receiver: watch::Receiver<bool>,
}

impl ShutdownSignal {
    /// True once the coordinator has triggered. Does not wait.
    #[must_use]
    pub fn is_triggered(&self) -> bool {
        *self.receiver.borrow()
    }

    /// Resolve once shutdown has been triggered.
    ///
    /// Also resolves when the coordinator is dropped, since no trigger can
    /// arrive afterwards.
    pub async fn cancelled(&mut self) {
        // `wait_for` only errors when the sender is gone.
        let _ = self.receiver.wait_for(|triggered| *triggered).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn signal_resolves_after_trigger() {
        let coordinator = ShutdownCoordinator::new();
        let mut signal = coordinator.signal();
        assert!(!signal.is_triggered());

        coordinator.trigger();
        tokio::time::timeout(Duration::from_secs(1), signal.cancelled())
            .await
            .expect("signal resolves");
        assert!(signal.is_triggered());
    }

    #[tokio::test]
    async fn signals_taken_after_trigger_observe_it() {
        let coordinator = ShutdownCoordinator::new();
        coordinator.trigger();
        coordinator.trigger();
        assert!(coordinator.is_triggered());

        let mut late = coordinator.signal();
        assert!(late.is_triggered());
        late.cancelled().await;
    }

    #[tokio::test]
    async fn dropping_the_coordinator_releases_waiters() {
        let coordinator = ShutdownCoordinator::new();
        let mut signal = coordinator.signal();
        drop(coordinator);
        tokio::time::timeout(Duration::from_secs(1), signal.cancelled())
            .await
            .expect("waiter released");
    }

    #[tokio::test(start_paused = true)]
    async fn untriggered_signal_stays_pending() {
        let coordinator = ShutdownCoordinator::new();
        let mut signal = coordinator.signal();
        let waited = tokio::time::timeout(Duration::from_secs(5), signal.cancelled()).await;
        assert!(waited.is_err());
    }
}
