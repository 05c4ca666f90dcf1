//! Asynchronous hand-off of order-created events.
//!
//! The registry submits events through a cloneable [`RelayHandle`]; a single
//! consumer task owned by [`NotificationRelay`] dequeues them in FIFO order
//! and passes each one to an [`OrderCreatedNotifier`]. Delivery is
//! at-most-once: a full queue, a stopped relay, or a failing notifier all
//! drop the event with a log record and nothing is retried.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::{self, error::SendTimeoutError};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::ports::OrderCreatedNotifier;
use super::{OrderCreatedEvent, ShutdownSignal, TraceId};

/// Default number of events buffered between producers and the consumer.
pub const DEFAULT_QUEUE_CAPACITY: usize = 100;
/// Default time a producer waits for queue space before dropping an event.
pub const DEFAULT_SUBMIT_TIMEOUT: Duration = Duration::from_millis(500);

/// Queue sizing and back-pressure settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelayConfig {
    capacity: usize,
    submit_timeout: Duration,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_QUEUE_CAPACITY,
            submit_timeout: DEFAULT_SUBMIT_TIMEOUT,
        }
    }
}

impl RelayConfig {
    /// Override the queue capacity. Zero is raised to one.
    #[must_use]
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity.max(1);
        self
    }

    /// Override how long a submission may wait for queue space.
    #[must_use]
    pub const fn with_submit_timeout(mut self, submit_timeout: Duration) -> Self {
        self.submit_timeout = submit_timeout;
        self
    }

    /// Maximum number of events buffered ahead of the notifier.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// How long `submit` waits for a free slot before dropping the event.
    #[must_use]
    pub const fn submit_timeout(&self) -> Duration {
        self.submit_timeout
    }
}

/// Lifecycle of the consumer task. `Stopped` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayState {
    /// Consuming events.
    Running,
    /// Shut down; remaining queued events were discarded.
    Stopped,
}

/// What happened to a submitted event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The event is queued for the consumer.
    Enqueued,
    /// The queue stayed full past the submit timeout.
    DroppedFull,
    /// The consumer has stopped.
    DroppedClosed,
}

/// Producer side of the relay queue.
#[derive(Debug, Clone)]
pub struct RelayHandle {
    sender: mpsc::Sender<OrderCreatedEvent>,
    submit_timeout: Duration,
}

impl RelayHandle {
    /// Queue an event, waiting at most the configured submit timeout.
    ///
    /// Never fails: undeliverable events are dropped with a warning.
    pub async fn submit(&self, event: OrderCreatedEvent) -> SubmitOutcome {
        let order_id = *event.order().id();
        match self.sender.send_timeout(event, self.submit_timeout).await {
            Ok(()) => {
                debug!(%order_id, "order created event queued");
                SubmitOutcome::Enqueued
            }
            Err(SendTimeoutError::Timeout(_)) => {
                warn!(
                    %order_id,
                    timeout_ms = self.submit_timeout.as_millis(),
                    "notification queue full; dropping order created event"
                );
                SubmitOutcome::DroppedFull
            }
            Err(SendTimeoutError::Closed(_)) => {
                warn!(%order_id, "notification relay stopped; dropping order created event");
                SubmitOutcome::DroppedClosed
            }
        }
    }

    /// Whether the consumer side has gone away.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

/// Consumer side of the relay queue.
pub struct NotificationRelay {
    receiver: mpsc::Receiver<OrderCreatedEvent>,
    notifier: Arc<dyn OrderCreatedNotifier>,
    capacity: usize,
}

impl std::fmt::Debug for NotificationRelay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationRelay")
            .field("capacity", &self.capacity)
            .field("pending", &self.receiver.len())
            .finish_non_exhaustive()
    }
}

impl NotificationRelay {
    /// Create the relay and its producer handle.
    #[must_use]
    pub fn new(config: RelayConfig, notifier: Arc<dyn OrderCreatedNotifier>) -> (Self, RelayHandle) {
        let (sender, receiver) = mpsc::channel(config.capacity);
        let relay = Self {
            receiver,
            notifier,
            capacity: config.capacity,
        };
        let handle = RelayHandle {
            sender,
            submit_timeout: config.submit_timeout,
        };
        (relay, handle)
    }

    /// Start the consumer task.
    ///
    /// Consumes the relay, so it can only be started once. The task resolves
    /// to [`RelayState::Stopped`] after `shutdown` fires.
    #[must_use = "the join handle reports when the relay has stopped"]
    pub fn spawn(self, shutdown: ShutdownSignal) -> JoinHandle<RelayState> {
        tokio::spawn(self.run(shutdown))
    }

    /// Consume events until shutdown.
    ///
    /// Shutdown wins over pending events; anything still queued is discarded.
    /// The loop also ends when every [`RelayHandle`] has been dropped and the
    /// queue is empty.
    pub async fn run(mut self, mut shutdown: ShutdownSignal) -> RelayState {
        info!(capacity = self.capacity, state = ?RelayState::Running, "notification relay started");
        loop {
            tokio::select! {
                biased;
                () = shutdown.cancelled() => {
                    let discarded = self.receiver.len();
                    info!(discarded, "notification relay received shutdown");
                    break;
                }
                next = self.receiver.recv() => match next {
                    Some(event) => {
                        let order_id = *event.order().id();
                        tokio::select! {
                            biased;
                            () = shutdown.cancelled() => {
                                warn!(%order_id, "shutdown interrupted order notification");
                                break;
                            }
                            () = self.dispatch(event) => {}
                        }
                    }
                    None => {
                        info!("all relay handles dropped");
                        break;
                    }
                },
            }
        }
        self.receiver.close();
        info!(state = ?RelayState::Stopped, "notification relay stopped");
        RelayState::Stopped
    }

    async fn dispatch(&self, event: OrderCreatedEvent) {
        let notify = self.notifier.notify(&event);
        let result = match event.trace_id() {
            Some(trace_id) => TraceId::scope(trace_id, notify).await,
            None => notify.await,
        };
        if let Err(error) = result {
            warn!(
                order_id = %event.order().id(),
                trace_id = ?event.trace_id().map(|id| id.to_string()),
                %error,
                "order notification failed"
            );
        }
    }

    /// Pull whatever is queued without running the consumer loop.
    #[cfg(test)]
    pub(crate) fn drain_pending(&mut self) -> Vec<OrderCreatedEvent> {
        let mut drained = Vec::new();
        while let Ok(event) = self.receiver.try_recv() {
            drained.push(event);
        }
        drained
    }
}
