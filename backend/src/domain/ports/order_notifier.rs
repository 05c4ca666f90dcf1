//! Port for the side effect performed when an order is created.
//!
//! The notification relay hands every dequeued event to an
//! [`OrderCreatedNotifier`]. Failures are logged by the relay and never
//! retried.

use async_trait::async_trait;

use crate::domain::OrderCreatedEvent;

use super::define_port_error;

define_port_error! {
    /// Errors raised while delivering an order-created notification.
    pub enum OrderNotifierError {
        /// The downstream consumer rejected or could not receive the event.
        Delivery { message: String } => "order notification failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderCreatedNotifier: Send + Sync {
    /// Handle a single order-created event.
    async fn notify(&self, event: &OrderCreatedEvent) -> Result<(), OrderNotifierError>;
}

/// Fixture notifier that accepts and ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureOrderNotifier;

#[async_trait]
impl OrderCreatedNotifier for FixtureOrderNotifier {
    async fn notify(&self, _event: &OrderCreatedEvent) -> Result<(), OrderNotifierError> {
        Ok(())
    }
}
