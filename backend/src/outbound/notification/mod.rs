//! Notification adapters for order-created events.
//!
//! The default adapter writes one structured log record per event. It stands
//! in for a downstream consumer such as a mail sender or message bus.

use async_trait::async_trait;
use tracing::info;

use crate::domain::OrderCreatedEvent;
use crate::domain::ports::{OrderCreatedNotifier, OrderNotifierError};

/// Notifier emitting a structured `tracing` record for each new order.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingOrderNotifier;

#[async_trait]
impl OrderCreatedNotifier for TracingOrderNotifier {
    async fn notify(&self, event: &OrderCreatedEvent) -> Result<(), OrderNotifierError> {
        let order = event.order();
        let trace_id = event.trace_id().map(|id| id.to_string());
        info!(
            target: "orders::notifications",
            order_id = %order.id(),
            customer_name = %order.customer_name(),
            item = %order.item(),
            created_at = %order.created_at(),
            trace_id = trace_id.as_deref(),
            "order created notification"
        );
        Ok(())
    }
}
