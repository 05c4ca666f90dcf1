//! In-memory doubles for the order ports.

use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Notify;
use uuid::Uuid;

use crate::domain::ports::{
    OrderCreatedNotifier, OrderIdGenerator, OrderNotifierError, OrderRepository,
    OrderRepositoryError,
};
use crate::domain::{CustomerName, ItemName, Order, OrderCreatedEvent, OrderId};

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

/// Order repository backed by a vector, enforcing the same uniqueness rules
/// as the database schema.
#[derive(Debug, Default)]
pub struct InMemoryOrderRepository {
    orders: Mutex<Vec<Order>>,
    failure: Mutex<Option<OrderRepositoryError>>,
}

impl InMemoryOrderRepository {
    /// Empty repository with no injected failure.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store, bypassing uniqueness checks.
    pub fn with_orders(orders: impl IntoIterator<Item = Order>) -> Self {
        let repo = Self::default();
        lock(&repo.orders).extend(orders);
        repo
    }

    /// Make every subsequent call fail with `error` until cleared.
    pub fn fail_with(&self, error: OrderRepositoryError) {
        *lock(&self.failure) = Some(error);
    }

    /// Let subsequent calls succeed again.
    pub fn clear_failure(&self) {
        *lock(&self.failure) = None;
    }

    /// Snapshot of every stored order in insertion order.
    pub fn orders(&self) -> Vec<Order> {
        lock(&self.orders).clone()
    }

    fn check_failure(&self) -> Result<(), OrderRepositoryError> {
        match lock(&self.failure).as_ref() {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn find_matching(
        &self,
        customer_name: &CustomerName,
        item: &ItemName,
        created_at: DateTime<Utc>,
    ) -> Result<Option<Order>, OrderRepositoryError> {
        self.check_failure()?;
        Ok(lock(&self.orders)
            .iter()
            .find(|order| {
                order.customer_name() == customer_name
                    && order.item() == item
                    && order.created_at() == created_at
            })
            .cloned())
    }

    async fn insert(&self, order: &Order) -> Result<(), OrderRepositoryError> {
        self.check_failure()?;
        let mut orders = lock(&self.orders);
        let clash = orders.iter().any(|stored| {
            stored.id() == order.id()
                || (stored.customer_name() == order.customer_name()
                    && stored.item() == order.item()
                    && stored.created_at() == order.created_at())
        });
        if clash {
            return Err(OrderRepositoryError::duplicate(format!(
                "order {} clashes with a stored order",
                order.id()
            )));
        }
        orders.push(order.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &OrderId) -> Result<Option<Order>, OrderRepositoryError> {
        self.check_failure()?;
        Ok(lock(&self.orders)
            .iter()
            .find(|order| order.id() == id)
            .cloned())
    }
}

/// Deterministic identifiers counting up from one.
#[derive(Debug, Default)]
pub struct SequentialOrderIdGenerator {
    next: AtomicU64,
}

impl OrderIdGenerator for SequentialOrderIdGenerator {
    fn next_id(&self) -> OrderId {
        let value = self.next.fetch_add(1, Ordering::Relaxed) + 1;
        OrderId::from_uuid(Uuid::from_u128(u128::from(value)))
    }
}

/// Notifier remembering every event it receives.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    events: Mutex<Vec<OrderCreatedEvent>>,
    failing: bool,
    delivered: Notify,
}

impl RecordingNotifier {
    /// Notifier that records events and never fails.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record events but report every delivery as failed.
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    /// Events delivered so far, oldest first.
    pub fn events(&self) -> Vec<OrderCreatedEvent> {
        lock(&self.events).clone()
    }

    /// Wait until at least `count` events have been recorded.
    pub async fn wait_for(&self, count: usize) {
        loop {
            let notified = self.delivered.notified();
            if lock(&self.events).len() >= count {
                return;
            }
            notified.await;
        }
    }
}

#[async_trait]
impl OrderCreatedNotifier for RecordingNotifier {
    async fn notify(&self, event: &OrderCreatedEvent) -> Result<(), OrderNotifierError> {
        lock(&self.events).push(event.clone());
        self.delivered.notify_waiters();
        if self.failing {
            return Err(OrderNotifierError::delivery("recording notifier set to fail"));
        }
        Ok(())
    }
}
