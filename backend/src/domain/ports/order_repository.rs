//! Port abstraction for order persistence adapters and their errors.
//!
//! "No matching row" is reported as `Ok(None)` and never as an error, so the
//! registry can tell an absent order from a failing store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{CustomerName, ItemName, Order, OrderId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by order repository adapters.
    pub enum OrderRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "order repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "order repository query failed: {message}",
        /// Insert rejected because an order with the same identity or
        /// deduplication key already exists.
        Duplicate { message: String } => "order already exists: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Find the order stored under the deduplication key, if any.
    async fn find_matching(
        &self,
        customer_name: &CustomerName,
        item: &ItemName,
        created_at: DateTime<Utc>,
    ) -> Result<Option<Order>, OrderRepositoryError>;

    /// Persist a new order.
    async fn insert(&self, order: &Order) -> Result<(), OrderRepositoryError>;

    /// Fetch an order by identifier.
    async fn find_by_id(&self, id: &OrderId) -> Result<Option<Order>, OrderRepositoryError>;
}

/// Fixture repository that stores nothing and finds nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureOrderRepository;

#[async_trait]
impl OrderRepository for FixtureOrderRepository {
    async fn find_matching(
        &self,
        _customer_name: &CustomerName,
        _item: &ItemName,
        _created_at: DateTime<Utc>,
    ) -> Result<Option<Order>, OrderRepositoryError> {
        Ok(None)
    }

    async fn insert(&self, _order: &Order) -> Result<(), OrderRepositoryError> {
        Ok(())
    }

    async fn find_by_id(&self, _id: &OrderId) -> Result<Option<Order>, OrderRepositoryError> {
        Ok(None)
    }
}
