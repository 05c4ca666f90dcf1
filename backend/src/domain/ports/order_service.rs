//! Driving ports for order creation and lookup.
//!
//! Inbound adapters call [`OrderCommand`] and [`OrderQuery`] without knowing
//! how orders are stored or how creation side effects are dispatched.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{CustomerName, Error, ItemName, Order, OrderId};

/// Validated order creation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateOrderRequest {
    pub customer_name: CustomerName,
    pub item: ItemName,
}

/// Result of a creation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOrderOutcome {
    /// A new order was persisted.
    Created(Order),
    /// An order with the same deduplication key already existed.
    Existing(Order),
}

impl CreateOrderOutcome {
    /// The order carried by either variant.
    #[must_use]
    pub const fn order(&self) -> &Order {
        match self {
            Self::Created(order) | Self::Existing(order) => order,
        }
    }

    /// Consume the outcome, returning its order.
    #[must_use]
    pub fn into_order(self) -> Order {
        match self {
            Self::Created(order) | Self::Existing(order) => order,
        }
    }

    #[must_use]
    pub const fn is_created(&self) -> bool {
        matches!(self, Self::Created(_))
    }
}

/// Domain use-case port for creating orders.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderCommand: Send + Sync {
    /// Create an order, or return the stored order with the same
    /// `(customer_name, item, created_at)`.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] with code `InternalError` when storage fails.
    async fn create_order(&self, request: CreateOrderRequest) -> Result<CreateOrderOutcome, Error>;
}

/// Domain use-case port for reading orders.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderQuery: Send + Sync {
    /// Fetch an order by identifier.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when no order has the identifier and
    /// `InternalError` when storage fails.
    async fn get_order(&self, id: &OrderId) -> Result<Order, Error>;
}

/// Fixture command that echoes the request back as a freshly created order.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureOrderCommand;

#[async_trait]
impl OrderCommand for FixtureOrderCommand {
    async fn create_order(&self, request: CreateOrderRequest) -> Result<CreateOrderOutcome, Error> {
        Ok(CreateOrderOutcome::Created(Order::new(
            OrderId::random(),
            request.customer_name,
            request.item,
            DateTime::<Utc>::UNIX_EPOCH,
        )))
    }
}

/// Fixture query that never finds an order.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureOrderQuery;

#[async_trait]
impl OrderQuery for FixtureOrderQuery {
    async fn get_order(&self, id: &OrderId) -> Result<Order, Error> {
        Err(Error::not_found(format!("order {id} not found")))
    }
}
