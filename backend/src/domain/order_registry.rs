//! Order creation and lookup orchestration.
//!
//! [`OrderRegistry`] implements the [`OrderCommand`] and [`OrderQuery`]
//! driving ports. Creation is idempotent over
//! `(customer_name, item, created_at)`: a stored match is returned as
//! [`CreateOrderOutcome::Existing`] and nothing new is written. A unique-key
//! violation on insert means a concurrent identical request won the race, so
//! the lookup is repeated and the winner returned.
//!
//! `created_at` is a server clock reading, so two identical requests only
//! deduplicate when they observe the same instant.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockable::Clock;
use tracing::{error, info};

use super::ports::{
    CreateOrderOutcome, CreateOrderRequest, OrderCommand, OrderIdGenerator, OrderQuery,
    OrderRepository, OrderRepositoryError,
};
use super::{Error, Order, OrderCreatedEvent, OrderId, RelayHandle, storage_timestamp};

/// Concrete implementation of the order driving ports.
pub struct OrderRegistry<R, G> {
    repository: Arc<R>,
    id_generator: Arc<G>,
    clock: Arc<dyn Clock>,
    relay: RelayHandle,
}

impl<R, G> Clone for OrderRegistry<R, G> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            id_generator: Arc::clone(&self.id_generator),
            clock: Arc::clone(&self.clock),
            relay: self.relay.clone(),
        }
    }
}

impl<R, G> OrderRegistry<R, G>
where
    R: OrderRepository,
    G: OrderIdGenerator,
{
    /// Build a registry over its ports. Created orders are announced through `relay`.
    pub fn new(
        repository: Arc<R>,
        id_generator: Arc<G>,
        clock: Arc<dyn Clock>,
        relay: RelayHandle,
    ) -> Self {
        Self {
            repository,
            id_generator,
            clock,
            relay,
        }
    }

    async fn find_matching(
        &self,
        request: &CreateOrderRequest,
        created_at: DateTime<Utc>,
    ) -> Result<Option<Order>, Error> {
        self.repository
            .find_matching(&request.customer_name, &request.item, created_at)
            .await
            .map_err(|err| {
                error!(
                    operation = "find_matching",
                    customer_name = %request.customer_name,
                    item = %request.item,
                    %created_at,
                    error = %err,
                    "order lookup failed"
                );
                map_repository_error(err)
            })
    }

    /// Resolve a unique-key violation by returning the order that won.
    async fn handle_duplicate_key_race(
        &self,
        request: &CreateOrderRequest,
        created_at: DateTime<Utc>,
    ) -> Result<CreateOrderOutcome, Error> {
        match self.find_matching(request, created_at).await? {
            Some(existing) => {
                info!(order_id = %existing.id(), "concurrent create resolved to existing order");
                Ok(CreateOrderOutcome::Existing(existing))
            }
            None => {
                error!(
                    operation = "insert",
                    customer_name = %request.customer_name,
                    item = %request.item,
                    %created_at,
                    "duplicate insert but no matching order found"
                );
                Err(Error::internal(
                    "order disappeared during duplicate resolution",
                ))
            }
        }
    }
}

/// Map repository errors to domain errors.
fn map_repository_error(error: OrderRepositoryError) -> Error {
    match error {
        OrderRepositoryError::Connection { message } => {
            Error::internal(format!("order store unavailable: {message}"))
        }
        OrderRepositoryError::Query { message } => {
            Error::internal(format!("order store error: {message}"))
        }
        OrderRepositoryError::Duplicate { message } => {
            Error::internal(format!("unexpected duplicate order: {message}"))
        }
    }
}

#[async_trait]
impl<R, G> OrderCommand for OrderRegistry<R, G>
where
    R: OrderRepository,
    G: OrderIdGenerator,
{
    async fn create_order(&self, request: CreateOrderRequest) -> Result<CreateOrderOutcome, Error> {
        let created_at = storage_timestamp(self.clock.utc());

        if let Some(existing) = self.find_matching(&request, created_at).await? {
            info!(order_id = %existing.id(), "returning existing order");
            return Ok(CreateOrderOutcome::Existing(existing));
        }

        let order = Order::new(
            self.id_generator.next_id(),
            request.customer_name.clone(),
            request.item.clone(),
            created_at,
        );
        match self.repository.insert(&order).await {
            Ok(()) => {}
            Err(OrderRepositoryError::Duplicate { .. }) => {
                return self.handle_duplicate_key_race(&request, created_at).await;
            }
            Err(err) => {
                error!(
                    operation = "insert",
                    order_id = %order.id(),
                    customer_name = %order.customer_name(),
                    item = %order.item(),
                    created_at = %order.created_at(),
                    error = %err,
                    "order insert failed"
                );
                return Err(map_repository_error(err));
            }
        }

        info!(order_id = %order.id(), "order created");
        self.relay.submit(OrderCreatedEvent::new(order.clone())).await;
        Ok(CreateOrderOutcome::Created(order))
    }
}

#[async_trait]
impl<R, G> OrderQuery for OrderRegistry<R, G>
where
    R: OrderRepository,
    G: OrderIdGenerator,
{
    async fn get_order(&self, id: &OrderId) -> Result<Order, Error> {
        match self.repository.find_by_id(id).await {
            Ok(Some(order)) => Ok(order),
            Ok(None) => Err(Error::not_found(format!("order {id} not found"))),
            Err(err) => {
                error!(operation = "find_by_id", order_id = %id, error = %err, "order fetch failed");
                Err(map_repository_error(err))
            }
        }
    }
}
