//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod order_id_generator;
mod order_notifier;
mod order_repository;
mod order_service;

#[cfg(test)]
pub use order_id_generator::MockOrderIdGenerator;
pub use order_id_generator::{OrderIdGenerator, RandomOrderIdGenerator};
#[cfg(test)]
pub use order_notifier::MockOrderCreatedNotifier;
pub use order_notifier::{FixtureOrderNotifier, OrderCreatedNotifier, OrderNotifierError};
#[cfg(test)]
pub use order_repository::MockOrderRepository;
pub use order_repository::{FixtureOrderRepository, OrderRepository, OrderRepositoryError};
#[cfg(test)]
pub use order_service::{MockOrderCommand, MockOrderQuery};
pub use order_service::{
    CreateOrderOutcome, CreateOrderRequest, FixtureOrderCommand, FixtureOrderQuery, OrderCommand,
    OrderQuery,
};
