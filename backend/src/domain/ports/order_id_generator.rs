//! Port for minting order identifiers.

use crate::domain::OrderId;

/// Source of fresh order identifiers.
#[cfg_attr(test, mockall::automock)]
pub trait OrderIdGenerator: Send + Sync {
    /// Produce an identifier not previously handed out.
    fn next_id(&self) -> OrderId;
}

/// Production generator backed by UUID v4.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomOrderIdGenerator;

impl OrderIdGenerator for RandomOrderIdGenerator {
    fn next_id(&self) -> OrderId {
        OrderId::random()
    }
}
