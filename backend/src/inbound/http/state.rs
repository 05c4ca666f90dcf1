//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{OrderCommand, OrderQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub orders: Arc<dyn OrderCommand>,
    pub orders_query: Arc<dyn OrderQuery>,
}

impl HttpState {
    /// Construct state from the order driving ports.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use orders::domain::ports::{FixtureOrderCommand, FixtureOrderQuery};
    /// use orders::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::new(Arc::new(FixtureOrderCommand), Arc::new(FixtureOrderQuery));
    /// let _orders = state.orders.clone();
    /// ```
    pub fn new(orders: Arc<dyn OrderCommand>, orders_query: Arc<dyn OrderQuery>) -> Self {
        Self {
            orders,
            orders_query,
        }
    }
}
