//! Builders for HTTP state ports.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;

use orders::domain::OrderRegistry;
use orders::domain::ports::{FixtureOrderCommand, FixtureOrderQuery, RandomOrderIdGenerator};
use orders::inbound::http::state::HttpState;
use orders::outbound::persistence::DieselOrderRepository;

use super::ServerConfig;

/// Build handler state, backed by PostgreSQL when a pool is configured and by
/// fixtures otherwise.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let state = match &config.db_pool {
        Some(pool) => {
            let registry = Arc::new(OrderRegistry::new(
                Arc::new(DieselOrderRepository::new(pool.clone())),
                Arc::new(RandomOrderIdGenerator),
                Arc::new(DefaultClock),
                config.relay.clone(),
            ));
            HttpState::new(registry.clone(), registry)
        }
        None => HttpState::new(Arc::new(FixtureOrderCommand), Arc::new(FixtureOrderQuery)),
    };
    web::Data::new(state)
}
