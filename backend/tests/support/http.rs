//! In-process HTTP harness wiring the full request pipeline over in-memory
//! ports.

use std::sync::Arc;

use actix_web::dev::{Service, ServiceResponse};
use actix_web::{App, test as actix_test, web};
use chrono::{DateTime, TimeZone, Utc};
use tokio::task::JoinHandle;

use orders::Trace;
use orders::domain::{
    NotificationRelay, OrderRegistry, RelayConfig, RelayState, ShutdownCoordinator,
};
use orders::inbound::http::health::{HealthState, healthz, live, ready};
use orders::inbound::http::orders::{create_order, get_order};
use orders::inbound::http::state::HttpState;
use orders::inbound::http::validation::json_config;
use orders::test_support::{
    InMemoryOrderRepository, MutableClock, RecordingNotifier, SequentialOrderIdGenerator,
};

/// Fixed instant the harness clock starts at.
pub fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0)
        .single()
        .expect("valid timestamp")
}

/// Shared doubles plus the running relay behind an HTTP app.
pub struct Harness {
    pub repository: Arc<InMemoryOrderRepository>,
    pub clock: Arc<MutableClock>,
    pub notifier: Arc<RecordingNotifier>,
    pub health: web::Data<HealthState>,
    pub coordinator: ShutdownCoordinator,
    pub relay_task: JoinHandle<RelayState>,
    state: web::Data<HttpState>,
}

impl Harness {
    /// Build the doubles and spawn the relay. Must run inside a Tokio runtime.
    pub fn start() -> Self {
        let repository = Arc::new(InMemoryOrderRepository::new());
        let clock = Arc::new(MutableClock::new(epoch()));
        let notifier = Arc::new(RecordingNotifier::new());
        let coordinator = ShutdownCoordinator::new();
        let (relay, handle) = NotificationRelay::new(RelayConfig::default(), notifier.clone());
        let relay_task = relay.spawn(coordinator.signal());

        let registry = Arc::new(OrderRegistry::new(
            repository.clone(),
            Arc::new(SequentialOrderIdGenerator::default()),
            clock.clone(),
            handle,
        ));
        let state = web::Data::new(HttpState::new(registry.clone(), registry));
        let health = web::Data::new(HealthState::new());
        health.mark_ready();

        Self {
            repository,
            clock,
            notifier,
            health,
            coordinator,
            relay_task,
            state,
        }
    }

    /// Initialise the app with the same routes and middleware as the server.
    pub async fn service(
        &self,
    ) -> impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>
    {
        actix_test::init_service(
            App::new()
                .app_data(self.health.clone())
                .app_data(self.state.clone())
                .app_data(json_config())
                .wrap(Trace)
                .service(create_order)
                .service(get_order)
                .service(healthz)
                .service(ready)
                .service(live),
        )
        .await
    }
}
