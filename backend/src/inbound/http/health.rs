//! Health endpoints: liveness and readiness probes for orchestration and load
//! balancers, plus the `/healthz` status document.
use actix_web::{HttpResponse, get, http::header, web};
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use utoipa::ToSchema;

/// Shared health state for readiness and liveness checks.
pub struct HealthState {
    ready: AtomicBool,
    live: AtomicBool,
}

impl Default for HealthState {
    fn default() -> Self {
        Self {
            ready: AtomicBool::new(false),
            live: AtomicBool::new(true),
        }
    }
}

impl HealthState {
    /// Create a new health state starting as not ready but live.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the service as ready.
    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    /// Flag the service as draining so probes fail fast during shutdown.
    pub fn mark_unhealthy(&self) {
        self.live.store(false, Ordering::Release);
        self.ready.store(false, Ordering::Release);
    }

    /// Whether the readiness probe currently reports ready.
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    /// When false, liveness probes emit 503 to trigger restarts.
    pub fn is_alive(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }

    fn probe_response(probe_ok: bool) -> HttpResponse {
        Self::status_builder(probe_ok).finish()
    }

    fn status_builder(probe_ok: bool) -> actix_web::HttpResponseBuilder {
        let mut response = if probe_ok {
            HttpResponse::Ok()
        } else {
            HttpResponse::ServiceUnavailable()
        };
        response.insert_header((header::CACHE_CONTROL, "no-store"));
        response
    }
}

/// Body returned by `/healthz`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct HealthStatusBody {
    #[schema(example = "ok")]
    pub status: String,
}

/// Service status. Returns `{"status":"ok"}` while alive and
/// `{"status":"draining"}` with 503 once shutdown has begun.
#[utoipa::path(
    get,
    path = "/healthz",
    tags = ["health"],
    responses(
        (status = 200, description = "Service is healthy", body = HealthStatusBody),
        (status = 503, description = "Service is shutting down", body = HealthStatusBody)
    )
)]
#[get("/healthz")]
pub async fn healthz(state: web::Data<HealthState>) -> HttpResponse {
    let alive = state.is_alive();
    let status = if alive { "ok" } else { "draining" };
    HealthState::status_builder(alive).json(HealthStatusBody {
        status: status.to_owned(),
    })
}

/// Readiness probe. Return 200 once the database is reachable and the relay is
/// running; return 503 otherwise.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    responses(
        (status = 200, description = "Server is ready to handle traffic"),
        (status = 503, description = "Server is not ready")
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    HealthState::probe_response(state.is_ready())
}

/// Liveness probe. Return 200 while the process is marked alive and 503 once
/// draining.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    responses(
        (status = 200, description = "Server is alive"),
        (status = 503, description = "Server is shutting down")
    )
)]
#[get("/health/live")]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    HealthState::probe_response(state.is_alive())
}
