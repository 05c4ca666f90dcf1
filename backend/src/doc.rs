//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint from the inbound layer together
//! with the schema wrappers ([`ErrorSchema`], [`ErrorCodeSchema`]) that
//! describe domain types without coupling them to utoipa.
//!
//! The generated document is served by Swagger UI in debug builds and
//! exported via `cargo run --bin openapi-dump`.

use crate::inbound::http::health::HealthStatusBody;
use crate::inbound::http::orders::{CreateOrderRequestBody, OrderResponseBody};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Orders API",
        description = "Idempotent order creation, order lookup and health probes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::orders::create_order,
        crate::inbound::http::orders::get_order,
        crate::inbound::http::health::healthz,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        CreateOrderRequestBody,
        OrderResponseBody,
        HealthStatusBody,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "orders", description = "Order creation and lookup"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
