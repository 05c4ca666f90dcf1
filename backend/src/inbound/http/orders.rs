//! Order HTTP handlers.
//!
//! ```text
//! POST /orders
//! GET  /orders/{id}
//! ```

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Order;
use crate::domain::ports::{CreateOrderOutcome, CreateOrderRequest};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{parse_customer_name, parse_item, parse_order_id};

/// Request payload for creating an order.
///
/// Fields are optional at the serde layer so a missing field is reported with
/// the same `details` shape as an empty one.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct CreateOrderRequestBody {
    #[schema(example = "Ada Lovelace")]
    pub customer_name: Option<String>,
    #[schema(example = "Analytical engine")]
    pub item: Option<String>,
}

/// Order representation returned by every order endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct OrderResponseBody {
    #[schema(format = "uuid")]
    pub id: String,
    pub customer_name: String,
    pub item: String,
    #[schema(format = "date-time")]
    pub created_at: String,
}

impl From<&Order> for OrderResponseBody {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id().to_string(),
            customer_name: order.customer_name().to_string(),
            item: order.item().to_string(),
            created_at: order
                .created_at()
                .to_rfc3339_opts(chrono::SecondsFormat::AutoSi, true),
        }
    }
}

impl TryFrom<CreateOrderRequestBody> for CreateOrderRequest {
    type Error = crate::domain::Error;

    fn try_from(body: CreateOrderRequestBody) -> Result<Self, Self::Error> {
        Ok(Self {
            customer_name: parse_customer_name(body.customer_name)?,
            item: parse_item(body.item)?,
        })
    }
}

const fn outcome_status(outcome: &CreateOrderOutcome) -> StatusCode {
    match outcome {
        CreateOrderOutcome::Created(_) => StatusCode::CREATED,
        CreateOrderOutcome::Existing(_) => StatusCode::OK,
    }
}

/// Create an order, or return the stored order with the same customer, item
/// and creation instant.
#[utoipa::path(
    post,
    path = "/orders",
    request_body = CreateOrderRequestBody,
    responses(
        (status = 201, description = "Order created", body = OrderResponseBody),
        (status = 200, description = "Matching order already stored", body = OrderResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["orders"],
    operation_id = "createOrder"
)]
#[post("/orders")]
pub async fn create_order(
    state: web::Data<HttpState>,
    payload: web::Json<CreateOrderRequestBody>,
) -> ApiResult<HttpResponse> {
    let request = CreateOrderRequest::try_from(payload.into_inner())?;
    let outcome = state.orders.create_order(request).await?;
    let status = outcome_status(&outcome);
    Ok(HttpResponse::build(status).json(OrderResponseBody::from(outcome.order())))
}

/// Fetch an order by identifier.
#[utoipa::path(
    get,
    path = "/orders/{id}",
    params(("id" = String, Path, description = "Order identifier (UUID)")),
    responses(
        (status = 200, description = "Order found", body = OrderResponseBody),
        (status = 400, description = "Malformed order identifier", body = ErrorSchema),
        (status = 404, description = "Order not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["orders"],
    operation_id = "getOrder"
)]
#[get("/orders/{id}")]
pub async fn get_order(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<OrderResponseBody>> {
    let id = parse_order_id(path.as_str())?;
    let order = state.orders_query.get_order(&id).await?;
    Ok(web::Json(OrderResponseBody::from(&order)))
}

#[cfg(test)]
#[path = "orders_tests.rs"]
mod tests;
