//! Domain primitives, services, and ports.
//!
//! Purpose: Define strongly typed order entities, the creation and lookup
//! protocol, and the asynchronous post-creation hand-off. Nothing here knows
//! about HTTP or SQL; adapters plug in through [`ports`].
//!
//! Public surface:
//! - Error (alias to `error::Error`): API error response payload.
//! - Order, OrderId, CustomerName, ItemName: the order aggregate.
//! - OrderRegistry: implements the order command and query ports.
//! - NotificationRelay, RelayHandle: bounded order-created event queue.
//! - ShutdownCoordinator, ShutdownSignal: process-wide cancellation.

pub mod error;
pub mod notification_relay;
pub mod order;
pub mod order_registry;
pub mod ports;
pub mod shutdown;
pub mod trace_id;

pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::notification_relay::{
    DEFAULT_QUEUE_CAPACITY, DEFAULT_SUBMIT_TIMEOUT, NotificationRelay, RelayConfig, RelayHandle,
    RelayState, SubmitOutcome,
};
pub use self::order::{
    CustomerName, ItemName, Order, OrderCreatedEvent, OrderId, OrderValidationError,
    storage_timestamp,
};
pub use self::order_registry::OrderRegistry;
pub use self::shutdown::{ShutdownCoordinator, ShutdownSignal};
pub use self::trace_id::TraceId;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use orders::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("no such order"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
