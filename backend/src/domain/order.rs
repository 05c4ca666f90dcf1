//! Order data model.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::TraceId;

/// Validation errors returned by the order value constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderValidationError {
    InvalidId,
    EmptyCustomerName,
    EmptyItem,
}

impl OrderValidationError {
    /// Name of the request field the error refers to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::InvalidId => "id",
            Self::EmptyCustomerName => "customer_name",
            Self::EmptyItem => "item",
        }
    }

    /// Stable machine-readable validation code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidId => "invalid_uuid",
            Self::EmptyCustomerName | Self::EmptyItem => "empty",
        }
    }
}

impl fmt::Display for OrderValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId => write!(f, "order id must be a valid UUID"),
            Self::EmptyCustomerName => write!(f, "customer_name must not be empty"),
            Self::EmptyItem => write!(f, "item must not be empty"),
        }
    }
}

impl std::error::Error for OrderValidationError {}

/// Server-assigned order identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(Uuid);

impl OrderId {
    /// Wrap an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Generate a new random [`OrderId`].
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for OrderId {
    type Err = OrderValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| OrderValidationError::InvalidId)
    }
}

macro_rules! non_empty_text {
    ($(#[$meta:meta])* $name:ident, $error:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Validate and construct the value from owned input.
            pub fn new(value: impl Into<String>) -> Result<Self, OrderValidationError> {
                let value = value.into();
                if value.trim().is_empty() {
                    return Err(OrderValidationError::$error);
                }
                Ok(Self(value))
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.0.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_ref())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = OrderValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }
    };
}

non_empty_text!(
    /// Name of the customer placing an order. Stored exactly as supplied.
    CustomerName,
    EmptyCustomerName
);

non_empty_text!(
    /// Ordered item description. Stored exactly as supplied.
    ItemName,
    EmptyItem
);

/// Truncate a clock reading to the precision PostgreSQL `timestamptz` keeps.
#[must_use]
pub fn storage_timestamp(instant: DateTime<Utc>) -> DateTime<Utc> {
    instant.trunc_subsecs(6)
}

/// Persisted order.
///
/// ## Invariants
/// - `(customer_name, item, created_at)` identifies at most one order.
/// - Orders are never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,
    customer_name: CustomerName,
    item: ItemName,
    created_at: DateTime<Utc>,
}

impl Order {
    /// Assemble an order from validated parts.
    #[must_use]
    pub const fn new(
        id: OrderId,
        customer_name: CustomerName,
        item: ItemName,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            customer_name,
            item,
            created_at,
        }
    }

    /// Server-assigned identifier.
    #[must_use]
    pub const fn id(&self) -> &OrderId {
        &self.id
    }

    /// Customer who placed the order.
    #[must_use]
    pub const fn customer_name(&self) -> &CustomerName {
        &self.customer_name
    }

    /// Item the customer ordered.
    #[must_use]
    pub const fn item(&self) -> &ItemName {
        &self.item
    }

    /// Creation instant at storage precision. Part of the deduplication key.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Event emitted once per newly persisted order.
///
/// The trace identifier of the originating request travels with the event so
/// the relay can log under the same trace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderCreatedEvent {
    order: Order,
    trace_id: Option<TraceId>,
}

impl OrderCreatedEvent {
    /// Build an event for `order`, capturing the trace identifier in scope.
    #[must_use]
    pub fn new(order: Order) -> Self {
        Self {
            order,
            trace_id: TraceId::current(),
        }
    }

    /// The order that was created.
    #[must_use]
    pub const fn order(&self) -> &Order {
        &self.order
    }

    /// Trace identifier of the request that created the order, if any.
    #[must_use]
    pub const fn trace_id(&self) -> Option<TraceId> {
        self.trace_id
    }
}
