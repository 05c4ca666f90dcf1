//! PostgreSQL-backed `OrderRepository` implementation using Diesel ORM.
//!
//! Unique violations on insert surface as
//! [`OrderRepositoryError::Duplicate`] so the registry can resolve concurrent
//! identical creates. Every other database failure is a query or connection
//! error.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{OrderRepository, OrderRepositoryError};
use crate::domain::{CustomerName, ItemName, Order, OrderId};

use super::models::{NewOrderRow, OrderRow};
use super::pool::{DbPool, PoolError};
use super::schema::orders;

/// Diesel-backed implementation of the `OrderRepository` port.
#[derive(Clone)]
pub struct DieselOrderRepository {
    pool: DbPool,
}

impl DieselOrderRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to domain repository errors.
fn map_pool_error(error: PoolError) -> OrderRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            OrderRepositoryError::connection(message)
        }
    }
}

/// Map Diesel errors to domain repository errors.
fn map_diesel_error(error: diesel::result::Error) -> OrderRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => OrderRepositoryError::query("record not found"),
        DieselError::QueryBuilderError(_) => OrderRepositoryError::query("database query error"),
        DieselError::DatabaseError(kind, info) => match kind {
            DatabaseErrorKind::UniqueViolation => OrderRepositoryError::duplicate(
                info.constraint_name().unwrap_or("unique constraint"),
            ),
            DatabaseErrorKind::ClosedConnection => {
                OrderRepositoryError::connection("database connection error")
            }
            _ => OrderRepositoryError::query("database error"),
        },
        _ => OrderRepositoryError::query("database error"),
    }
}

/// Convert a database row to a domain order.
fn row_to_order(row: OrderRow) -> Result<Order, OrderRepositoryError> {
    let customer_name = CustomerName::new(row.customer_name).map_err(|err| {
        OrderRepositoryError::query(format!("invalid customer_name in row {}: {err}", row.id))
    })?;
    let item = ItemName::new(row.item)
        .map_err(|err| OrderRepositoryError::query(format!("invalid item in row {}: {err}", row.id)))?;
    Ok(Order::new(
        OrderId::from_uuid(row.id),
        customer_name,
        item,
        row.created_at,
    ))
}

#[async_trait]
impl OrderRepository for DieselOrderRepository {
    async fn find_matching(
        &self,
        customer_name: &CustomerName,
        item: &ItemName,
        created_at: DateTime<Utc>,
    ) -> Result<Option<Order>, OrderRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<OrderRow> = orders::table
            .filter(orders::customer_name.eq(customer_name.as_ref()))
            .filter(orders::item.eq(item.as_ref()))
            .filter(orders::created_at.eq(created_at))
            .select(OrderRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_order).transpose()
    }

    async fn insert(&self, order: &Order) -> Result<(), OrderRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewOrderRow {
            id: *order.id().as_uuid(),
            customer_name: order.customer_name().as_ref(),
            item: order.item().as_ref(),
            created_at: order.created_at(),
        };

        diesel::insert_into(orders::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_by_id(&self, id: &OrderId) -> Result<Option<Order>, OrderRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<OrderRow> = orders::table
            .find(*id.as_uuid())
            .select(OrderRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_order).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let repo_err = map_pool_error(PoolError::checkout("connection refused"));

        assert!(matches!(repo_err, OrderRepositoryError::Connection { .. }));
        assert!(repo_err.to_string().contains("connection refused"));
    }

    #[rstest]
    fn not_found_maps_to_query_error() {
        let repo_err = map_diesel_error(diesel::result::Error::NotFound);

        assert!(matches!(repo_err, OrderRepositoryError::Query { .. }));
        assert!(repo_err.to_string().contains("record not found"));
    }

    #[rstest]
    #[case(diesel::result::DatabaseErrorKind::UniqueViolation, true)]
    #[case(diesel::result::DatabaseErrorKind::ForeignKeyViolation, false)]
    fn only_unique_violations_map_to_duplicate(
        #[case] kind: diesel::result::DatabaseErrorKind,
        #[case] duplicate: bool,
    ) {
        let diesel_err =
            diesel::result::Error::DatabaseError(kind, Box::new("constraint hit".to_owned()));
        let repo_err = map_diesel_error(diesel_err);

        assert_eq!(
            matches!(repo_err, OrderRepositoryError::Duplicate { .. }),
            duplicate
        );
    }

    #[rstest]
    fn closed_connection_maps_to_connection_error() {
        let diesel_err = diesel::result::Error::DatabaseError(
            diesel::result::DatabaseErrorKind::ClosedConnection,
            Box::new("server closed".to_owned()),
        );

        assert!(matches!(
            map_diesel_error(diesel_err),
            OrderRepositoryError::Connection { .. }
        ));
    }

    #[rstest]
    fn blank_rows_are_rejected() {
        let row = OrderRow {
            id: uuid::Uuid::nil(),
            customer_name: String::new(),
            item: "Widget".to_owned(),
            created_at: Utc::now(),
        };

        assert!(matches!(
            row_to_order(row),
            Err(OrderRepositoryError::Query { .. })
        ));
    }
}
