//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` when a migration changes the table.

diesel::table! {
    /// Orders table.
    ///
    /// `(customer_name, item, created_at)` carries a unique index
    /// (`orders_dedup_key`) backing idempotent creation.
    orders (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Customer name exactly as submitted.
        customer_name -> Text,
        /// Item description exactly as submitted.
        item -> Text,
        /// Server-assigned creation time, microsecond precision.
        created_at -> Timestamptz,
    }
}
