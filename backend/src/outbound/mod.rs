//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed order repository using Diesel ORM
//! - **notification**: order-created notifiers used by the relay
//!
//! Adapters are thin translators between domain types and infrastructure
//! representations. They contain no business logic.

pub mod notification;
pub mod persistence;
