/// Database module for PostgreSQL integration
///
/// This module provides:
/// - Connection pooling and embedded migrations
/// - Repository traits for price points and version markers
/// - Database models and schema
/// - Diesel ORM integration

pub mod connection;
pub mod models;
pub mod repositories;
pub mod schema;

pub use connection::{establish_connection_pool, run_migrations, PgPool, StoreError};
