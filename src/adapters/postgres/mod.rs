//! PostgreSQL adapters - Database implementations for the data ports.
//!
//! - `PostgresUserRepository` - portal accounts
//! - `PostgresDirectoryReader` - list pages and visitor lookups
//! - `PostgresSchemaInspector` - column metadata from `information_schema`
//! - `PostgresRecordRepository` - generic row access by table
//! - `PostgresSubmissionRepository` - visitor surveys, milestones, donations

mod directory_reader;
mod record_repository;
mod schema_inspector;
mod sql;
mod submission_repository;
mod user_repository;

pub use directory_reader::PostgresDirectoryReader;
pub use record_repository::PostgresRecordRepository;
pub use schema_inspector::PostgresSchemaInspector;
pub use submission_repository::PostgresSubmissionRepository;
pub use user_repository::PostgresUserRepository;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::DatabaseConfig;

/// Opens the connection pool described by the configuration.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .min_connections(config.min_connections)
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout())
        .connect_with(config.connect_options()?)
        .await
}
