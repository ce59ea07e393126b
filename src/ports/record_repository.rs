//! Generic record repository port.
//!
//! Works on any catalogued [`Table`]. Key values are compared as text so a
//! path segment can address integer and text keys alike.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, RecordId};
use crate::domain::records::{Record, RecordValues, Table, TableSchema};

#[async_trait]
pub trait RecordRepository: Send + Sync {
    /// Fetches one row by key.
    async fn fetch(
        &self,
        table: Table,
        key: &str,
        id: &RecordId,
    ) -> Result<Option<Record>, DomainError>;

    /// Inserts a row. Each value is cast to its column's type.
    async fn insert(
        &self,
        schema: &TableSchema,
        values: &RecordValues,
    ) -> Result<(), DomainError>;

    /// Updates one row by key. Returns the number of rows changed.
    async fn update(
        &self,
        schema: &TableSchema,
        key: &str,
        id: &RecordId,
        values: &RecordValues,
    ) -> Result<u64, DomainError>;

    /// Deletes one row by key. Returns the number of rows removed.
    async fn delete(&self, table: Table, key: &str, id: &RecordId) -> Result<u64, DomainError>;
}
