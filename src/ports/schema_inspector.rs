//! Schema inspector port.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::records::{RawColumn, Table};

/// Reads column metadata for a managed table.
#[async_trait]
pub trait SchemaInspector: Send + Sync {
    /// Columns in ordinal order. Empty when the table does not exist.
    async fn columns(&self, table: Table) -> Result<Vec<RawColumn>, DomainError>;
}
