//! Records module - The generic table layer.
//!
//! The catalog of managed tables, their column metadata, form processing
//! and display labels.

mod catalog;
mod errors;
mod forms;
mod labels;
mod schema;

pub use catalog::Table;
pub use errors::RecordError;
pub use forms::{values_for_insert, values_for_update, FieldValue, RecordValues};
pub use labels::format_name;
pub use schema::{mark_primary_key, ColumnInfo, FormMode, InputKind, RawColumn, TableSchema};

/// A fetched row, keyed by column name.
pub type Record = serde_json::Map<String, serde_json::Value>;
