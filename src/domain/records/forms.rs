//! Turns submitted form fields into column values.

use serde::Serialize;
use std::collections::HashSet;

use super::schema::{ColumnInfo, TableSchema};
use crate::domain::foundation::ValidationError;

/// A value destined for one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Text(String),
}

impl FieldValue {
    /// Interprets a raw form string for a column.
    ///
    /// `"true"` is a ticked checkbox and an empty string is NULL.
    pub fn from_form(column: &ColumnInfo, raw: &str) -> Self {
        if raw == "true" {
            return FieldValue::Bool(true);
        }
        if raw.is_empty() {
            return FieldValue::Null;
        }
        if column.is_boolean() {
            let ticked = matches!(raw.to_ascii_lowercase().as_str(), "on" | "1" | "t" | "yes");
            return FieldValue::Bool(ticked);
        }
        FieldValue::Text(raw.to_string())
    }
}

/// An ordered set of column assignments, every name a column of the schema.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct RecordValues {
    entries: Vec<(String, FieldValue)>,
}

impl RecordValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a column, replacing any earlier value.
    pub fn set(&mut self, column: impl Into<String>, value: FieldValue) {
        let column = column.into();
        match self.entries.iter_mut().find(|(name, _)| *name == column) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((column, value)),
        }
    }

    pub fn get(&self, column: &str) -> Option<&FieldValue> {
        self.entries
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Values for a new row.
///
/// Fields that are not columns are dropped, as is a generated primary key.
/// The first submission of a repeated field wins.
pub fn values_for_insert(
    schema: &TableSchema,
    fields: &[(String, String)],
) -> Result<RecordValues, ValidationError> {
    let mut values = RecordValues::new();
    let mut seen = HashSet::new();

    for (name, raw) in fields {
        let Some(column) = schema.column(name) else {
            continue;
        };
        if !column.is_editable() || !seen.insert(name.as_str()) {
            continue;
        }
        values.set(name.clone(), FieldValue::from_form(column, raw));
    }

    if values.is_empty() {
        return Err(ValidationError::invalid_format(
            "record",
            "no recognised columns were submitted",
        ));
    }
    Ok(values)
}

/// Values for an update.
///
/// The primary key is never changed. Checkbox columns missing from the
/// submission were unticked and become false.
pub fn values_for_update(
    schema: &TableSchema,
    fields: &[(String, String)],
) -> Result<RecordValues, ValidationError> {
    let mut values = RecordValues::new();
    let mut seen = HashSet::new();

    for (name, raw) in fields {
        let Some(column) = schema.column(name) else {
            continue;
        };
        if column.is_primary || !seen.insert(name.as_str()) {
            continue;
        }
        values.set(name.clone(), FieldValue::from_form(column, raw));
    }

    for column in schema.columns.iter().filter(|c| c.is_boolean() && !c.is_primary) {
        if !seen.contains(column.name.as_str()) {
            values.set(column.name.clone(), FieldValue::Bool(false));
        }
    }

    if values.is_empty() {
        return Err(ValidationError::invalid_format(
            "record",
            "no recognised columns were submitted",
        ));
    }
    Ok(values)
}
