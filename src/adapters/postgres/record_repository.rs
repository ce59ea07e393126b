//! Generic row access for the catalogued tables.
//!
//! Statements are assembled from catalog names and introspected column
//! names, always quoted. Values travel as text parameters and are cast to
//! each column's own type on the server.

use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;

use super::sql::{db_error, quote_ident};
use crate::domain::foundation::{DomainError, RecordId};
use crate::domain::records::{FieldValue, Record, RecordValues, Table, TableSchema};
use crate::ports::RecordRepository;

pub struct PostgresRecordRepository {
    pool: PgPool,
}

impl PostgresRecordRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn as_text(value: &FieldValue) -> Option<String> {
    match value {
        FieldValue::Null => None,
        FieldValue::Bool(b) => Some(b.to_string()),
        FieldValue::Text(s) => Some(s.clone()),
    }
}

/// Text bound for a column. Bit strings only accept binary digits, so
/// checkbox values become `1`/`0` there.
fn bound_text(schema: &TableSchema, column: &str, value: &FieldValue) -> Option<String> {
    let is_bit = schema
        .column(column)
        .map(|c| matches!(c.cast_type.as_str(), "bit" | "varbit"))
        .unwrap_or(false);
    match value {
        FieldValue::Bool(b) if is_bit => Some(if *b { "1" } else { "0" }.to_string()),
        _ => as_text(value),
    }
}

/// `CAST($n AS "type")` for a column, plain text when the type is unknown.
fn placeholder(schema: &TableSchema, column: &str, n: usize) -> String {
    match schema.column(column).map(|c| c.cast_type.as_str()) {
        Some(cast) if !cast.is_empty() => format!("CAST(${}::text AS {})", n, quote_ident(cast)),
        _ => format!("${}", n),
    }
}

fn insert_sql(schema: &TableSchema, values: &RecordValues) -> String {
    let columns: Vec<String> = values.iter().map(|(name, _)| quote_ident(name)).collect();
    let params: Vec<String> = values
        .iter()
        .enumerate()
        .map(|(i, (name, _))| placeholder(schema, name, i + 1))
        .collect();
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        quote_ident(schema.table.name()),
        columns.join(", "),
        params.join(", ")
    )
}

fn update_sql(schema: &TableSchema, key: &str, values: &RecordValues) -> String {
    let assignments: Vec<String> = values
        .iter()
        .enumerate()
        .map(|(i, (name, _))| format!("{} = {}", quote_ident(name), placeholder(schema, name, i + 1)))
        .collect();
    format!(
        "UPDATE {} SET {} WHERE {}::text = ${}",
        quote_ident(schema.table.name()),
        assignments.join(", "),
        quote_ident(key),
        values.len() + 1
    )
}

#[async_trait]
impl RecordRepository for PostgresRecordRepository {
    async fn fetch(
        &self,
        table: Table,
        key: &str,
        id: &RecordId,
    ) -> Result<Option<Record>, DomainError> {
        let sql = format!(
            "SELECT to_jsonb(t) FROM {} t WHERE t.{}::text = $1 LIMIT 1",
            quote_ident(table.name()),
            quote_ident(key)
        );
        let row: Option<Value> = sqlx::query_scalar(&sql)
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to fetch record", e))?;

        Ok(row.and_then(|value| match value {
            Value::Object(map) => Some(map),
            _ => None,
        }))
    }

    async fn insert(
        &self,
        schema: &TableSchema,
        values: &RecordValues,
    ) -> Result<(), DomainError> {
        let sql = insert_sql(schema, values);
        let mut query = sqlx::query(&sql);
        for (name, value) in values.iter() {
            query = query.bind(bound_text(schema, name, value));
        }
        query
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to insert record", e))?;
        Ok(())
    }

    async fn update(
        &self,
        schema: &TableSchema,
        key: &str,
        id: &RecordId,
        values: &RecordValues,
    ) -> Result<u64, DomainError> {
        let sql = update_sql(schema, key, values);
        let mut query = sqlx::query(&sql);
        for (name, value) in values.iter() {
            query = query.bind(bound_text(schema, name, value));
        }
        let result = query
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to update record", e))?;
        Ok(result.rows_affected())
    }

    async fn delete(&self, table: Table, key: &str, id: &RecordId) -> Result<u64, DomainError> {
        let sql = format!(
            "DELETE FROM {} WHERE {}::text = $1",
            quote_ident(table.name()),
            quote_ident(key)
        );
        let result = sqlx::query(&sql)
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to delete record", e))?;
        Ok(result.rows_affected())
    }
}
