//! Column metadata from `information_schema`.

use async_trait::async_trait;
use sqlx::PgPool;

use super::sql::db_error;
use crate::domain::foundation::DomainError;
use crate::domain::records::{RawColumn, Table};
use crate::ports::SchemaInspector;

pub struct PostgresSchemaInspector {
    pool: PgPool,
}

impl PostgresSchemaInspector {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ColumnRow {
    column_name: String,
    data_type: String,
    udt_name: String,
    character_maximum_length: Option<i32>,
    is_nullable: String,
    column_default: Option<String>,
    is_identity: String,
}

impl From<ColumnRow> for RawColumn {
    fn from(row: ColumnRow) -> Self {
        RawColumn {
            name: row.column_name,
            data_type: row.data_type,
            udt_name: row.udt_name,
            max_length: row.character_maximum_length,
            nullable: row.is_nullable == "YES",
            default: row.column_default,
            is_identity: row.is_identity == "YES",
        }
    }
}

#[async_trait]
impl SchemaInspector for PostgresSchemaInspector {
    async fn columns(&self, table: Table) -> Result<Vec<RawColumn>, DomainError> {
        let rows: Vec<ColumnRow> = sqlx::query_as(
            r#"
            SELECT column_name::text AS column_name,
                   data_type::text AS data_type,
                   udt_name::text AS udt_name,
                   character_maximum_length::int4 AS character_maximum_length,
                   is_nullable::text AS is_nullable,
                   column_default::text AS column_default,
                   is_identity::text AS is_identity
            FROM information_schema.columns
            WHERE table_schema = current_schema() AND table_name = $1
            ORDER BY ordinal_position
            "#,
        )
        .bind(table.name())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to read table columns", e))?;

        Ok(rows.into_iter().map(RawColumn::from).collect())
    }
}
