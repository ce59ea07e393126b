//! Handlers for the generic edit form.

use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

use super::{ensure_manager, load_schema};
use crate::domain::foundation::{AuthenticatedUser, RecordId};
use crate::domain::records::{
    values_for_update, FormMode, Record, RecordError, Table, TableSchema,
};
use crate::ports::{RecordRepository, SchemaInspector};

/// A populated edit form.
#[derive(Debug, Clone, Serialize)]
pub struct EditForm {
    pub schema: TableSchema,
    pub record: Record,
    pub id: RecordId,
}

pub struct LoadEditFormHandler {
    inspector: Arc<dyn SchemaInspector>,
    records: Arc<dyn RecordRepository>,
}

impl LoadEditFormHandler {
    pub fn new(inspector: Arc<dyn SchemaInspector>, records: Arc<dyn RecordRepository>) -> Self {
        Self { inspector, records }
    }

    pub async fn handle(
        &self,
        actor: &AuthenticatedUser,
        table: Table,
        id: RecordId,
    ) -> Result<EditForm, RecordError> {
        ensure_manager(actor)?;

        let schema = load_schema(self.inspector.as_ref(), table, FormMode::Edit).await?;
        let key = schema
            .primary_key()
            .map(|c| c.name.clone())
            .ok_or(RecordError::MissingPrimaryKey(table))?;

        let mut record = self
            .records
            .fetch(table, &key, &id)
            .await?
            .ok_or(RecordError::NotFound)?;

        // The stored password is never sent back to the browser.
        if table == Table::Users {
            record.remove("password");
        }
        tick_checkboxes(&schema, &mut record);

        Ok(EditForm { schema, record, id })
    }
}

/// Bit columns come back as `"0"`/`"1"` strings, which a template treats
/// as truthy either way.
fn tick_checkboxes(schema: &TableSchema, record: &mut Record) {
    for column in schema.columns.iter().filter(|c| c.is_boolean()) {
        let ticked = match record.get(&column.name) {
            Some(Value::String(bits)) => bits.contains('1'),
            _ => continue,
        };
        record.insert(column.name.clone(), Value::Bool(ticked));
    }
}

/// Command to update a row from submitted form fields.
#[derive(Debug, Clone)]
pub struct UpdateRecordCommand {
    pub actor: AuthenticatedUser,
    pub table: Table,
    pub id: RecordId,
    pub fields: Vec<(String, String)>,
}

pub struct UpdateRecordHandler {
    inspector: Arc<dyn SchemaInspector>,
    records: Arc<dyn RecordRepository>,
}

impl UpdateRecordHandler {
    pub fn new(inspector: Arc<dyn SchemaInspector>, records: Arc<dyn RecordRepository>) -> Self {
        Self { inspector, records }
    }

    pub async fn handle(&self, cmd: UpdateRecordCommand) -> Result<(), RecordError> {
        ensure_manager(&cmd.actor)?;

        let schema = load_schema(self.inspector.as_ref(), cmd.table, FormMode::Edit).await?;
        let key = schema
            .primary_key()
            .map(|c| c.name.clone())
            .ok_or(RecordError::MissingPrimaryKey(cmd.table))?;
        let values = values_for_update(&schema, &cmd.fields)?;

        let changed = self.records.update(&schema, &key, &cmd.id, &values).await?;
        if changed == 0 {
            return Err(RecordError::NotFound);
        }

        tracing::info!(table = %cmd.table, id = %cmd.id, by = %cmd.actor.username, "record updated");
        Ok(())
    }
}
