//! Handlers for the generic add form.

use std::sync::Arc;

use super::{ensure_manager, load_schema};
use crate::domain::foundation::AuthenticatedUser;
use crate::domain::records::{values_for_insert, FormMode, RecordError, Table, TableSchema};
use crate::ports::{RecordRepository, SchemaInspector};

/// Loads the column layout for an empty add form.
pub struct LoadAddFormHandler {
    inspector: Arc<dyn SchemaInspector>,
}

impl LoadAddFormHandler {
    pub fn new(inspector: Arc<dyn SchemaInspector>) -> Self {
        Self { inspector }
    }

    pub async fn handle(
        &self,
        actor: &AuthenticatedUser,
        table: Table,
    ) -> Result<TableSchema, RecordError> {
        ensure_manager(actor)?;
        load_schema(self.inspector.as_ref(), table, FormMode::Add).await
    }
}

/// Command to insert a row from submitted form fields.
#[derive(Debug, Clone)]
pub struct AddRecordCommand {
    pub actor: AuthenticatedUser,
    pub table: Table,
    /// Form fields in submission order.
    pub fields: Vec<(String, String)>,
}

pub struct AddRecordHandler {
    inspector: Arc<dyn SchemaInspector>,
    records: Arc<dyn RecordRepository>,
}

impl AddRecordHandler {
    pub fn new(inspector: Arc<dyn SchemaInspector>, records: Arc<dyn RecordRepository>) -> Self {
        Self { inspector, records }
    }

    pub async fn handle(&self, cmd: AddRecordCommand) -> Result<(), RecordError> {
        ensure_manager(&cmd.actor)?;

        let schema = load_schema(self.inspector.as_ref(), cmd.table, FormMode::Add).await?;
        let values = values_for_insert(&schema, &cmd.fields)?;
        self.records.insert(&schema, &values).await?;

        tracing::info!(table = %cmd.table, columns = values.len(), by = %cmd.actor.username, "record added");
        Ok(())
    }
}
