//! DeleteRecordHandler - Command handler for deleting a row by primary key.

use std::sync::Arc;

use super::ensure_manager;
use crate::domain::foundation::{AuthenticatedUser, RecordId};
use crate::domain::records::{RecordError, Table};
use crate::ports::RecordRepository;

#[derive(Debug, Clone)]
pub struct DeleteRecordCommand {
    pub actor: AuthenticatedUser,
    pub table: Table,
    pub id: RecordId,
}

pub struct DeleteRecordHandler {
    records: Arc<dyn RecordRepository>,
}

impl DeleteRecordHandler {
    pub fn new(records: Arc<dyn RecordRepository>) -> Self {
        Self { records }
    }

    pub async fn handle(&self, cmd: DeleteRecordCommand) -> Result<(), RecordError> {
        ensure_manager(&cmd.actor)?;

        let removed = self
            .records
            .delete(cmd.table, cmd.table.primary_key(), &cmd.id)
            .await?;
        if removed == 0 {
            return Err(RecordError::NotFound);
        }

        tracing::info!(table = %cmd.table, id = %cmd.id, by = %cmd.actor.username, "record deleted");
        Ok(())
    }
}
