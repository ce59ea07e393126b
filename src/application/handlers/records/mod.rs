//! Record command and query handlers.
//!
//! Listing, generic add/edit driven by column metadata, and deletion.
//! Every mutation requires a manager.

mod add_record;
mod delete_record;
mod edit_record;
mod list_records;
mod participant_milestones;

pub use add_record::{AddRecordCommand, AddRecordHandler, LoadAddFormHandler};
pub use delete_record::{DeleteRecordCommand, DeleteRecordHandler};
pub use edit_record::{EditForm, LoadEditFormHandler, UpdateRecordCommand, UpdateRecordHandler};
pub use list_records::{ListRecordsHandler, ListRecordsQuery, RecordListing};
pub use participant_milestones::{ParticipantMilestones, ParticipantMilestonesHandler};

use crate::domain::foundation::AuthenticatedUser;
use crate::domain::records::{FormMode, RecordError, Table, TableSchema};
use crate::ports::SchemaInspector;

pub(crate) fn ensure_manager(actor: &AuthenticatedUser) -> Result<(), RecordError> {
    if actor.is_manager() {
        Ok(())
    } else {
        Err(RecordError::Unauthorized)
    }
}

/// Column layout for a form. Users have a fixed layout; other tables are
/// read from the database.
pub(crate) async fn load_schema(
    inspector: &dyn SchemaInspector,
    table: Table,
    mode: FormMode,
) -> Result<TableSchema, RecordError> {
    if table == Table::Users {
        return Ok(TableSchema::users(mode));
    }
    let columns = inspector.columns(table).await?;
    if columns.is_empty() {
        return Err(RecordError::NoColumns(table));
    }
    Ok(TableSchema::from_raw(table, columns))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::testing::{
        manager, milestone_columns, staff, MockSchemaInspector,
    };

    #[test]
    fn only_managers_pass() {
        assert!(ensure_manager(&manager()).is_ok());
        assert!(matches!(
            ensure_manager(&staff()),
            Err(RecordError::Unauthorized)
        ));
    }

    #[tokio::test]
    async fn users_schema_does_not_touch_database() {
        let inspector = MockSchemaInspector {
            fail: true,
            ..Default::default()
        };
        let schema = load_schema(&inspector, Table::Users, FormMode::Add)
            .await
            .unwrap();
        assert_eq!(schema.columns.len(), 4);
    }

    #[tokio::test]
    async fn table_without_columns_is_an_error() {
        let inspector = MockSchemaInspector::default();
        let err = load_schema(&inspector, Table::Donation, FormMode::Add)
            .await
            .unwrap_err();
        assert!(matches!(err, RecordError::NoColumns(Table::Donation)));
    }

    #[tokio::test]
    async fn inspected_columns_get_primary_key() {
        let inspector = MockSchemaInspector::with_table(Table::Milestone, milestone_columns());
        let schema = load_schema(&inspector, Table::Milestone, FormMode::Edit)
            .await
            .unwrap();
        assert_eq!(schema.primary_key().unwrap().name, "milestoneid");
    }
}
