//! ListRecordsHandler - Query handler for the staff list pages.

use serde::Serialize;
use std::sync::Arc;

use crate::domain::foundation::{Page, PageRequest, STAFF_PAGE_SIZE};
use crate::domain::records::{RecordError, Table};
use crate::ports::{
    DirectoryReader, DonationSummary, EventSummary, ListQuery, MilestoneSummary,
    ParticipantSummary, SurveySummary, UserSummary,
};

/// Query for one page of a table's list view.
#[derive(Debug, Clone)]
pub struct ListRecordsQuery {
    pub table: Table,
    pub search: Option<String>,
    /// Raw `page` query parameter.
    pub page: Option<String>,
}

/// One page of rows for a list view.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum RecordListing {
    Users(Page<UserSummary>),
    Participants(Page<ParticipantSummary>),
    Events(Page<EventSummary>),
    Surveys(Page<SurveySummary>),
    Milestones(Page<MilestoneSummary>),
    Donations(Page<DonationSummary>),
}

impl RecordListing {
    /// An empty first page, shown when loading fails.
    pub fn empty(table: Table) -> Option<Self> {
        Some(match table {
            Table::Users => RecordListing::Users(Page::empty(STAFF_PAGE_SIZE)),
            Table::Participant => RecordListing::Participants(Page::empty(STAFF_PAGE_SIZE)),
            Table::Event => RecordListing::Events(Page::empty(STAFF_PAGE_SIZE)),
            Table::Survey => RecordListing::Surveys(Page::empty(STAFF_PAGE_SIZE)),
            Table::Milestone => RecordListing::Milestones(Page::empty(STAFF_PAGE_SIZE)),
            Table::Donation => RecordListing::Donations(Page::empty(STAFF_PAGE_SIZE)),
            Table::EventOccurrence | Table::Registration => return None,
        })
    }

    pub fn total_records(&self) -> u64 {
        match self {
            RecordListing::Users(p) => p.total_records,
            RecordListing::Participants(p) => p.total_records,
            RecordListing::Events(p) => p.total_records,
            RecordListing::Surveys(p) => p.total_records,
            RecordListing::Milestones(p) => p.total_records,
            RecordListing::Donations(p) => p.total_records,
        }
    }
}

pub struct ListRecordsHandler {
    directory: Arc<dyn DirectoryReader>,
}

impl ListRecordsHandler {
    pub fn new(directory: Arc<dyn DirectoryReader>) -> Self {
        Self { directory }
    }

    pub async fn handle(&self, query: ListRecordsQuery) -> Result<RecordListing, RecordError> {
        let page = PageRequest::from_query(query.page.as_deref(), STAFF_PAGE_SIZE);
        let list = ListQuery::new(query.search.as_deref(), page);
        let directory = &self.directory;

        let listing = match query.table {
            Table::Users => RecordListing::Users(directory.list_users(&list).await?),
            Table::Participant => {
                RecordListing::Participants(directory.list_participants(&list).await?)
            }
            Table::Event => RecordListing::Events(directory.list_events(&list).await?),
            Table::Survey => RecordListing::Surveys(directory.list_surveys(&list).await?),
            Table::Milestone => RecordListing::Milestones(directory.list_milestones(&list).await?),
            Table::Donation => RecordListing::Donations(directory.list_donations(&list).await?),
            Table::EventOccurrence | Table::Registration => return Err(RecordError::NotFound),
        };
        Ok(listing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::testing::{participant, MockDirectoryReader};

    fn query(table: Table, search: Option<&str>, page: Option<&str>) -> ListRecordsQuery {
        ListRecordsQuery {
            table,
            search: search.map(str::to_string),
            page: page.map(str::to_string),
        }
    }

    fn directory_with_participants(n: i64) -> MockDirectoryReader {
        MockDirectoryReader {
            participants: (1..=n)
                .map(|i| participant(i, &format!("p{}@example.org", i), "Ana"))
                .collect(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn pages_participants_ten_at_a_time() {
        let handler = ListRecordsHandler::new(Arc::new(directory_with_participants(23)));
        let listing = handler
            .handle(query(Table::Participant, None, Some("3")))
            .await
            .unwrap();

        let RecordListing::Participants(page) = listing else {
            panic!("expected participants");
        };
        assert_eq!(page.items.len(), 3);
        assert_eq!(page.current_page, 3);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.total_records, 23);
    }

    #[tokio::test]
    async fn bad_page_falls_back_to_first() {
        let handler = ListRecordsHandler::new(Arc::new(directory_with_participants(5)));
        let listing = handler
            .handle(query(Table::Participant, None, Some("banana")))
            .await
            .unwrap();
        let RecordListing::Participants(page) = listing else {
            panic!("expected participants");
        };
        assert_eq!(page.current_page, 1);
    }

    #[tokio::test]
    async fn blank_search_is_passed_as_no_filter() {
        let directory = Arc::new(directory_with_participants(1));
        let handler = ListRecordsHandler::new(directory.clone());
        handler
            .handle(query(Table::Participant, Some("  "), None))
            .await
            .unwrap();
        assert_eq!(directory.searches.lock().unwrap().as_slice(), &[None]);
    }

    #[tokio::test]
    async fn tables_without_list_page_are_not_found() {
        let handler = ListRecordsHandler::new(Arc::new(MockDirectoryReader::default()));
        let err = handler
            .handle(query(Table::Registration, None, None))
            .await
            .unwrap_err();
        assert!(matches!(err, RecordError::NotFound));
    }

    #[tokio::test]
    async fn database_failure_is_storage_error() {
        let handler = ListRecordsHandler::new(Arc::new(MockDirectoryReader {
            fail: true,
            ..Default::default()
        }));
        let err = handler.handle(query(Table::Users, None, None)).await.unwrap_err();
        assert!(matches!(err, RecordError::Storage(_)));
    }

    #[test]
    fn empty_listing_has_one_page() {
        let listing = RecordListing::empty(Table::Donation).unwrap();
        assert_eq!(listing.total_records(), 0);
        assert!(RecordListing::empty(Table::EventOccurrence).is_none());
    }

    #[test]
    fn every_list_table_has_an_empty_listing() {
        for table in Table::ALL.into_iter().filter(Table::has_list_page) {
            let listing = RecordListing::empty(table).unwrap();
            assert_eq!(listing.total_records(), 0, "{}", table);
        }
    }
}
