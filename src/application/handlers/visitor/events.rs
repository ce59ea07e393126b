//! Event grids shown to visitors.

use serde::Serialize;
use std::sync::Arc;

use crate::domain::foundation::{DomainError, Page, PageRequest, EVENT_GRID_PAGE_SIZE};
use crate::domain::visitor::SubmissionError;
use crate::ports::{DirectoryReader, EventSummary, ParticipantSummary};

/// The public event grid with its type filter.
#[derive(Debug, Clone, Serialize)]
pub struct EventGrid {
    pub events: Page<EventSummary>,
    pub event_types: Vec<String>,
    pub selected_type: String,
}

pub struct PublicEventsHandler {
    directory: Arc<dyn DirectoryReader>,
}

impl PublicEventsHandler {
    pub fn new(directory: Arc<dyn DirectoryReader>) -> Self {
        Self { directory }
    }

    pub async fn handle(
        &self,
        event_type: Option<&str>,
        page: Option<&str>,
    ) -> Result<EventGrid, DomainError> {
        let selected_type = event_type.map(str::trim).unwrap_or_default().to_string();
        let filter = Some(selected_type.as_str()).filter(|t| !t.is_empty());
        let page = PageRequest::from_query(page, EVENT_GRID_PAGE_SIZE);

        let event_types = self.directory.event_types().await?;
        let events = self.directory.public_events(filter, page).await?;

        Ok(EventGrid {
            events,
            event_types,
            selected_type,
        })
    }
}

/// Events a participant can leave a survey for.
#[derive(Debug, Clone, Serialize)]
pub struct ParticipantEvents {
    pub participant: ParticipantSummary,
    pub events: Page<EventSummary>,
}

pub struct FindParticipantEventsHandler {
    directory: Arc<dyn DirectoryReader>,
}

impl FindParticipantEventsHandler {
    pub fn new(directory: Arc<dyn DirectoryReader>) -> Self {
        Self { directory }
    }

    pub async fn handle(
        &self,
        email: &str,
        page: Option<&str>,
    ) -> Result<ParticipantEvents, SubmissionError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(SubmissionError::ParticipantNotFound);
        }
        let participant = self
            .directory
            .find_participant_by_email(email)
            .await?
            .ok_or(SubmissionError::ParticipantNotFound)?;

        let page = PageRequest::from_query(page, EVENT_GRID_PAGE_SIZE);
        let events = self
            .directory
            .participant_events(participant.id, page)
            .await?;

        Ok(ParticipantEvents {
            participant,
            events,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::testing::{event, participant, MockDirectoryReader};
    use chrono::NaiveDate;

    fn directory() -> MockDirectoryReader {
        let date = NaiveDate::from_ymd_opt(2025, 5, 1).unwrap();
        MockDirectoryReader {
            participants: vec![participant(1, "ana@example.org", "Ana")],
            events: (1..=12)
                .map(|i| {
                    let kind = if i % 2 == 0 { "Workshop" } else { "Mentoring" };
                    event(i, &format!("Event {:02}", i), kind)
                })
                .collect(),
            registrations: vec![(1, 2, date), (1, 4, date), (2, 6, date)],
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn grid_pages_nine_events() {
        let handler = PublicEventsHandler::new(Arc::new(directory()));
        let grid = handler.handle(None, None).await.unwrap();
        assert_eq!(grid.events.items.len(), 9);
        assert_eq!(grid.events.total_pages, 2);
        assert_eq!(grid.event_types, vec!["Mentoring", "Workshop"]);
        assert_eq!(grid.selected_type, "");
    }

    #[tokio::test]
    async fn grid_filters_by_type() {
        let handler = PublicEventsHandler::new(Arc::new(directory()));
        let grid = handler.handle(Some("Workshop"), None).await.unwrap();
        assert_eq!(grid.events.total_records, 6);
        assert!(grid
            .events
            .items
            .iter()
            .all(|e| e.event_type.as_deref() == Some("Workshop")));
        assert_eq!(grid.selected_type, "Workshop");
    }

    #[tokio::test]
    async fn finds_participant_events_by_email() {
        let handler = FindParticipantEventsHandler::new(Arc::new(directory()));
        let result = handler.handle(" ana@example.org ", None).await.unwrap();
        assert_eq!(result.participant.id, 1);
        let ids: Vec<i64> = result.events.items.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![2, 4]);
    }

    #[tokio::test]
    async fn unknown_email_is_participant_not_found() {
        let handler = FindParticipantEventsHandler::new(Arc::new(directory()));
        let err = handler.handle("nobody@example.org", None).await.unwrap_err();
        assert!(matches!(err, SubmissionError::ParticipantNotFound));
        let err = handler.handle("", None).await.unwrap_err();
        assert!(matches!(err, SubmissionError::ParticipantNotFound));
    }
}
