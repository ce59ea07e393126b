//! Directory reader port (read side / list queries).
//!
//! Every staff list page and visitor lookup reads through this port.
//! Views are flattened for templates; dates and amounts arrive as display
//! text.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::foundation::{DomainError, Page, PageRequest};

/// Reader port for list pages and visitor lookups.
#[async_trait]
pub trait DirectoryReader: Send + Sync {
    /// Users matching `username`, ordered by id.
    async fn list_users(&self, query: &ListQuery) -> Result<Page<UserSummary>, DomainError>;

    /// Participants matching email, first or last name, ordered by id.
    async fn list_participants(
        &self,
        query: &ListQuery,
    ) -> Result<Page<ParticipantSummary>, DomainError>;

    /// Events matching name or type, ordered by name.
    async fn list_events(&self, query: &ListQuery) -> Result<Page<EventSummary>, DomainError>;

    /// Surveys matching the event name, newest first.
    async fn list_surveys(&self, query: &ListQuery) -> Result<Page<SurveySummary>, DomainError>;

    /// Milestones matching participant name or title, newest first.
    async fn list_milestones(
        &self,
        query: &ListQuery,
    ) -> Result<Page<MilestoneSummary>, DomainError>;

    /// Donations matching participant name, newest first.
    async fn list_donations(
        &self,
        query: &ListQuery,
    ) -> Result<Page<DonationSummary>, DomainError>;

    /// Public event grid, optionally restricted to one type.
    async fn public_events(
        &self,
        event_type: Option<&str>,
        page: PageRequest,
    ) -> Result<Page<EventSummary>, DomainError>;

    /// Distinct event types, sorted.
    async fn event_types(&self) -> Result<Vec<String>, DomainError>;

    /// Events the participant is registered for on a scheduled occurrence.
    async fn participant_events(
        &self,
        participant_id: i64,
        page: PageRequest,
    ) -> Result<Page<EventSummary>, DomainError>;

    /// A participant's milestones, newest first.
    async fn participant_milestones(
        &self,
        participant_id: i64,
        page: PageRequest,
    ) -> Result<Page<MilestoneSummary>, DomainError>;

    async fn find_participant(&self, id: i64) -> Result<Option<ParticipantSummary>, DomainError>;

    async fn find_participant_by_email(
        &self,
        email: &str,
    ) -> Result<Option<ParticipantSummary>, DomainError>;

    async fn find_event(&self, id: i64) -> Result<Option<EventSummary>, DomainError>;

    /// Distinct start dates of the occurrences the participant registered for, ascending.
    async fn survey_dates(
        &self,
        participant_id: i64,
        event_id: i64,
    ) -> Result<Vec<NaiveDate>, DomainError>;

    /// Check if the backing database answers.
    ///
    /// Used by the health endpoint.
    async fn is_available(&self) -> bool;
}

/// A list request: optional search text plus the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    search: Option<String>,
    pub page: PageRequest,
}

impl ListQuery {
    /// Blank search text means no filter.
    pub fn new(search: Option<&str>, page: PageRequest) -> Self {
        let search = search
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        Self { search, page }
    }

    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserSummary {
    pub id: i64,
    pub username: String,
    pub level: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParticipantSummary {
    pub id: i64,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
}

impl ParticipantSummary {
    pub fn full_name(&self) -> String {
        [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventSummary {
    pub id: i64,
    pub name: String,
    pub event_type: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SurveySummary {
    pub id: i64,
    pub event_name: String,
    pub participant_first_name: Option<String>,
    pub usefulness: Option<i32>,
    pub recommendation: Option<i32>,
    pub overall: Option<i32>,
    pub submitted_on: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MilestoneSummary {
    pub id: i64,
    pub participant_first_name: Option<String>,
    pub participant_last_name: Option<String>,
    pub title: String,
    pub date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DonationSummary {
    pub id: i64,
    pub participant_first_name: Option<String>,
    pub participant_last_name: Option<String>,
    pub date: Option<String>,
    pub amount: Option<String>,
}
