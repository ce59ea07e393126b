//! Mock ports shared by handler tests.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use crate::domain::foundation::{
    AccessLevel, AuthenticatedUser, DomainError, ErrorCode, Page, PageRequest, RecordId,
    SessionId,
};
use crate::domain::records::{RawColumn, Record, RecordValues, Table, TableSchema};
use crate::ports::{
    DirectoryReader, DonationSummary, EventSummary, ListQuery, MilestoneSummary, NewDonation,
    NewMilestone, NewSurvey, NewUser, ParticipantSummary, RecordRepository, SchemaInspector,
    SessionStore, SessionStoreError, SubmissionRepository, SurveySummary, UserRecord,
    UserRepository, UserSummary, UserUpdate,
};

pub fn db_error() -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, "connection reset")
}

pub fn manager() -> AuthenticatedUser {
    AuthenticatedUser::new("boss", AccessLevel::Manager)
}

pub fn staff() -> AuthenticatedUser {
    AuthenticatedUser::new("helper", AccessLevel::User)
}

pub fn participant(id: i64, email: &str, first: &str) -> ParticipantSummary {
    ParticipantSummary {
        id,
        email: email.to_string(),
        first_name: Some(first.to_string()),
        last_name: None,
        phone: None,
        city: None,
        state: None,
    }
}

pub fn event(id: i64, name: &str, event_type: &str) -> EventSummary {
    EventSummary {
        id,
        name: name.to_string(),
        event_type: Some(event_type.to_string()),
        description: None,
    }
}

fn paginate<T: Clone>(items: &[T], page: PageRequest) -> Page<T> {
    let rows = items
        .iter()
        .skip(page.offset() as usize)
        .take(page.limit() as usize)
        .cloned()
        .collect();
    Page::new(rows, page, items.len() as u64)
}

// -----------------------------------------------------------------------------
// Users
// -----------------------------------------------------------------------------

#[derive(Default)]
pub struct MockUserRepository {
    pub users: Mutex<Vec<UserRecord>>,
    pub fail: bool,
}

impl MockUserRepository {
    pub fn with_user(username: &str, password: &str, level: AccessLevel) -> Self {
        let repo = Self::default();
        repo.users.lock().unwrap().push(UserRecord {
            id: 1,
            username: username.to_string(),
            password: password.to_string(),
            level,
        });
        repo
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn get(&self, id: i64) -> Option<UserRecord> {
        self.users.lock().unwrap().iter().find(|u| u.id == id).cloned()
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, DomainError> {
        if self.fail {
            return Err(db_error());
        }
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn create(&self, user: &NewUser) -> Result<i64, DomainError> {
        if self.fail {
            return Err(db_error());
        }
        let mut users = self.users.lock().unwrap();
        let id = users.iter().map(|u| u.id).max().unwrap_or(0) + 1;
        users.push(UserRecord {
            id,
            username: user.username.clone(),
            password: user.password_hash.clone(),
            level: user.level,
        });
        Ok(id)
    }

    async fn update(&self, id: i64, update: &UserUpdate) -> Result<bool, DomainError> {
        if self.fail {
            return Err(db_error());
        }
        let mut users = self.users.lock().unwrap();
        let Some(user) = users.iter_mut().find(|u| u.id == id) else {
            return Ok(false);
        };
        user.username = update.username.clone();
        user.level = update.level;
        if let Some(hash) = &update.password_hash {
            user.password = hash.clone();
        }
        Ok(true)
    }
}

// -----------------------------------------------------------------------------
// Sessions
// -----------------------------------------------------------------------------

#[derive(Default)]
pub struct MockSessionStore {
    pub sessions: Mutex<HashMap<SessionId, AuthenticatedUser>>,
    pub fail: bool,
}

impl MockSessionStore {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn count(&self) -> usize {
        self.sessions.lock().unwrap().len()
    }
}

#[async_trait]
impl SessionStore for MockSessionStore {
    async fn create(
        &self,
        user: &AuthenticatedUser,
        _ttl: Duration,
    ) -> Result<SessionId, SessionStoreError> {
        if self.fail {
            return Err(SessionStoreError::Unavailable("down".into()));
        }
        let id = SessionId::new();
        self.sessions.lock().unwrap().insert(id, user.clone());
        Ok(id)
    }

    async fn get(&self, id: &SessionId) -> Result<Option<AuthenticatedUser>, SessionStoreError> {
        Ok(self.sessions.lock().unwrap().get(id).cloned())
    }

    async fn destroy(&self, id: &SessionId) -> Result<(), SessionStoreError> {
        if self.fail {
            return Err(SessionStoreError::Unavailable("down".into()));
        }
        self.sessions.lock().unwrap().remove(id);
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// Schema and records
// -----------------------------------------------------------------------------

#[derive(Default)]
pub struct MockSchemaInspector {
    pub tables: HashMap<Table, Vec<RawColumn>>,
    pub fail: bool,
}

impl MockSchemaInspector {
    pub fn with_table(table: Table, columns: Vec<RawColumn>) -> Self {
        let mut tables = HashMap::new();
        tables.insert(table, columns);
        Self {
            tables,
            fail: false,
        }
    }
}

#[async_trait]
impl SchemaInspector for MockSchemaInspector {
    async fn columns(&self, table: Table) -> Result<Vec<RawColumn>, DomainError> {
        if self.fail {
            return Err(db_error());
        }
        Ok(self.tables.get(&table).cloned().unwrap_or_default())
    }
}

pub fn serial(name: &str) -> RawColumn {
    RawColumn {
        default: Some(format!("nextval('{}_seq'::regclass)", name)),
        ..RawColumn::new(name, "integer", "int4", false)
    }
}

pub fn milestone_columns() -> Vec<RawColumn> {
    vec![
        serial("milestoneid"),
        RawColumn::new("participantid", "integer", "int4", false),
        RawColumn::new("milestonetitle", "character varying", "varchar", false),
        RawColumn::new("milestonedate", "date", "date", true),
        RawColumn::new("milestoneverified", "boolean", "bool", true),
    ]
}

#[derive(Debug, Clone, PartialEq)]
pub enum RecordCall {
    Insert(Table, RecordValues),
    Update(Table, String, String, RecordValues),
    Delete(Table, String, String),
}

#[derive(Default)]
pub struct MockRecordRepository {
    pub rows: Mutex<Vec<(Table, String, Record)>>,
    pub calls: Mutex<Vec<RecordCall>>,
    pub fail: bool,
}

impl MockRecordRepository {
    pub fn with_row(table: Table, id: &str, record: Record) -> Self {
        let repo = Self::default();
        repo.rows
            .lock()
            .unwrap()
            .push((table, id.to_string(), record));
        repo
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<RecordCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl RecordRepository for MockRecordRepository {
    async fn fetch(
        &self,
        table: Table,
        _key: &str,
        id: &RecordId,
    ) -> Result<Option<Record>, DomainError> {
        if self.fail {
            return Err(db_error());
        }
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|(t, row_id, _)| *t == table && row_id == id.as_str())
            .map(|(_, _, record)| record.clone()))
    }

    async fn insert(
        &self,
        schema: &TableSchema,
        values: &RecordValues,
    ) -> Result<(), DomainError> {
        if self.fail {
            return Err(DomainError::database("null value violates not-null constraint"));
        }
        self.calls
            .lock()
            .unwrap()
            .push(RecordCall::Insert(schema.table, values.clone()));
        Ok(())
    }

    async fn update(
        &self,
        schema: &TableSchema,
        key: &str,
        id: &RecordId,
        values: &RecordValues,
    ) -> Result<u64, DomainError> {
        if self.fail {
            return Err(db_error());
        }
        self.calls.lock().unwrap().push(RecordCall::Update(
            schema.table,
            key.to_string(),
            id.to_string(),
            values.clone(),
        ));
        let exists = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .any(|(t, row_id, _)| *t == schema.table && row_id == id.as_str());
        Ok(u64::from(exists))
    }

    async fn delete(&self, table: Table, key: &str, id: &RecordId) -> Result<u64, DomainError> {
        if self.fail {
            return Err(db_error());
        }
        self.calls.lock().unwrap().push(RecordCall::Delete(
            table,
            key.to_string(),
            id.to_string(),
        ));
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|(t, row_id, _)| !(*t == table && row_id == id.as_str()));
        Ok((before - rows.len()) as u64)
    }
}

// -----------------------------------------------------------------------------
// Directory
// -----------------------------------------------------------------------------

#[derive(Default)]
pub struct MockDirectoryReader {
    pub users: Vec<UserSummary>,
    pub participants: Vec<ParticipantSummary>,
    pub events: Vec<EventSummary>,
    pub surveys: Vec<SurveySummary>,
    pub milestones: Vec<MilestoneSummary>,
    pub donations: Vec<DonationSummary>,
    /// (participant id, event id, occurrence start date)
    pub registrations: Vec<(i64, i64, NaiveDate)>,
    /// (participant id, milestone)
    pub participant_milestones: Vec<(i64, MilestoneSummary)>,
    pub searches: Mutex<Vec<Option<String>>>,
    pub fail: bool,
}

impl MockDirectoryReader {
    fn check(&self) -> Result<(), DomainError> {
        if self.fail {
            Err(db_error())
        } else {
            Ok(())
        }
    }

    fn record_search(&self, query: &ListQuery) {
        self.searches
            .lock()
            .unwrap()
            .push(query.search().map(str::to_string));
    }

    fn matches(value: Option<&str>, search: Option<&str>) -> bool {
        match search {
            None => true,
            Some(s) => value
                .map(|v| v.to_lowercase().contains(&s.to_lowercase()))
                .unwrap_or(false),
        }
    }
}

#[async_trait]
impl DirectoryReader for MockDirectoryReader {
    async fn list_users(&self, query: &ListQuery) -> Result<Page<UserSummary>, DomainError> {
        self.check()?;
        self.record_search(query);
        let rows: Vec<_> = self
            .users
            .iter()
            .filter(|u| Self::matches(Some(&u.username), query.search()))
            .cloned()
            .collect();
        Ok(paginate(&rows, query.page))
    }

    async fn list_participants(
        &self,
        query: &ListQuery,
    ) -> Result<Page<ParticipantSummary>, DomainError> {
        self.check()?;
        self.record_search(query);
        let rows: Vec<_> = self
            .participants
            .iter()
            .filter(|p| {
                Self::matches(Some(&p.email), query.search())
                    || Self::matches(p.first_name.as_deref(), query.search())
                    || Self::matches(p.last_name.as_deref(), query.search())
            })
            .cloned()
            .collect();
        Ok(paginate(&rows, query.page))
    }

    async fn list_events(&self, query: &ListQuery) -> Result<Page<EventSummary>, DomainError> {
        self.check()?;
        self.record_search(query);
        let rows: Vec<_> = self
            .events
            .iter()
            .filter(|e| {
                Self::matches(Some(&e.name), query.search())
                    || Self::matches(e.event_type.as_deref(), query.search())
            })
            .cloned()
            .collect();
        Ok(paginate(&rows, query.page))
    }

    async fn list_surveys(&self, query: &ListQuery) -> Result<Page<SurveySummary>, DomainError> {
        self.check()?;
        self.record_search(query);
        let rows: Vec<_> = self
            .surveys
            .iter()
            .filter(|s| Self::matches(Some(&s.event_name), query.search()))
            .cloned()
            .collect();
        Ok(paginate(&rows, query.page))
    }

    async fn list_milestones(
        &self,
        query: &ListQuery,
    ) -> Result<Page<MilestoneSummary>, DomainError> {
        self.check()?;
        self.record_search(query);
        let rows: Vec<_> = self
            .milestones
            .iter()
            .filter(|m| Self::matches(Some(&m.title), query.search()))
            .cloned()
            .collect();
        Ok(paginate(&rows, query.page))
    }

    async fn list_donations(
        &self,
        query: &ListQuery,
    ) -> Result<Page<DonationSummary>, DomainError> {
        self.check()?;
        self.record_search(query);
        Ok(paginate(&self.donations, query.page))
    }

    async fn public_events(
        &self,
        event_type: Option<&str>,
        page: PageRequest,
    ) -> Result<Page<EventSummary>, DomainError> {
        self.check()?;
        let rows: Vec<_> = self
            .events
            .iter()
            .filter(|e| event_type.is_none() || e.event_type.as_deref() == event_type)
            .cloned()
            .collect();
        Ok(paginate(&rows, page))
    }

    async fn event_types(&self) -> Result<Vec<String>, DomainError> {
        self.check()?;
        let mut types: Vec<String> = self
            .events
            .iter()
            .filter_map(|e| e.event_type.clone())
            .collect();
        types.sort();
        types.dedup();
        Ok(types)
    }

    async fn participant_events(
        &self,
        participant_id: i64,
        page: PageRequest,
    ) -> Result<Page<EventSummary>, DomainError> {
        self.check()?;
        let rows: Vec<_> = self
            .events
            .iter()
            .filter(|e| {
                self.registrations
                    .iter()
                    .any(|(p, ev, _)| *p == participant_id && *ev == e.id)
            })
            .cloned()
            .collect();
        Ok(paginate(&rows, page))
    }

    async fn participant_milestones(
        &self,
        participant_id: i64,
        page: PageRequest,
    ) -> Result<Page<MilestoneSummary>, DomainError> {
        self.check()?;
        let rows: Vec<_> = self
            .participant_milestones
            .iter()
            .filter(|(p, _)| *p == participant_id)
            .map(|(_, m)| m.clone())
            .collect();
        Ok(paginate(&rows, page))
    }

    async fn find_participant(&self, id: i64) -> Result<Option<ParticipantSummary>, DomainError> {
        self.check()?;
        Ok(self.participants.iter().find(|p| p.id == id).cloned())
    }

    async fn find_participant_by_email(
        &self,
        email: &str,
    ) -> Result<Option<ParticipantSummary>, DomainError> {
        self.check()?;
        Ok(self.participants.iter().find(|p| p.email == email).cloned())
    }

    async fn find_event(&self, id: i64) -> Result<Option<EventSummary>, DomainError> {
        self.check()?;
        Ok(self.events.iter().find(|e| e.id == id).cloned())
    }

    async fn survey_dates(
        &self,
        participant_id: i64,
        event_id: i64,
    ) -> Result<Vec<NaiveDate>, DomainError> {
        self.check()?;
        let mut dates: Vec<NaiveDate> = self
            .registrations
            .iter()
            .filter(|(p, e, _)| *p == participant_id && *e == event_id)
            .map(|(_, _, d)| *d)
            .collect();
        dates.sort();
        dates.dedup();
        Ok(dates)
    }

    async fn is_available(&self) -> bool {
        !self.fail
    }
}

// -----------------------------------------------------------------------------
// Submissions
// -----------------------------------------------------------------------------

#[derive(Default)]
pub struct MockSubmissionRepository {
    /// (occurrence id, event id, start date)
    pub occurrences: Vec<(i64, i64, NaiveDate)>,
    /// (registration id, participant id, occurrence id)
    pub registrations: Vec<(i64, i64, i64)>,
    pub surveys: Mutex<Vec<NewSurvey>>,
    pub milestones: Mutex<Vec<NewMilestone>>,
    pub donations: Mutex<Vec<NewDonation>>,
    pub fail_insert: bool,
}

#[async_trait]
impl SubmissionRepository for MockSubmissionRepository {
    async fn find_occurrence(
        &self,
        event_id: i64,
        date: NaiveDate,
    ) -> Result<Option<i64>, DomainError> {
        Ok(self
            .occurrences
            .iter()
            .find(|(_, e, d)| *e == event_id && *d == date)
            .map(|(id, _, _)| *id))
    }

    async fn find_registration(
        &self,
        participant_id: i64,
        occurrence_id: i64,
    ) -> Result<Option<i64>, DomainError> {
        Ok(self
            .registrations
            .iter()
            .find(|(_, p, o)| *p == participant_id && *o == occurrence_id)
            .map(|(id, _, _)| *id))
    }

    async fn insert_survey(&self, survey: &NewSurvey) -> Result<(), DomainError> {
        if self.fail_insert {
            return Err(db_error());
        }
        self.surveys.lock().unwrap().push(survey.clone());
        Ok(())
    }

    async fn insert_milestone(&self, milestone: &NewMilestone) -> Result<(), DomainError> {
        if self.fail_insert {
            return Err(db_error());
        }
        self.milestones.lock().unwrap().push(milestone.clone());
        Ok(())
    }

    async fn insert_donation(&self, donation: &NewDonation) -> Result<(), DomainError> {
        if self.fail_insert {
            return Err(db_error());
        }
        self.donations.lock().unwrap().push(donation.clone());
        Ok(())
    }
}
