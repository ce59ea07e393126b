//! PostgreSQL implementation of DirectoryReader.
//!
//! Each list runs a COUNT and a LIMIT/OFFSET query over the same filter.
//! Search text is bound once as `$1` (NULL for no filter) and matched
//! case-insensitively with ILIKE.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;

use super::sql::{contains_pattern, db_error, window};
use crate::domain::foundation::{DomainError, Page, PageRequest};
use crate::ports::{
    DirectoryReader, DonationSummary, EventSummary, ListQuery, MilestoneSummary,
    ParticipantSummary, SurveySummary, UserSummary,
};

pub struct PostgresDirectoryReader {
    pool: PgPool,
}

impl PostgresDirectoryReader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Runs a filtered count plus one page of rows.
    ///
    /// `from_where` is shared by both statements and may reference `$1`;
    /// the page query appends `ORDER BY`, then `LIMIT $2 OFFSET $3`.
    async fn paged<R, T>(
        &self,
        context: &str,
        columns: &str,
        from_where: &str,
        order_by: &str,
        filter: Option<String>,
        page: PageRequest,
    ) -> Result<Page<T>, DomainError>
    where
        R: for<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow> + Send + Unpin + Into<T>,
    {
        let count_sql = format!("SELECT COUNT(*) {}", from_where);
        let total: i64 = sqlx::query_scalar(&count_sql)
            .bind(&filter)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error(context, e))?;

        let (limit, offset) = window(page);
        let page_sql = format!(
            "SELECT {} {} ORDER BY {} LIMIT $2 OFFSET $3",
            columns, from_where, order_by
        );
        let rows: Vec<R> = sqlx::query_as(&page_sql)
            .bind(&filter)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error(context, e))?;

        Ok(Page::new(
            rows.into_iter().map(Into::into).collect(),
            page,
            total.max(0) as u64,
        ))
    }
}

fn search_filter(query: &ListQuery) -> Option<String> {
    query.search().map(contains_pattern)
}

// -----------------------------------------------------------------------------
// Row types
// -----------------------------------------------------------------------------

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: i64,
    username: String,
    level: Option<String>,
}

impl From<UserRow> for UserSummary {
    fn from(row: UserRow) -> Self {
        UserSummary {
            id: row.id,
            username: row.username,
            level: row.level.unwrap_or_default(),
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ParticipantRow {
    id: i64,
    email: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
    phone: Option<String>,
    city: Option<String>,
    state: Option<String>,
}

impl From<ParticipantRow> for ParticipantSummary {
    fn from(row: ParticipantRow) -> Self {
        ParticipantSummary {
            id: row.id,
            email: row.email.unwrap_or_default(),
            first_name: row.first_name,
            last_name: row.last_name,
            phone: row.phone,
            city: row.city,
            state: row.state,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct EventRow {
    id: i64,
    name: Option<String>,
    event_type: Option<String>,
    description: Option<String>,
}

impl From<EventRow> for EventSummary {
    fn from(row: EventRow) -> Self {
        EventSummary {
            id: row.id,
            name: row.name.unwrap_or_default(),
            event_type: row.event_type,
            description: row.description,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct SurveyRow {
    id: i64,
    event_name: Option<String>,
    participant_first_name: Option<String>,
    usefulness: Option<i32>,
    recommendation: Option<i32>,
    overall: Option<i32>,
    submitted_on: Option<String>,
}

impl From<SurveyRow> for SurveySummary {
    fn from(row: SurveyRow) -> Self {
        SurveySummary {
            id: row.id,
            event_name: row.event_name.unwrap_or_default(),
            participant_first_name: row.participant_first_name,
            usefulness: row.usefulness,
            recommendation: row.recommendation,
            overall: row.overall,
            submitted_on: row.submitted_on,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct MilestoneRow {
    id: i64,
    participant_first_name: Option<String>,
    participant_last_name: Option<String>,
    title: Option<String>,
    date: Option<String>,
}

impl From<MilestoneRow> for MilestoneSummary {
    fn from(row: MilestoneRow) -> Self {
        MilestoneSummary {
            id: row.id,
            participant_first_name: row.participant_first_name,
            participant_last_name: row.participant_last_name,
            title: row.title.unwrap_or_default(),
            date: row.date,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct DonationRow {
    id: i64,
    participant_first_name: Option<String>,
    participant_last_name: Option<String>,
    date: Option<String>,
    amount: Option<String>,
}

impl From<DonationRow> for DonationSummary {
    fn from(row: DonationRow) -> Self {
        DonationSummary {
            id: row.id,
            participant_first_name: row.participant_first_name,
            participant_last_name: row.participant_last_name,
            date: row.date,
            amount: row.amount,
        }
    }
}

// -----------------------------------------------------------------------------
// Column lists
// -----------------------------------------------------------------------------

const PARTICIPANT_COLUMNS: &str = r#"
    p.participantid::bigint AS id,
    p.participantemail::text AS email,
    p.participantfirstname::text AS first_name,
    p.participantlastname::text AS last_name,
    p.participantphone::text AS phone,
    p.participantcity::text AS city,
    p.participantstate::text AS state
"#;

const EVENT_COLUMNS: &str = r#"
    e.eventid::bigint AS id,
    e.eventname::text AS name,
    e.eventtype::text AS event_type,
    e.eventdescription::text AS description
"#;

const MILESTONE_COLUMNS: &str = r#"
    m.milestoneid::bigint AS id,
    p.participantfirstname::text AS participant_first_name,
    p.participantlastname::text AS participant_last_name,
    m.milestonetitle::text AS title,
    m.milestonedate::date::text AS date
"#;

#[async_trait]
impl DirectoryReader for PostgresDirectoryReader {
    async fn list_users(&self, query: &ListQuery) -> Result<Page<UserSummary>, DomainError> {
        self.paged::<UserRow, _>(
            "Failed to list users",
            "userid::bigint AS id, username::text AS username, level::text AS level",
            r#"FROM users WHERE ($1::text IS NULL OR username ILIKE $1 ESCAPE '\')"#,
            "userid",
            search_filter(query),
            query.page,
        )
        .await
    }

    async fn list_participants(
        &self,
        query: &ListQuery,
    ) -> Result<Page<ParticipantSummary>, DomainError> {
        self.paged::<ParticipantRow, _>(
            "Failed to list participants",
            PARTICIPANT_COLUMNS,
            r#"FROM participant p
               WHERE ($1::text IS NULL
                      OR p.participantemail ILIKE $1 ESCAPE '\'
                      OR p.participantfirstname ILIKE $1 ESCAPE '\'
                      OR p.participantlastname ILIKE $1 ESCAPE '\')"#,
            "p.participantid",
            search_filter(query),
            query.page,
        )
        .await
    }

    async fn list_events(&self, query: &ListQuery) -> Result<Page<EventSummary>, DomainError> {
        self.paged::<EventRow, _>(
            "Failed to list events",
            EVENT_COLUMNS,
            r#"FROM event e
               WHERE ($1::text IS NULL
                      OR e.eventname ILIKE $1 ESCAPE '\'
                      OR e.eventtype ILIKE $1 ESCAPE '\')"#,
            "e.eventname",
            search_filter(query),
            query.page,
        )
        .await
    }

    async fn list_surveys(&self, query: &ListQuery) -> Result<Page<SurveySummary>, DomainError> {
        self.paged::<SurveyRow, _>(
            "Failed to list surveys",
            r#"s.surveyid::bigint AS id,
               e.eventname::text AS event_name,
               p.participantfirstname::text AS participant_first_name,
               s.surveyusefulnessscore::int4 AS usefulness,
               s.surveyrecommendationscore::int4 AS recommendation,
               s.surveyoverallscore::int4 AS overall,
               s.surveysubmissiondate::date::text AS submitted_on"#,
            r#"FROM survey s
               JOIN registration r ON s.registrationid = r.registrationid
               JOIN participant p ON r.participantid = p.participantid
               JOIN eventoccurrence o ON r.eventoccurrenceid = o.eventoccurrenceid
               JOIN event e ON o.eventid = e.eventid
               WHERE ($1::text IS NULL OR e.eventname ILIKE $1 ESCAPE '\')"#,
            "s.surveysubmissiondate DESC NULLS LAST, s.surveyid",
            search_filter(query),
            query.page,
        )
        .await
    }

    async fn list_milestones(
        &self,
        query: &ListQuery,
    ) -> Result<Page<MilestoneSummary>, DomainError> {
        self.paged::<MilestoneRow, _>(
            "Failed to list milestones",
            MILESTONE_COLUMNS,
            r#"FROM milestone m
               JOIN participant p ON m.participantid = p.participantid
               WHERE ($1::text IS NULL
                      OR p.participantfirstname ILIKE $1 ESCAPE '\'
                      OR p.participantlastname ILIKE $1 ESCAPE '\'
                      OR m.milestonetitle ILIKE $1 ESCAPE '\')"#,
            "m.milestonedate DESC NULLS LAST, m.milestoneid",
            search_filter(query),
            query.page,
        )
        .await
    }

    async fn list_donations(
        &self,
        query: &ListQuery,
    ) -> Result<Page<DonationSummary>, DomainError> {
        self.paged::<DonationRow, _>(
            "Failed to list donations",
            r#"d.donationid::bigint AS id,
               p.participantfirstname::text AS participant_first_name,
               p.participantlastname::text AS participant_last_name,
               d.donationdate::date::text AS date,
               d.donationamount::text AS amount"#,
            r#"FROM donation d
               JOIN participant p ON d.participantid = p.participantid
               WHERE ($1::text IS NULL
                      OR p.participantfirstname ILIKE $1 ESCAPE '\'
                      OR p.participantlastname ILIKE $1 ESCAPE '\')"#,
            "d.donationdate DESC NULLS LAST, d.donationid",
            search_filter(query),
            query.page,
        )
        .await
    }

    async fn public_events(
        &self,
        event_type: Option<&str>,
        page: PageRequest,
    ) -> Result<Page<EventSummary>, DomainError> {
        self.paged::<EventRow, _>(
            "Failed to list public events",
            EVENT_COLUMNS,
            "FROM event e WHERE ($1::text IS NULL OR e.eventtype = $1)",
            "e.eventname",
            event_type.map(str::to_string),
            page,
        )
        .await
    }

    async fn event_types(&self) -> Result<Vec<String>, DomainError> {
        sqlx::query_scalar(
            r#"
            SELECT DISTINCT eventtype::text
            FROM event
            WHERE eventtype IS NOT NULL
            ORDER BY 1
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list event types", e))
    }

    async fn participant_events(
        &self,
        participant_id: i64,
        page: PageRequest,
    ) -> Result<Page<EventSummary>, DomainError> {
        // $1 carries the participant id as text so the shared paging helper applies.
        self.paged::<EventRow, _>(
            "Failed to list participant events",
            EVENT_COLUMNS,
            r#"FROM event e
               WHERE EXISTS (
                   SELECT 1
                   FROM eventoccurrence o
                   JOIN registration r ON r.eventoccurrenceid = o.eventoccurrenceid
                   WHERE o.eventid = e.eventid
                     AND o.eventdatetimestart IS NOT NULL
                     AND r.participantid::text = $1::text
               )"#,
            "e.eventname, e.eventid",
            Some(participant_id.to_string()),
            page,
        )
        .await
    }

    async fn participant_milestones(
        &self,
        participant_id: i64,
        page: PageRequest,
    ) -> Result<Page<MilestoneSummary>, DomainError> {
        self.paged::<MilestoneRow, _>(
            "Failed to list participant milestones",
            MILESTONE_COLUMNS,
            r#"FROM milestone m
               JOIN participant p ON m.participantid = p.participantid
               WHERE m.participantid::text = $1::text"#,
            "m.milestonedate DESC NULLS LAST, m.milestoneid",
            Some(participant_id.to_string()),
            page,
        )
        .await
    }

    async fn find_participant(&self, id: i64) -> Result<Option<ParticipantSummary>, DomainError> {
        let sql = format!(
            "SELECT {} FROM participant p WHERE p.participantid = $1",
            PARTICIPANT_COLUMNS
        );
        let row: Option<ParticipantRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to load participant", e))?;
        Ok(row.map(Into::into))
    }

    async fn find_participant_by_email(
        &self,
        email: &str,
    ) -> Result<Option<ParticipantSummary>, DomainError> {
        let sql = format!(
            "SELECT {} FROM participant p WHERE p.participantemail = $1 \
             ORDER BY p.participantid LIMIT 1",
            PARTICIPANT_COLUMNS
        );
        let row: Option<ParticipantRow> = sqlx::query_as(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to look up participant", e))?;
        Ok(row.map(Into::into))
    }

    async fn find_event(&self, id: i64) -> Result<Option<EventSummary>, DomainError> {
        let sql = format!("SELECT {} FROM event e WHERE e.eventid = $1", EVENT_COLUMNS);
        let row: Option<EventRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to load event", e))?;
        Ok(row.map(Into::into))
    }

    async fn survey_dates(
        &self,
        participant_id: i64,
        event_id: i64,
    ) -> Result<Vec<NaiveDate>, DomainError> {
        sqlx::query_scalar(
            r#"
            SELECT DISTINCT o.eventdatetimestart::date
            FROM eventoccurrence o
            JOIN registration r ON r.eventoccurrenceid = o.eventoccurrenceid
            WHERE r.participantid = $1
              AND o.eventid = $2
              AND o.eventdatetimestart IS NOT NULL
            ORDER BY 1
            "#,
        )
        .bind(participant_id)
        .bind(event_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list survey dates", e))
    }

    async fn is_available(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}
