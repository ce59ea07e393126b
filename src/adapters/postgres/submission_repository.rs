//! PostgreSQL implementation of SubmissionRepository.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;

use super::sql::db_error;
use crate::domain::foundation::DomainError;
use crate::ports::{NewDonation, NewMilestone, NewSurvey, SubmissionRepository};

pub struct PostgresSubmissionRepository {
    pool: PgPool,
}

impl PostgresSubmissionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubmissionRepository for PostgresSubmissionRepository {
    async fn find_occurrence(
        &self,
        event_id: i64,
        date: NaiveDate,
    ) -> Result<Option<i64>, DomainError> {
        sqlx::query_scalar(
            r#"
            SELECT eventoccurrenceid::bigint
            FROM eventoccurrence
            WHERE eventid = $1 AND eventdatetimestart::date = $2
            ORDER BY eventdatetimestart
            LIMIT 1
            "#,
        )
        .bind(event_id)
        .bind(date)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to find event occurrence", e))
    }

    async fn find_registration(
        &self,
        participant_id: i64,
        occurrence_id: i64,
    ) -> Result<Option<i64>, DomainError> {
        sqlx::query_scalar(
            r#"
            SELECT registrationid::bigint
            FROM registration
            WHERE participantid = $1 AND eventoccurrenceid = $2
            ORDER BY registrationid
            LIMIT 1
            "#,
        )
        .bind(participant_id)
        .bind(occurrence_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to find registration", e))
    }

    async fn insert_survey(&self, survey: &NewSurvey) -> Result<(), DomainError> {
        let scores = &survey.scores;
        sqlx::query(
            r#"
            INSERT INTO survey (
                registrationid, surveysatisfactionscore, surveyusefulnessscore,
                surveyinstructorscore, surveyrecommendationscore, surveyoverallscore,
                surveynpsbucket, surveycomments, surveysubmissiondate
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(survey.registration_id)
        .bind(i32::from(scores.satisfaction.value()))
        .bind(i32::from(scores.usefulness.value()))
        .bind(i32::from(scores.instructor.value()))
        .bind(i32::from(scores.recommendation.value()))
        .bind(i32::from(survey.overall))
        .bind(survey.nps_bucket.as_str())
        .bind(&survey.comments)
        .bind(survey.submitted_on)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to save survey", e))?;
        Ok(())
    }

    async fn insert_milestone(&self, milestone: &NewMilestone) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO milestone (participantid, milestonetitle, milestonedate)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(milestone.participant_id)
        .bind(&milestone.title)
        .bind(milestone.date)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to save milestone", e))?;
        Ok(())
    }

    async fn insert_donation(&self, donation: &NewDonation) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO donation (participantid, donationamount, donationdate)
            VALUES ($1, $2::numeric, $3)
            "#,
        )
        .bind(donation.participant_id)
        .bind(donation.amount.as_str())
        .bind(donation.date)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to save donation", e))?;
        Ok(())
    }
}
