//! Visitor submission port.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::foundation::DomainError;
use crate::domain::visitor::{DonationAmount, NpsBucket, SurveyScores};

/// Writes visitor surveys, milestones and donations.
#[async_trait]
pub trait SubmissionRepository: Send + Sync {
    /// Occurrence of the event starting on the given calendar date.
    async fn find_occurrence(
        &self,
        event_id: i64,
        date: NaiveDate,
    ) -> Result<Option<i64>, DomainError>;

    /// Registration of the participant for the occurrence.
    async fn find_registration(
        &self,
        participant_id: i64,
        occurrence_id: i64,
    ) -> Result<Option<i64>, DomainError>;

    async fn insert_survey(&self, survey: &NewSurvey) -> Result<(), DomainError>;

    async fn insert_milestone(&self, milestone: &NewMilestone) -> Result<(), DomainError>;

    async fn insert_donation(&self, donation: &NewDonation) -> Result<(), DomainError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSurvey {
    pub registration_id: i64,
    pub scores: SurveyScores,
    pub overall: u8,
    pub nps_bucket: NpsBucket,
    pub comments: Option<String>,
    pub submitted_on: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMilestone {
    pub participant_id: i64,
    pub title: String,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDonation {
    pub participant_id: i64,
    pub amount: DonationAmount,
    pub date: NaiveDate,
}
