//! Milestones and donations recorded by visitors against their email.

use std::sync::Arc;

use crate::domain::visitor::{DonationForm, MilestoneForm, SubmissionError};
use crate::ports::{DirectoryReader, NewDonation, NewMilestone, SubmissionRepository};

async fn participant_id(
    directory: &dyn DirectoryReader,
    email: &str,
) -> Result<i64, SubmissionError> {
    directory
        .find_participant_by_email(email)
        .await?
        .map(|p| p.id)
        .ok_or(SubmissionError::ParticipantNotFound)
}

pub struct RecordMilestoneHandler {
    directory: Arc<dyn DirectoryReader>,
    submissions: Arc<dyn SubmissionRepository>,
}

impl RecordMilestoneHandler {
    pub fn new(
        directory: Arc<dyn DirectoryReader>,
        submissions: Arc<dyn SubmissionRepository>,
    ) -> Self {
        Self {
            directory,
            submissions,
        }
    }

    pub async fn handle(&self, form: &MilestoneForm) -> Result<NewMilestone, SubmissionError> {
        let submission = form.validate()?;
        let participant_id = participant_id(self.directory.as_ref(), &submission.email).await?;

        let milestone = NewMilestone {
            participant_id,
            title: submission.title,
            date: submission.date,
        };
        self.submissions.insert_milestone(&milestone).await?;

        tracing::info!(participant_id, "milestone recorded");
        Ok(milestone)
    }
}

pub struct RecordDonationHandler {
    directory: Arc<dyn DirectoryReader>,
    submissions: Arc<dyn SubmissionRepository>,
}

impl RecordDonationHandler {
    pub fn new(
        directory: Arc<dyn DirectoryReader>,
        submissions: Arc<dyn SubmissionRepository>,
    ) -> Self {
        Self {
            directory,
            submissions,
        }
    }

    pub async fn handle(&self, form: &DonationForm) -> Result<NewDonation, SubmissionError> {
        let submission = form.validate()?;
        let participant_id = participant_id(self.directory.as_ref(), &submission.email).await?;

        let donation = NewDonation {
            participant_id,
            amount: submission.amount,
            date: submission.date,
        };
        self.submissions.insert_donation(&donation).await?;

        tracing::info!(participant_id, amount = %donation.amount, "donation recorded");
        Ok(donation)
    }
}
