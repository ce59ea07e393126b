//! ParticipantMilestonesHandler - One participant's milestones, paged.

use serde::Serialize;
use std::sync::Arc;

use crate::domain::foundation::{Page, PageRequest, MILESTONE_PAGE_SIZE};
use crate::domain::records::RecordError;
use crate::ports::{DirectoryReader, MilestoneSummary, ParticipantSummary};

#[derive(Debug, Clone, Serialize)]
pub struct ParticipantMilestones {
    pub participant: ParticipantSummary,
    pub milestones: Page<MilestoneSummary>,
}

pub struct ParticipantMilestonesHandler {
    directory: Arc<dyn DirectoryReader>,
}

impl ParticipantMilestonesHandler {
    pub fn new(directory: Arc<dyn DirectoryReader>) -> Self {
        Self { directory }
    }

    pub async fn handle(
        &self,
        participant_id: i64,
        page: Option<&str>,
    ) -> Result<ParticipantMilestones, RecordError> {
        let participant = self
            .directory
            .find_participant(participant_id)
            .await?
            .ok_or(RecordError::NotFound)?;

        let page = PageRequest::from_query(page, MILESTONE_PAGE_SIZE);
        let milestones = self
            .directory
            .participant_milestones(participant_id, page)
            .await?;

        Ok(ParticipantMilestones {
            participant,
            milestones,
        })
    }
}
