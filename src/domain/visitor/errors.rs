//! Errors raised while handling visitor submissions.

use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};

#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("{0}")]
    Invalid(#[from] ValidationError),

    #[error("Cannot find participant")]
    ParticipantNotFound,

    #[error("Event not found")]
    EventNotFound,

    #[error("No occurrence of this event on {0}")]
    OccurrenceNotFound(NaiveDate),

    #[error("No registration found for this occurrence")]
    RegistrationNotFound,

    #[error("{}", .0.message)]
    Storage(#[from] DomainError),
}

impl SubmissionError {
    pub fn code(&self) -> ErrorCode {
        match self {
            SubmissionError::Invalid(_) => ErrorCode::ValidationFailed,
            SubmissionError::ParticipantNotFound => ErrorCode::ParticipantNotFound,
            SubmissionError::EventNotFound => ErrorCode::EventNotFound,
            SubmissionError::OccurrenceNotFound(_) => ErrorCode::OccurrenceNotFound,
            SubmissionError::RegistrationNotFound => ErrorCode::RegistrationNotFound,
            SubmissionError::Storage(err) => err.code,
        }
    }
}
