//! Errors raised while reading or changing managed records.

use thiserror::Error;

use super::catalog::Table;
use crate::domain::credentials::CredentialError;
use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};

#[derive(Debug, Error)]
pub enum RecordError {
    /// The signed-in user may not change records.
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Record not found")]
    NotFound,

    #[error("No primary key found for table {0}")]
    MissingPrimaryKey(Table),

    #[error("No columns found for table {0}")]
    NoColumns(Table),

    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    Credential(#[from] CredentialError),

    #[error("{}", .0.message)]
    Storage(DomainError),
}

impl RecordError {
    pub fn code(&self) -> ErrorCode {
        match self {
            RecordError::Unauthorized => ErrorCode::Forbidden,
            RecordError::NotFound => ErrorCode::RecordNotFound,
            RecordError::MissingPrimaryKey(_) | RecordError::NoColumns(_) => {
                ErrorCode::InternalError
            }
            RecordError::Validation(_) => ErrorCode::ValidationFailed,
            RecordError::Credential(_) => ErrorCode::InternalError,
            RecordError::Storage(err) => err.code,
        }
    }
}

impl From<DomainError> for RecordError {
    fn from(err: DomainError) -> Self {
        if err.code == ErrorCode::RecordNotFound {
            RecordError::NotFound
        } else {
            RecordError::Storage(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_error_shows_driver_message_only() {
        let err = RecordError::from(DomainError::database("duplicate key value"));
        assert_eq!(err.to_string(), "duplicate key value");
        assert_eq!(err.code(), ErrorCode::DatabaseError);
    }

    #[test]
    fn not_found_domain_error_maps_to_not_found() {
        let err = RecordError::from(DomainError::new(ErrorCode::RecordNotFound, "gone"));
        assert!(matches!(err, RecordError::NotFound));
        assert_eq!(err.to_string(), "Record not found");
    }

    #[test]
    fn missing_primary_key_names_table() {
        let err = RecordError::MissingPrimaryKey(Table::Donation);
        assert_eq!(err.to_string(), "No primary key found for table donation");
    }
}
