//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, pagination and error types
//! that form the vocabulary of the Ella Rises domain.

mod auth;
mod errors;
mod ids;
mod pagination;
mod timestamp;

pub use auth::{AccessLevel, AuthError, AuthenticatedUser};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{RecordId, SessionId};
pub use pagination::{
    total_pages, Page, PageRequest, EVENT_GRID_PAGE_SIZE, MILESTONE_PAGE_SIZE, STAFF_PAGE_SIZE,
};
pub use timestamp::today_utc;
