//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Data Ports
//!
//! - `UserRepository` - Portal accounts
//! - `DirectoryReader` - List pages and visitor lookups
//! - `SchemaInspector` - Column metadata for generic forms
//! - `RecordRepository` - Generic fetch/insert/update/delete by table
//! - `SubmissionRepository` - Visitor surveys, milestones and donations
//!
//! ## Session Ports
//!
//! - `SessionStore` - Server-side login sessions

mod directory_reader;
mod record_repository;
mod schema_inspector;
mod session_store;
mod submission_repository;
mod user_repository;

pub use directory_reader::{
    DirectoryReader, DonationSummary, EventSummary, ListQuery, MilestoneSummary,
    ParticipantSummary, SurveySummary, UserSummary,
};
pub use record_repository::RecordRepository;
pub use schema_inspector::SchemaInspector;
pub use session_store::{SessionStore, SessionStoreError};
pub use submission_repository::{NewDonation, NewMilestone, NewSurvey, SubmissionRepository};
pub use user_repository::{NewUser, UserRecord, UserRepository, UserUpdate};
