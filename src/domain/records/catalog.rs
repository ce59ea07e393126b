//! The tables the portal knows how to manage.
//!
//! Only tables listed here are ever named in generated SQL, so the URL
//! segment that picks a table is parsed into [`Table`] before anything
//! reaches the database.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{DomainError, ErrorCode};

/// A managed database table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Table {
    Users,
    Participant,
    Event,
    EventOccurrence,
    Registration,
    Survey,
    Milestone,
    Donation,
}

impl Table {
    pub const ALL: [Table; 8] = [
        Table::Users,
        Table::Participant,
        Table::Event,
        Table::EventOccurrence,
        Table::Registration,
        Table::Survey,
        Table::Milestone,
        Table::Donation,
    ];

    /// Database table name, also used as the URL segment of the generic forms.
    pub fn name(&self) -> &'static str {
        match self {
            Table::Users => "users",
            Table::Participant => "participant",
            Table::Event => "event",
            Table::EventOccurrence => "eventoccurrence",
            Table::Registration => "registration",
            Table::Survey => "survey",
            Table::Milestone => "milestone",
            Table::Donation => "donation",
        }
    }

    /// Primary-key column.
    pub fn primary_key(&self) -> &'static str {
        match self {
            Table::Users => "userid",
            Table::Participant => "participantid",
            Table::Event => "eventid",
            Table::EventOccurrence => "eventoccurrenceid",
            Table::Registration => "registrationid",
            Table::Survey => "surveyid",
            Table::Milestone => "milestoneid",
            Table::Donation => "donationid",
        }
    }

    /// Page to return to after a mutation.
    ///
    /// Occurrences and registrations have no list view of their own, so
    /// they fall back to the dashboard.
    pub fn list_path(&self) -> &'static str {
        match self {
            Table::Users => "/users",
            Table::Participant => "/participants",
            Table::Event => "/events",
            Table::Survey => "/surveys",
            Table::Milestone => "/milestones",
            Table::Donation => "/donations",
            Table::EventOccurrence | Table::Registration => "/dashboard",
        }
    }

    /// Singular display name, e.g. "Participant" or "Event Occurrence".
    pub fn entity_name(&self) -> &'static str {
        match self {
            Table::Users => "User",
            Table::Participant => "Participant",
            Table::Event => "Event",
            Table::EventOccurrence => "Event Occurrence",
            Table::Registration => "Registration",
            Table::Survey => "Survey",
            Table::Milestone => "Milestone",
            Table::Donation => "Donation",
        }
    }

    /// Whether the table has a dedicated list view.
    pub fn has_list_page(&self) -> bool {
        self.list_path() != "/dashboard"
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Table {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Table::ALL
            .into_iter()
            .find(|t| t.name() == s)
            .ok_or_else(|| {
                DomainError::new(ErrorCode::UnknownTable, format!("Unknown table '{}'", s))
                    .with_detail("table", s)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_table_names() {
        assert_eq!("participant".parse::<Table>().unwrap(), Table::Participant);
        assert_eq!("eventoccurrence".parse::<Table>().unwrap(), Table::EventOccurrence);
        assert_eq!("users".parse::<Table>().unwrap(), Table::Users);
    }

    #[test]
    fn rejects_unknown_and_plural_names() {
        let err = "participants".parse::<Table>().unwrap_err();
        assert_eq!(err.code, ErrorCode::UnknownTable);
        assert!("pg_user".parse::<Table>().is_err());
        assert!("users; drop table users".parse::<Table>().is_err());
    }

    #[test]
    fn primary_keys_follow_table_names() {
        for table in Table::ALL {
            let expected = if table == Table::Users {
                "userid".to_string()
            } else {
                format!("{}id", table.name())
            };
            assert_eq!(table.primary_key(), expected);
        }
    }

    #[test]
    fn list_paths_pluralise_except_users() {
        assert_eq!(Table::Users.list_path(), "/users");
        assert_eq!(Table::Participant.list_path(), "/participants");
        assert_eq!(Table::Donation.list_path(), "/donations");
        assert_eq!(Table::Registration.list_path(), "/dashboard");
    }
}
