//! Calendar helpers.

use chrono::{NaiveDate, Utc};

/// Today's calendar date in UTC.
///
/// Event listings split on this date and survey forms default to it.
pub fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}
