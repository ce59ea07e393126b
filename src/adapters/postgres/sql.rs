//! Small helpers shared by the PostgreSQL adapters.

use crate::domain::foundation::{DomainError, ErrorCode};

/// Double-quotes an identifier, doubling embedded quotes.
pub(super) fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// `%search%` for `ILIKE ... ESCAPE '\'`, with LIKE metacharacters escaped.
pub(super) fn contains_pattern(search: &str) -> String {
    let mut pattern = String::with_capacity(search.len() + 2);
    pattern.push('%');
    for c in search.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Maps a driver error, keeping the server's message for constraint and
/// type errors so it can be shown next to the form.
pub(super) fn db_error(context: &str, e: sqlx::Error) -> DomainError {
    tracing::error!(error = %e, "{}", context);
    match &e {
        sqlx::Error::Database(db) => DomainError::new(ErrorCode::DatabaseError, db.message()),
        _ => DomainError::new(ErrorCode::DatabaseError, format!("{}: {}", context, e)),
    }
}

/// Page offset and limit as the `i64` values PostgreSQL binds.
pub(super) fn window(page: crate::domain::foundation::PageRequest) -> (i64, i64) {
    (page.limit() as i64, page.offset() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_ident_wraps_and_escapes() {
        assert_eq!(quote_ident("participantid"), "\"participantid\"");
        assert_eq!(quote_ident("we\"ird"), "\"we\"\"ird\"");
    }

    #[test]
    fn contains_pattern_escapes_wildcards() {
        assert_eq!(contains_pattern("ana"), "%ana%");
        assert_eq!(contains_pattern("50%_off\\"), "%50\\%\\_off\\\\%");
    }

    #[test]
    fn non_database_errors_keep_context() {
        let err = db_error("Failed to list users", sqlx::Error::RowNotFound);
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert!(err.message.starts_with("Failed to list users"));
    }

    #[test]
    fn window_is_limit_then_offset() {
        let page = crate::domain::foundation::PageRequest::new(3, 10);
        assert_eq!(window(page), (10, 20));
    }
}
