//! SeaORM error translation helpers.

use sea_orm::{DbErr, SqlErr};
use tracing::{error, warn};

use crate::error::AppError;
use crate::trace_ctx;

fn mentions_sqlstate(msg: &str, code: &str) -> bool {
    msg.contains(code) || msg.contains(&format!("SQLSTATE({code})"))
}

/// True when the error is a unique-constraint violation, on either Postgres
/// or the SQLite test profile.
pub fn is_unique_violation(e: &DbErr) -> bool {
    if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
        return true;
    }
    let msg = e.to_string();
    mentions_sqlstate(&msg, "23505")
        || msg.contains("duplicate key value violates unique constraint")
        || msg.contains("UNIQUE constraint failed")
}

/// Translate a `DbErr` into an `AppError` with sanitized detail.
pub fn map_db_err(e: DbErr) -> AppError {
    let trace_id = trace_ctx::trace_id();

    match &e {
        DbErr::ConnectionAcquire(_) | DbErr::Conn(_) => {
            warn!(trace_id = %trace_id, raw_error = %e, "database unavailable");
            AppError::db_unavailable("Database unavailable")
        }
        DbErr::RecordNotFound(_) => AppError::not_found("RECORD_NOT_FOUND", "Record not found"),
        _ => {
            error!(trace_id = %trace_id, raw_error = %e, "database operation failed");
            AppError::db("Database operation failed")
        }
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::DbErr;

    use super::{is_unique_violation, map_db_err};
    use crate::error::AppError;

    #[test]
    fn postgres_duplicate_key_is_unique_violation() {
        let e = DbErr::Custom(
            "error returned from database: duplicate key value violates unique constraint \
             \"users_pkey\""
                .into(),
        );
        assert!(is_unique_violation(&e));
    }

    #[test]
    fn sqlite_unique_constraint_is_unique_violation() {
        let e = DbErr::Custom("UNIQUE constraint failed: users.id".into());
        assert!(is_unique_violation(&e));
    }

    #[test]
    fn unrelated_error_is_not_unique_violation() {
        let e = DbErr::Custom("syntax error at or near SELECT".into());
        assert!(!is_unique_violation(&e));
    }

    #[test]
    fn connection_error_maps_to_db_unavailable() {
        let mapped = map_db_err(DbErr::Conn(sea_orm::RuntimeErr::Internal(
            "connection refused".into(),
        )));
        assert!(matches!(mapped, AppError::DbUnavailable { .. }));
    }
}
