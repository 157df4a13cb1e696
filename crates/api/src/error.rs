use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use ens_core::error::CoreError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `ens_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Status, machine-readable code and client-facing message for this error.
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::Core(core) => core_parts(core),
            AppError::Database(err) => classify_sqlx_error(err),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal()
            }
        }
    }
}

fn core_parts(core: &CoreError) -> (StatusCode, &'static str, String) {
    match core {
        CoreError::NotFound { entity, id } => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{entity} with id {id} not found"),
        ),
        CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
        CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
        CoreError::InvalidReference(msg) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            "INVALID_REFERENCE",
            msg.clone(),
        ),
        CoreError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone()),
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// `RowNotFound` is a 404 and constraint violations the client caused map
/// through [`constraint_violation`]. Everything else is a 500 with a
/// sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) => {
            match constraint_violation(db_err.code().as_deref(), db_err.constraint()) {
                Some(core) => core_parts(&core),
                None => {
                    tracing::error!(error = %db_err, "Database error");
                    internal()
                }
            }
        }
        other => {
            tracing::error!(error = %other, "Database error");
            internal()
        }
    }
}

/// Domain error for a PostgreSQL constraint violation.
///
/// - `unique_violation` (23505) on a constraint named `uq_*` is a conflict.
/// - `foreign_key_violation` (23503) is an invalid reference.
fn constraint_violation(code: Option<&str>, constraint: Option<&str>) -> Option<CoreError> {
    let constraint = constraint.unwrap_or("unknown");
    match code {
        Some("23505") if constraint.starts_with("uq_") => Some(CoreError::Conflict(format!(
            "Duplicate value violates unique constraint: {constraint}"
        ))),
        Some("23503") => Some(CoreError::InvalidReference(format!(
            "Referenced entity does not exist: {constraint}"
        ))),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn core_errors_map_to_statuses() {
        let cases = [
            (CoreError::not_found("batch", "x"), StatusCode::NOT_FOUND),
            (CoreError::Validation("bad".into()), StatusCode::BAD_REQUEST),
            (CoreError::Conflict("dup".into()), StatusCode::CONFLICT),
            (
                CoreError::InvalidReference("nope".into()),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (CoreError::Unauthorized("who".into()), StatusCode::UNAUTHORIZED),
        ];
        for (err, status) in cases {
            assert_eq!(AppError::Core(err).parts().0, status);
        }
    }

    #[test]
    fn not_found_message_names_entity() {
        let (_, code, message) = AppError::Core(CoreError::not_found("notification", "abc")).parts();
        assert_eq!(code, "NOT_FOUND");
        assert_eq!(message, "notification with id abc not found");
    }

    #[test]
    fn internal_details_are_not_leaked() {
        let (_, _, message) = AppError::InternalError("secret stack".into()).parts();
        assert_eq!(message, "An internal error occurred");
    }

    #[test]
    fn unique_violation_on_named_constraint_is_conflict() {
        let err = constraint_violation(Some("23505"), Some("uq_users_name")).unwrap();
        assert_matches!(&err, CoreError::Conflict(msg) if msg.ends_with("uq_users_name"));

        let (status, code, _) = AppError::Core(err).parts();
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(code, "CONFLICT");
    }

    #[test]
    fn foreign_key_violation_is_invalid_reference() {
        let err = constraint_violation(Some("23503"), Some("fk_groups_template")).unwrap();
        assert_matches!(err, CoreError::InvalidReference(_));
    }

    #[test]
    fn other_violations_are_not_domain_errors() {
        assert!(constraint_violation(Some("23505"), Some("users_pkey")).is_none());
        assert!(constraint_violation(Some("23505"), None).is_none());
        assert!(constraint_violation(Some("40001"), None).is_none());
        assert!(constraint_violation(None, None).is_none());
    }

    #[test]
    fn row_not_found_is_404() {
        assert_eq!(
            AppError::Database(sqlx::Error::RowNotFound).parts().0,
            StatusCode::NOT_FOUND
        );
    }
}
