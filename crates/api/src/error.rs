use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use showroom_cloud::StorageError;
use showroom_core::error::CoreError;

/// Error returned by every handler.
///
/// Renders as `{"error": message, "code": CODE}`. Internal failures are
/// logged here and reach the client only as a generic message.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Object storage failure while writing or removing a photo.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Malformed request outside the domain rules (multipart framing,
    /// missing file parts).
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

pub type AppResult<T> = Result<T, AppError>;

type ErrorParts = (StatusCode, &'static str, String);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(core) => classify_core_error(core),
            AppError::Database(err) => classify_sqlx_error(err),
            AppError::Storage(err) => classify_storage_error(err),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal()
            }
        };

        (status, axum::Json(json!({ "error": message, "code": code }))).into_response()
    }
}

fn internal() -> ErrorParts {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}

fn classify_core_error(err: &CoreError) -> ErrorParts {
    match err {
        CoreError::NotFound { entity, id } => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{entity} with id {id} not found"),
        ),
        CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
        CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
        CoreError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone()),
        CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
        CoreError::Configuration(msg) | CoreError::Internal(msg) => {
            tracing::error!(error = %msg, "Internal core error");
            internal()
        }
    }
}

/// Bad object paths are caller mistakes; an unreachable bucket is an
/// upstream failure; anything else is ours.
fn classify_storage_error(err: &StorageError) -> ErrorParts {
    match err {
        StorageError::InvalidPath(path) => (
            StatusCode::BAD_REQUEST,
            "BAD_REQUEST",
            format!("Invalid object path '{path}'"),
        ),
        StorageError::Backend(msg) => {
            tracing::error!(error = %msg, "Object storage backend failed");
            (
                StatusCode::BAD_GATEWAY,
                "STORAGE_UNAVAILABLE",
                "Object storage is unavailable".to_string(),
            )
        }
        StorageError::Config(_) | StorageError::Io(_) => {
            tracing::error!(error = %err, "Storage error");
            internal()
        }
    }
}

// PostgreSQL SQLSTATE codes.
const UNIQUE_VIOLATION: &str = "23505";
const FOREIGN_KEY_VIOLATION: &str = "23503";
const CHECK_VIOLATION: &str = "23514";

/// Client-facing message for a violated unique constraint.
fn unique_violation_message(constraint: &str) -> String {
    match constraint {
        "uq_vehicle_images_key_slot" => "That key image slot is already occupied".to_string(),
        "uq_stores_name" => "A store with that name already exists".to_string(),
        "uq_vehicles_store_stock_number" => {
            "That stock number is already used in this store".to_string()
        }
        other => format!("Duplicate value violates unique constraint: {other}"),
    }
}

/// Map a sqlx error onto the response envelope.
///
/// - `RowNotFound` is a 404.
/// - `uq_*` unique violations are a 409 with a per-constraint message.
/// - A dangling store or vehicle reference (the parent was deleted
///   concurrently) is a 404.
/// - `ck_*` check violations are a 400.
/// - Everything else is a 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> ErrorParts {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) => {
            let constraint = db_err.constraint().unwrap_or("unknown");
            match db_err.code().as_deref() {
                Some(UNIQUE_VIOLATION) if constraint.starts_with("uq_") => (
                    StatusCode::CONFLICT,
                    "CONFLICT",
                    unique_violation_message(constraint),
                ),
                Some(FOREIGN_KEY_VIOLATION) => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    "The referenced store or vehicle no longer exists".to_string(),
                ),
                Some(CHECK_VIOLATION) if constraint.starts_with("ck_") => (
                    StatusCode::BAD_REQUEST,
                    "VALIDATION_ERROR",
                    format!("Value rejected by constraint: {constraint}"),
                ),
                _ => {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_slot_conflict_has_a_readable_message() {
        assert_eq!(
            unique_violation_message("uq_vehicle_images_key_slot"),
            "That key image slot is already occupied"
        );
        assert!(unique_violation_message("uq_other").contains("uq_other"));
    }

    #[test]
    fn core_errors_map_to_status() {
        let cases = [
            (
                CoreError::NotFound {
                    entity: "Vehicle",
                    id: 3,
                },
                StatusCode::NOT_FOUND,
            ),
            (CoreError::Validation("x".into()), StatusCode::BAD_REQUEST),
            (CoreError::Conflict("x".into()), StatusCode::CONFLICT),
            (CoreError::Forbidden("x".into()), StatusCode::FORBIDDEN),
            (
                CoreError::Configuration("x".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(AppError::Core(err).into_response().status(), status);
        }
    }

    #[test]
    fn storage_errors_map_to_status() {
        let invalid = AppError::Storage(StorageError::InvalidPath("../x".into()));
        assert_eq!(invalid.into_response().status(), StatusCode::BAD_REQUEST);

        let backend = AppError::Storage(StorageError::Backend("timeout".into()));
        assert_eq!(backend.into_response().status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn row_not_found_is_404() {
        let (status, code, _) = classify_sqlx_error(&sqlx::Error::RowNotFound);
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(code, "NOT_FOUND");
    }
}
