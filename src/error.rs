use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Error type shared by services and HTTP handlers.
///
/// Business conditions (slot taken, illegal transition) are ordinary variants,
/// not panics; each maps to a stable `code` string in the JSON body.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Forbidden(&'static str),

    #[error("{0}")]
    Conflict(String),

    /// The slot stopped being bookable between selection and submission.
    #[error("This time slot is no longer available, please pick another time")]
    SlotNoLongerAvailable,

    #[error("{0}")]
    InvalidTransition(String),

    /// The database could not be reached. Every operation is safe to retry.
    #[error("Storage temporarily unavailable")]
    PersistenceUnavailable(#[source] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Forbidden(_) => "FORBIDDEN",
            AppError::Conflict(_) => "CONFLICT",
            AppError::SlotNoLongerAvailable => "SLOT_NO_LONGER_AVAILABLE",
            AppError::InvalidTransition(_) => "INVALID_TRANSITION",
            AppError::PersistenceUnavailable(_) => "PERSISTENCE_UNAVAILABLE",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Conflict(_)
            | AppError::SlotNoLongerAvailable
            | AppError::InvalidTransition(_) => StatusCode::CONFLICT,
            AppError::PersistenceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => AppError::PersistenceUnavailable(e),
            sqlx::Error::RowNotFound => AppError::NotFound("Record"),
            sqlx::Error::Database(ref db) if db.is_foreign_key_violation() => {
                AppError::Conflict("Record is still referenced by other data".into())
            }
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                AppError::Conflict("Record already exists".into())
            }
            other => AppError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "internal error");
                "An internal error occurred".to_string()
            }
            AppError::PersistenceUnavailable(e) => {
                tracing::warn!(error = %e, "database unavailable");
                self.to_string()
            }
            _ => self.to_string(),
        };
        (status, Json(json!({ "error": message, "code": self.code() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn business_conditions_map_to_conflict() {
        assert_eq!(AppError::SlotNoLongerAvailable.status(), StatusCode::CONFLICT);
        assert_eq!(
            AppError::InvalidTransition("booked".into()).code(),
            "INVALID_TRANSITION"
        );
    }

    #[test]
    fn pool_timeout_is_retryable_unavailability() {
        let err = AppError::from(sqlx::Error::PoolTimedOut);
        assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(err.code(), "PERSISTENCE_UNAVAILABLE");
    }

    #[test]
    fn missing_row_is_not_found() {
        let err = AppError::from(sqlx::Error::RowNotFound);
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }
}
