use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use rsvp_core::error::CoreError;
use rsvp_db::error::StoreError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] and [`StoreError`] and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `rsvp_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// An invitation or response store error from `rsvp_db`.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

type Classified = (StatusCode, &'static str, String);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(core) => classify_core_error(core),
            AppError::Store(store) => classify_store_error(store),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

fn internal() -> Classified {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}

fn classify_core_error(err: &CoreError) -> Classified {
    match err {
        CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
        CoreError::InvalidPhoneNumber { .. } => (
            StatusCode::BAD_REQUEST,
            "INVALID_PHONE_NUMBER",
            err.to_string(),
        ),
        CoreError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone()),
        CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
        CoreError::RandomSource(msg) => {
            tracing::error!(error = %msg, "Secure random source failed");
            internal()
        }
    }
}

fn classify_store_error(err: &StoreError) -> Classified {
    match err {
        StoreError::NotFound { .. } | StoreError::InvitationNotFound(_) => {
            (StatusCode::NOT_FOUND, "NOT_FOUND", err.to_string())
        }
        StoreError::DuplicatePhone => (StatusCode::CONFLICT, "DUPLICATE_PHONE", err.to_string()),
        StoreError::DuplicateToken => (StatusCode::CONFLICT, "DUPLICATE_TOKEN", err.to_string()),
        StoreError::Core(core) => classify_core_error(core),
        StoreError::TokenGenerationExhausted { .. }
        | StoreError::TransactionFailed(_)
        | StoreError::Database(_) => {
            tracing::error!(error = %err, "Store error");
            internal()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn store_errors_map_to_http_statuses() {
        assert_eq!(
            status_of(StoreError::not_found("Invitation", "abc").into()),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(StoreError::InvitationNotFound(3).into()),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(StoreError::DuplicatePhone.into()),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(StoreError::DuplicateToken.into()),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(StoreError::TokenGenerationExhausted { attempts: 5 }.into()),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_of(StoreError::Database(sqlx::Error::PoolTimedOut).into()),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn wrapped_core_errors_keep_their_status() {
        let invalid_phone = CoreError::InvalidPhoneNumber {
            input: "abc".into(),
        };
        assert_eq!(
            status_of(StoreError::Core(invalid_phone).into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(CoreError::Forbidden("closed".into()).into()),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            status_of(CoreError::Unauthorized("no".into()).into()),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(CoreError::RandomSource("entropy".into()).into()),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
