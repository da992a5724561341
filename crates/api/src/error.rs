use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use impacto_core::approval::{DecisionError, RegisterError};
use impacto_core::error::CoreError;
use impacto_core::session::SubmitError;
use impacto_core::store::StorageFault;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `impacto_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A write the persistence gateway could not complete.
    #[error(transparent)]
    Storage(#[from] StorageFault),

    /// The report is missing required fields.
    #[error("Incomplete report")]
    IncompleteReport,

    /// The server is missing configuration needed for this request.
    #[error("Server misconfigured: {0}")]
    Misconfigured(String),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<SubmitError> for AppError {
    fn from(err: SubmitError) -> Self {
        match err {
            SubmitError::Incomplete => AppError::IncompleteReport,
            SubmitError::Storage(fault) => AppError::Storage(fault),
        }
    }
}

impl From<DecisionError> for AppError {
    fn from(err: DecisionError) -> Self {
        match err {
            DecisionError::AlreadyProcessed(id) => AppError::Core(CoreError::Conflict(format!(
                "Registration request {id} was already processed"
            ))),
            DecisionError::Storage(fault) => AppError::Storage(fault),
            DecisionError::Core(core) => AppError::Core(core),
        }
    }
}

impl From<RegisterError> for AppError {
    fn from(err: RegisterError) -> Self {
        match err {
            RegisterError::Invalid(core) => AppError::Core(core),
            RegisterError::Storage(fault) => AppError::Storage(fault),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
                CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                    )
                }
            },

            // --- Persistence ---
            // The driver detail was already logged by the gateway.
            AppError::Storage(_) => (
                StatusCode::BAD_GATEWAY,
                "STORAGE_UNAVAILABLE",
                "The record could not be saved. Please try again later".to_string(),
            ),

            // --- HTTP-specific errors ---
            AppError::IncompleteReport => (
                StatusCode::BAD_REQUEST,
                "INCOMPLETE_REPORT",
                "Please complete the required fields".to_string(),
            ),
            AppError::Misconfigured(msg) => {
                tracing::error!(error = %msg, "Server misconfigured");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "CONFIGURATION_ERROR",
                    "Server configuration error".to_string(),
                )
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}
