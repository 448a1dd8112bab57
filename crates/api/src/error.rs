use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use petal_core::error::CoreError;
use petal_db::error::DbError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`DbError`] for data-access
/// failures, and adds HTTP-specific variants. Implements [`IntoResponse`]
/// so every non-2xx response carries the same JSON shape:
/// `{ "error": summary, "message": detail, "code": CODE }`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `petal_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A failure from the repository layer.
    #[error(transparent)]
    Database(#[from] DbError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),

    /// No route matches the request path.
    #[error("No route for {0}")]
    RouteNotFound(String),

    /// The path exists but does not accept this method.
    #[error("{method} is not allowed on {path}")]
    MethodNotAllowed { method: String, path: String },

    /// The request outlived the server's request timeout.
    #[error("Request timed out")]
    Timeout,
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

/// Status, machine code, summary and detail for one error.
type Classified = (StatusCode, &'static str, &'static str, String);

const SANITIZED: &str = "An internal error occurred";

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, error, message) = match &self {
            AppError::Core(core) => classify_core(core),
            AppError::Database(db) => classify_db(db),
            AppError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                "BAD_REQUEST",
                "Bad request",
                msg.clone(),
            ),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "Internal server error",
                    SANITIZED.to_string(),
                )
            }
            AppError::RouteNotFound(_) => (
                StatusCode::NOT_FOUND,
                "ROUTE_NOT_FOUND",
                "Not found",
                self.to_string(),
            ),
            AppError::MethodNotAllowed { .. } => (
                StatusCode::METHOD_NOT_ALLOWED,
                "METHOD_NOT_ALLOWED",
                "Method not allowed",
                self.to_string(),
            ),
            AppError::Timeout => (
                StatusCode::REQUEST_TIMEOUT,
                "REQUEST_TIMEOUT",
                "Request timeout",
                "The request took too long to complete".to_string(),
            ),
        };

        let body = json!({
            "error": error,
            "message": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

fn classify_core(err: &CoreError) -> Classified {
    match err {
        CoreError::NotFound { entity, id } => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Not found",
            format!("{entity} with id {id} not found"),
        ),
        CoreError::Validation(msg) => (
            StatusCode::BAD_REQUEST,
            "VALIDATION_ERROR",
            "Validation failed",
            msg.clone(),
        ),
        CoreError::Internal(msg) => {
            tracing::error!(error = %msg, "Internal core error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "Internal server error",
                SANITIZED.to_string(),
            )
        }
    }
}

/// Classify a data-access error.
///
/// - Malformed identifiers map to 400.
/// - Connection and query failures map to 500 with the underlying detail
///   in `message`.
fn classify_db(err: &DbError) -> Classified {
    match err {
        DbError::InvalidId(id) => (
            StatusCode::BAD_REQUEST,
            "INVALID_ID",
            "Invalid identifier",
            format!("'{id}' is not a valid identifier"),
        ),
        DbError::Connection(detail) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "DATABASE_UNAVAILABLE",
            "Database connection failed",
            detail.clone(),
        ),
        DbError::DataAccess(detail) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "DATABASE_ERROR",
            "Database operation failed",
            detail.clone(),
        ),
        DbError::Core(core) => classify_core(core),
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}
