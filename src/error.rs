//! Application error type and its HTTP representation.
//!
//! Every failure a request can hit is an [`AppError`] variant carrying a
//! human-readable message and a JSON `details` payload naming the offending
//! entity. Handlers return `Result<_, AppError>` and axum renders the error
//! through [`IntoResponse`]:
//!
//! ```json
//! { "error": { "code": "duplicate_entry", "message": "...", "details": { ... } } }
//! ```

use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Machine-readable error payload.
#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

/// Request-scoped failure. None of these is fatal to the process.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A required collection (ingredients, tags, shopping cart) is empty.
    #[error("{message}")]
    EmptyCollection { message: String, details: Value },

    /// The same id appears more than once in a request.
    #[error("{message}")]
    DuplicateEntry { message: String, details: Value },

    /// A referenced ingredient or tag does not exist.
    #[error("{message}")]
    UnknownReference { message: String, details: Value },

    /// A user tried to act on themself (e.g. follow themself).
    #[error("{message}")]
    SelfReference { message: String, details: Value },

    /// The relation or record is already present.
    #[error("{message}")]
    AlreadyExists { message: String, details: Value },

    /// Field-level input validation failed.
    #[error("{message}")]
    Validation { message: String, details: Value },

    #[error("{message}")]
    NotFound { message: String, details: Value },

    #[error("{message}")]
    Unauthorized { message: String, details: Value },

    #[error("{message}")]
    Forbidden { message: String, details: Value },

    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn empty_collection(message: impl Into<String>, details: Value) -> Self {
        Self::EmptyCollection {
            message: message.into(),
            details,
        }
    }

    pub fn duplicate_entry(message: impl Into<String>, details: Value) -> Self {
        Self::DuplicateEntry {
            message: message.into(),
            details,
        }
    }

    pub fn unknown_reference(message: impl Into<String>, details: Value) -> Self {
        Self::UnknownReference {
            message: message.into(),
            details,
        }
    }

    pub fn self_reference(message: impl Into<String>, details: Value) -> Self {
        Self::SelfReference {
            message: message.into(),
            details,
        }
    }

    pub fn already_exists(message: impl Into<String>, details: Value) -> Self {
        Self::AlreadyExists {
            message: message.into(),
            details,
        }
    }

    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn unauthorized(message: impl Into<String>, details: Value) -> Self {
        Self::Unauthorized {
            message: message.into(),
            details,
        }
    }

    pub fn forbidden(message: impl Into<String>, details: Value) -> Self {
        Self::Forbidden {
            message: message.into(),
            details,
        }
    }

    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// Stable snake_case identifier exposed to clients.
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyCollection { .. } => "empty_collection",
            Self::DuplicateEntry { .. } => "duplicate_entry",
            Self::UnknownReference { .. } => "unknown_reference",
            Self::SelfReference { .. } => "self_reference",
            Self::AlreadyExists { .. } => "already_exists",
            Self::Validation { .. } => "validation_error",
            Self::NotFound { .. } => "not_found",
            Self::Unauthorized { .. } => "unauthorized",
            Self::Forbidden { .. } => "forbidden",
            Self::Internal { .. } => "internal_error",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::EmptyCollection { .. }
            | Self::DuplicateEntry { .. }
            | Self::UnknownReference { .. }
            | Self::SelfReference { .. }
            | Self::AlreadyExists { .. }
            | Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            Self::Forbidden { .. } => StatusCode::FORBIDDEN,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn to_error_info(&self) -> ErrorInfo {
        let (message, details) = self.parts();
        ErrorInfo {
            code: self.code(),
            message: message.clone(),
            details: details.clone(),
        }
    }

    fn parts(&self) -> (&String, &Value) {
        match self {
            Self::EmptyCollection { message, details }
            | Self::DuplicateEntry { message, details }
            | Self::UnknownReference { message, details }
            | Self::SelfReference { message, details }
            | Self::AlreadyExists { message, details }
            | Self::Validation { message, details }
            | Self::NotFound { message, details }
            | Self::Unauthorized { message, details }
            | Self::Forbidden { message, details }
            | Self::Internal { message, details } => (message, details),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let is_unauthorized = matches!(self, Self::Unauthorized { .. });
        let body = ErrorBody {
            error: self.to_error_info(),
        };

        let mut response = (status, Json(body)).into_response();

        if is_unauthorized {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }

        response
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db) = e.as_database_error() {
            if db.is_unique_violation() {
                return AppError::already_exists(
                    "Record already exists",
                    json!({ "constraint": db.constraint() }),
                );
            }
            if db.is_foreign_key_violation() {
                return AppError::unknown_reference(
                    "Referenced record does not exist",
                    json!({ "constraint": db.constraint() }),
                );
            }
            if db.is_check_violation() {
                return AppError::bad_request(
                    "Check constraint violation",
                    json!({ "constraint": db.constraint() }),
                );
            }
        }

        tracing::error!(error = %e, "Database error");
        AppError::internal("Database error", json!({}))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        let details = serde_json::to_value(e.field_errors()).unwrap_or_else(|_| json!({}));
        AppError::bad_request("Validation failed", details)
    }
}

/// Returns `true` when `e` is a unique violation on the named constraint.
pub fn is_unique_violation_on(e: &sqlx::Error, constraint: &str) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    db_err.is_unique_violation() && db_err.constraint() == Some(constraint)
}
