use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, warn};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::ValidationErrors;

use crate::database::repository::RepositoryError;
use crate::middleware::request_logger::current_request_id;

pub type Result<T> = std::result::Result<T, ApiError>;

/// Error codes for categorizing errors
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub enum ErrorCode {
    // Validation errors (3xxx)
    #[serde(rename = "VAL_3001")]
    InvalidInput,
    #[serde(rename = "VAL_3002")]
    MissingRequiredField,
    #[serde(rename = "VAL_3003")]
    InvalidFormat,

    // Resource errors (4xxx)
    #[serde(rename = "RES_4001")]
    NotFound,

    // Database errors (7xxx)
    #[serde(rename = "DB_7001")]
    DatabaseConnectionFailed,
    #[serde(rename = "DB_7002")]
    QueryFailed,

    // External service errors (8xxx)
    #[serde(rename = "EXT_8005")]
    ServiceUnavailable,
}

impl ErrorCode {
    /// Get numeric code
    pub fn code(&self) -> u16 {
        match self {
            ErrorCode::InvalidInput => 3001,
            ErrorCode::MissingRequiredField => 3002,
            ErrorCode::InvalidFormat => 3003,
            ErrorCode::NotFound => 4001,
            ErrorCode::DatabaseConnectionFailed => 7001,
            ErrorCode::QueryFailed => 7002,
            ErrorCode::ServiceUnavailable => 8005,
        }
    }

    /// Get user-friendly message
    pub fn message(&self) -> &'static str {
        match self {
            ErrorCode::InvalidInput => "Invalid input provided",
            ErrorCode::MissingRequiredField => "Required field is missing",
            ErrorCode::InvalidFormat => "Invalid format provided",
            ErrorCode::NotFound => "The requested resource was not found",
            ErrorCode::DatabaseConnectionFailed => "Database connection failed",
            ErrorCode::QueryFailed => "Database query failed",
            ErrorCode::ServiceUnavailable => "Service is currently unavailable",
        }
    }

    /// HTTP status this code is reported with
    pub fn status(&self) -> StatusCode {
        match self {
            ErrorCode::InvalidInput
            | ErrorCode::MissingRequiredField
            | ErrorCode::InvalidFormat => StatusCode::BAD_REQUEST,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::ServiceUnavailable | ErrorCode::DatabaseConnectionFailed => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            ErrorCode::QueryFailed => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Structured error response.
///
/// `message` sits at the top level so clients can read `$.message` directly.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub message: String,
    pub code: ErrorCode,
    pub code_number: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    pub request_id: String,
    pub timestamp: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Validation failed: {field}: {message}")]
    ValidationWithField {
        code: ErrorCode,
        field: String,
        message: String,
    },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("{1}")]
    WithCode(ErrorCode, String),

    #[error("{1}")]
    WithCodeAndDetails(ErrorCode, String, String),
}

impl ApiError {
    /// Create error with specific error code
    pub fn with_code(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError::WithCode(code, message.into())
    }

    /// Create error with code and additional details
    pub fn with_details(
        code: ErrorCode,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        ApiError::WithCodeAndDetails(code, message.into(), details.into())
    }

    /// Create validation error for specific field
    pub fn validation_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        ApiError::ValidationWithField {
            code: ErrorCode::InvalidInput,
            field: field.into(),
            message: message.into(),
        }
    }

    /// Helper: Resource not found
    pub fn not_found(resource: &str) -> Self {
        ApiError::NotFound(format!("{} not found", resource))
    }

    /// Get error code
    pub fn error_code(&self) -> ErrorCode {
        match self {
            ApiError::ValidationWithField { code, .. } => *code,
            ApiError::NotFound(_) => ErrorCode::NotFound,
            ApiError::Database(sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed) => {
                ErrorCode::DatabaseConnectionFailed
            }
            ApiError::Database(_) => ErrorCode::QueryFailed,
            ApiError::ServiceUnavailable(_) => ErrorCode::ServiceUnavailable,
            ApiError::WithCode(code, _) => *code,
            ApiError::WithCodeAndDetails(code, _, _) => *code,
        }
    }

    /// Get status code
    pub fn status_code(&self) -> StatusCode {
        self.error_code().status()
    }

    /// Message shown to the client. Server-side faults never leak their cause.
    fn client_message(&self) -> String {
        match self {
            ApiError::NotFound(msg)
            | ApiError::WithCode(_, msg)
            | ApiError::WithCodeAndDetails(_, msg, _) => msg.clone(),
            ApiError::ValidationWithField { message, .. } => message.clone(),
            _ => self.error_code().message().to_string(),
        }
    }

    fn error_details(&self) -> Option<String> {
        match self {
            ApiError::WithCodeAndDetails(_, _, details) => Some(details.clone()),
            _ => None,
        }
    }

    fn error_field(&self) -> Option<String> {
        match self {
            ApiError::ValidationWithField { field, .. } => Some(field.clone()),
            _ => None,
        }
    }

    /// Log error with appropriate level
    fn log_error(&self, request_id: &str) {
        match self.status_code() {
            status if status.is_server_error() => {
                error!(
                    request_id = %request_id,
                    error = %self,
                    "Server error occurred"
                );
            }
            status if status.is_client_error() => {
                warn!(
                    request_id = %request_id,
                    error = %self,
                    "Client error occurred"
                );
            }
            _ => {}
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let request_id =
            current_request_id().unwrap_or_else(|| Uuid::new_v4().to_string());
        let status = self.status_code();

        self.log_error(&request_id);

        // Not-found carries no body
        if status == StatusCode::NOT_FOUND {
            return status.into_response();
        }

        let code = self.error_code();
        let error_response = ErrorResponse {
            message: self.client_message(),
            code,
            code_number: code.code(),
            field: self.error_field(),
            details: self.error_details(),
            request_id,
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        (status, Json(error_response)).into_response()
    }
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(id) => ApiError::NotFound(format!("Tutorial {} not found", id)),
            RepositoryError::Database(e) => ApiError::Database(e),
        }
    }
}

impl From<ValidationErrors> for ApiError {
    /// Surfaces the first failing field (alphabetical) with its message.
    fn from(errors: ValidationErrors) -> Self {
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));

        let first = fields.into_iter().find_map(|(field, errs)| {
            errs.first().map(|e| {
                let message = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value for {}", field));
                let code = if e.code == "required" {
                    ErrorCode::MissingRequiredField
                } else {
                    ErrorCode::InvalidInput
                };
                (field.to_string(), message, code)
            })
        });

        match first {
            Some((field, message, code)) => ApiError::ValidationWithField {
                code,
                field,
                message,
            },
            None => ApiError::with_code(ErrorCode::InvalidInput, ErrorCode::InvalidInput.message()),
        }
    }
}

/// Handle Axum JSON rejections and convert to structured API errors
impl From<JsonRejection> for ApiError {
    fn from(err: JsonRejection) -> Self {
        match err {
            JsonRejection::JsonDataError(e) => ApiError::with_details(
                ErrorCode::InvalidInput,
                "Invalid input provided",
                e.body_text(),
            ),
            JsonRejection::JsonSyntaxError(_) => {
                ApiError::with_code(ErrorCode::InvalidFormat, "Invalid JSON format")
            }
            JsonRejection::MissingJsonContentType(_) => {
                ApiError::with_code(ErrorCode::InvalidFormat, "JSON content type required")
            }
            JsonRejection::BytesRejection(_) => {
                ApiError::with_code(ErrorCode::InvalidInput, "Invalid request body format")
            }
            _ => ApiError::with_details(
                ErrorCode::InvalidInput,
                "Invalid input provided",
                err.body_text(),
            ),
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(err: PathRejection) -> Self {
        ApiError::with_details(
            ErrorCode::InvalidFormat,
            "Invalid path parameter",
            err.body_text(),
        )
    }
}
