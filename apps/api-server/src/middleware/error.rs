//! Error handling - maps operation outcomes to status codes and JSON bodies.

use actix_web::error::JsonPayloadError;
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode};
use quill_core::DomainError;
use quill_shared::ErrorResponse;
use std::fmt;

/// Application-level error type rendered as `{message, errors?, error?}`.
#[derive(Debug)]
pub enum AppError {
    NotFound,
    BadRequest { message: String, detail: String },
    Validation(Vec<String>),
    Internal { message: &'static str, detail: String },
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound => write!(f, "Post not found"),
            AppError::BadRequest { message, detail } => write!(f, "{}: {}", message, detail),
            AppError::Validation(errors) => write!(f, "Validation errors: {:?}", errors),
            AppError::Internal { message, detail } => write!(f, "{}: {}", message, detail),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::BadRequest { .. } | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            AppError::NotFound => ErrorResponse::not_found(),
            AppError::BadRequest { message, detail } => {
                ErrorResponse::new(message.as_str()).with_error(detail.as_str())
            }
            AppError::Validation(errors) => ErrorResponse::validation(errors.clone()),
            AppError::Internal { message, detail } => {
                tracing::error!(error = %detail, "{}", message);
                ErrorResponse::new(*message).with_error(detail.as_str())
            }
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}

impl AppError {
    /// Map a domain outcome, using `failure` as the message for backend errors.
    pub fn from_domain(err: DomainError, failure: &'static str) -> Self {
        match err {
            DomainError::Validation(errors) => AppError::Validation(errors.messages()),
            DomainError::NotFound { .. } => AppError::NotFound,
            DomainError::Configuration(detail) => {
                tracing::error!(error = %detail, "Database is not configured");
                AppError::Internal {
                    message: failure,
                    detail,
                }
            }
            DomainError::Backend(detail) => AppError::Internal {
                message: failure,
                detail,
            },
        }
    }
}

/// Attach the operation's failure message while converting a domain result.
pub trait DomainResultExt<T> {
    fn on_failure(self, failure: &'static str) -> AppResult<T>;
}

impl<T> DomainResultExt<T> for Result<T, DomainError> {
    fn on_failure(self, failure: &'static str) -> AppResult<T> {
        self.map_err(|err| AppError::from_domain(err, failure))
    }
}

/// Render body parse failures in the same JSON shape as every other error.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::BadRequest {
        message: "Invalid request body".to_string(),
        detail: err.to_string(),
    }
    .into()
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;
