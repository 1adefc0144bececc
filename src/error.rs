//! HTTP-facing error type.
//!
//! Handlers never see raw strategy errors; they receive a structured
//! [`crate::domain::resolution::ResolutionResult`] and turn failures into
//! [`AppError`] values here.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use validator::ValidationErrors;

use crate::domain::resolution::{FailureOutcome, ResolutionResult};

#[derive(Serialize)]
struct ErrorBody {
    status: &'static str,
    response_code: u16,
    error: ErrorInfo,
}

/// Machine-readable error code, human-readable message and context.
#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug)]
pub enum AppError {
    Validation {
        message: String,
        details: Value,
    },
    NotFound {
        message: String,
        details: Value,
    },
    Forbidden {
        status: StatusCode,
        message: String,
        details: Value,
    },
    Upstream {
        status: StatusCode,
        message: String,
        details: Value,
    },
    Internal {
        message: String,
        details: Value,
    },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    /// Builds the error for an unresolved result.
    ///
    /// Details carry `original_url` as the caller sent it, the remediation
    /// hint when one applies, and the per-strategy attempt trace.
    pub fn from_failure(
        outcome: FailureOutcome,
        original_url: &str,
        result: &ResolutionResult,
    ) -> Self {
        let details = json!({
            "original_url": original_url,
            "hint": outcome.hint(),
            "attempts": result.attempts(),
        });
        let message = outcome.message().to_string();

        match outcome {
            FailureOutcome::NotFound => Self::NotFound { message, details },
            FailureOutcome::Forbidden(status) => Self::Forbidden {
                status: error_status(status).unwrap_or(StatusCode::FORBIDDEN),
                message,
                details,
            },
            FailureOutcome::UpstreamError(status) => Self::Upstream {
                status: error_status(status).unwrap_or(StatusCode::BAD_GATEWAY),
                message,
                details,
            },
            FailureOutcome::LocalError => Self::Internal { message, details },
        }
    }

    /// HTTP status the error is rendered with.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Forbidden { status, .. } | AppError::Upstream { status, .. } => *status,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation { .. } => "validation_error",
            AppError::NotFound { .. } => "not_found",
            AppError::Forbidden { .. } => "forbidden",
            AppError::Upstream { .. } => "upstream_error",
            AppError::Internal { .. } => "local_error",
        }
    }

    pub fn to_error_info(&self) -> ErrorInfo {
        let (message, details) = match self {
            AppError::Validation { message, details }
            | AppError::NotFound { message, details }
            | AppError::Forbidden {
                message, details, ..
            }
            | AppError::Upstream {
                message, details, ..
            }
            | AppError::Internal { message, details } => (message, details),
        };

        ErrorInfo {
            code: self.code(),
            message: message.clone(),
            details: details.clone(),
        }
    }
}

/// Upstream status usable as our own error status (4xx or 5xx).
fn error_status(status: u16) -> Option<StatusCode> {
    StatusCode::from_u16(status)
        .ok()
        .filter(|s| s.is_client_error() || s.is_server_error())
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = ErrorBody {
            status: "error",
            response_code: status.as_u16(),
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let field_errors = errors.field_errors();
        let fields: Vec<&str> = field_errors.keys().map(|k| k.as_ref()).collect();
        AppError::bad_request("Invalid request parameters", json!({ "fields": fields }))
    }
}
