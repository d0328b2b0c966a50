use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;

use crate::{
    services::RentalError,
    validation::{FieldError, ValidationErrors},
};

/// HTTP-facing error: a status, a user-facing message and, for form
/// submissions, the per-field problems.
#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
    pub details: Vec<FieldError>,
}

impl AppError {
    pub fn new(status: StatusCode, msg: impl Into<String>) -> Self {
        Self {
            status,
            message: msg.into(),
            details: Vec::new(),
        }
    }

    /// Shortcut for a 500 Internal Server Error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, msg)
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, msg)
    }

    pub fn validation(errors: &ValidationErrors) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            message: errors.to_string(),
            details: errors.field_errors(),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = if self.details.is_empty() {
            json!({
                "error": self.message,
                "status": self.status.as_u16()
            })
        } else {
            json!({
                "error": self.message,
                "status": self.status.as_u16(),
                "errors": self.details
            })
        };

        (self.status, Json(body)).into_response()
    }
}

impl From<RentalError> for AppError {
    fn from(err: RentalError) -> Self {
        match err {
            RentalError::Validation(errors) => AppError::validation(&errors),
            RentalError::VehicleNotFound(_) => AppError::not_found("Vehicle not found."),
            RentalError::BookingNotFound(_) => AppError::not_found("Booking not found."),
            RentalError::PaymentDeclined(reason) => AppError::new(
                StatusCode::PAYMENT_REQUIRED,
                format!("Payment declined: {reason}"),
            ),
            RentalError::GatewayUnavailable(reason) => {
                tracing::error!("payment gateway unavailable: {reason}");
                AppError::new(
                    StatusCode::SERVICE_UNAVAILABLE,
                    "Payment could not be processed, try again later.",
                )
            }
            RentalError::Mail(err) => {
                tracing::error!("contact mail failed: {err}");
                AppError::new(StatusCode::BAD_GATEWAY, "Error sending message.")
            }
            RentalError::Store(err) => {
                tracing::error!("storage error: {err}");
                AppError::internal("Internal server error.")
            }
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        tracing::error!("unexpected error: {err:#}");
        AppError::internal("Internal server error.")
    }
}
