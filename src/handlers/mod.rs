//! HTTP handlers. Each one extracts its input, delegates to a service on
//! [`AppState`](crate::state::AppState) and maps failures through
//! [`AppError`].

pub mod booking_handlers;
pub mod catalog_handlers;
pub mod health_handlers;
pub mod payment_handlers;
pub mod receipt_handlers;
pub mod site_handlers;

use axum::http::{HeaderName, HeaderValue, header};
use uuid::Uuid;

use crate::errors::AppError;

/// Path ids that do not parse can never match a record, so they are
/// reported as missing rather than as a bad request.
pub(crate) fn parse_id(raw: &str, what: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::not_found(format!("{what} not found.")))
}

/// `Location` header for a `303 See Other` response.
pub(crate) fn location(target: &str) -> Result<[(HeaderName, HeaderValue); 1], AppError> {
    let value = HeaderValue::from_str(target)
        .map_err(|err| AppError::internal(format!("invalid redirect target: {err}")))?;
    Ok([(header::LOCATION, value)])
}
