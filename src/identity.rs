//! Authenticated identity for per-customer listings.
//!
//! Session and account management live outside this service. Whatever sits
//! in front of it (a gateway, an auth proxy) authenticates the caller and
//! forwards the email in a trusted header, which [`HeaderIdentity`] reads.

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, StatusCode, request::Parts},
};

use crate::{errors::AppError, state::AppState, validation::looks_like_email};

pub const DEFAULT_IDENTITY_HEADER: &str = "x-user-email";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub email: String,
}

/// Turns request headers into an authenticated identity.
pub trait IdentityProvider: Send + Sync {
    fn identify(&self, headers: &HeaderMap) -> Option<Identity>;
}

/// Reads the caller's email from a single trusted header.
#[derive(Debug, Clone)]
pub struct HeaderIdentity {
    header: String,
}

impl HeaderIdentity {
    pub fn new(header: impl Into<String>) -> Self {
        Self {
            header: header.into().to_ascii_lowercase(),
        }
    }
}

impl Default for HeaderIdentity {
    fn default() -> Self {
        Self::new(DEFAULT_IDENTITY_HEADER)
    }
}

impl IdentityProvider for HeaderIdentity {
    fn identify(&self, headers: &HeaderMap) -> Option<Identity> {
        let email = headers.get(self.header.as_str())?.to_str().ok()?.trim();
        looks_like_email(email).then(|| Identity {
            email: email.to_string(),
        })
    }
}

/// Extractor that rejects unauthenticated requests with 401.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Identity);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        state
            .identity
            .identify(&parts.headers)
            .map(CurrentUser)
            .ok_or_else(|| AppError::new(StatusCode::UNAUTHORIZED, "Authentication required."))
    }
}
