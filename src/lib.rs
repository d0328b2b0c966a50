//! Car rental booking and payment service.
//!
//! Customers browse available vehicles, book one for a date range, pay for
//! the booking and view receipts. Storage sits behind
//! [`repositories::RentalStore`]; payments, contact mail and caller identity
//! are injected capabilities wired together in [`state::AppState`].

pub mod config;
pub mod database;
pub mod dto;
pub mod errors;
pub mod handlers;
pub mod identity;
pub mod models;
pub mod money;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod validation;

use axum::Router;

/// Router with every endpoint, bound to `state`.
pub fn app(state: state::AppState) -> Router {
    routes::routes::routes().with_state(state)
}
