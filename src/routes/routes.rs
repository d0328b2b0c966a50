//! Defines routes for the rental site.
//!
//! ## Structure
//! - **Catalog**
//!   - `GET  /cars/`, `GET /cars/{id}/`, `GET /services/`
//! - **Booking and payment**
//!   - `GET|POST /cars/{id}/book/` (POST redirects to payment)
//!   - `GET|POST /payment/{booking_id}/` (POST redirects to the receipt)
//!   - `GET  /receipt/{booking_id}/`
//! - **Customer listings** (need an authenticated identity)
//!   - `GET  /payments/`, `GET /receipts/`
//! - **Site pages**
//!   - `GET|POST /about/`, `GET|POST /contact/`

use crate::{
    handlers::{
        booking_handlers::{booking_form, submit_booking},
        catalog_handlers::{car_detail, list_cars, services},
        health_handlers::{healthz, readyz},
        payment_handlers::{payment_form, submit_payment},
        receipt_handlers::{my_payments, my_receipts, receipt},
        site_handlers::{about, contact, submit_contact, submit_review},
    },
    state::AppState,
};
use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

/// Build the router. State is supplied by the caller with `with_state`.
pub fn routes() -> Router<AppState> {
    Router::new()
        // health endpoints (mounted at root)
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .route("/cars/", get(list_cars))
        .route("/cars/{id}/", get(car_detail))
        .route("/cars/{id}/book/", get(booking_form).post(submit_booking))
        .route("/payment/{booking_id}/", get(payment_form).post(submit_payment))
        .route("/receipt/{booking_id}/", get(receipt))
        .route("/payments/", get(my_payments))
        .route("/receipts/", get(my_receipts))
        .route("/about/", get(about).post(submit_review))
        .route("/contact/", get(contact).post(submit_contact))
        .route("/services/", get(services))
        .layer(TraceLayer::new_for_http())
}
