use axum::{
    Form, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::{
    dto::booking_dto::{BookingForm, BookingFormView},
    errors::AppError,
    handlers::{location, parse_id},
    state::AppState,
};

/// `GET /cars/{id}/book/` - what the booking form needs to render.
pub async fn booking_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<BookingFormView>, AppError> {
    let id = parse_id(&id, "Vehicle")?;
    Ok(Json(state.bookings.booking_form(id).await?))
}

/// `POST /cars/{id}/book/`
///
/// Creates an unpaid booking and sends the client on to payment.
pub async fn submit_booking(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<BookingForm>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id, "Vehicle")?;
    let booking = state.bookings.submit_booking(id, &form).await?;
    let target = location(&format!("/payment/{}/", booking.id))?;
    Ok((StatusCode::SEE_OTHER, target, Json(booking)))
}
