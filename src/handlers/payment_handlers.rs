use axum::{
    Form, Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    dto::payment_dto::PaymentForm,
    errors::AppError,
    handlers::{location, parse_id},
    services::payment_service::PaymentPage,
    state::AppState,
};

/// `GET /payment/{booking_id}/`
///
/// Unpaid bookings get the form context. Paid ones redirect to the receipt.
pub async fn payment_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let id = parse_id(&id, "Booking")?;
    match state.payments.payment_page(id).await? {
        PaymentPage::Pending(view) => Ok(Json(view).into_response()),
        PaymentPage::AlreadyPaid(id) => {
            let target = location(&format!("/receipt/{id}/"))?;
            Ok((StatusCode::SEE_OTHER, target).into_response())
        }
    }
}

/// `POST /payment/{booking_id}/`
pub async fn submit_payment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<PaymentForm>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id, "Booking")?;
    let receipt = state.payments.submit_payment(id, &form).await?.into_receipt();
    let target = location(&format!("/receipt/{}/", receipt.booking.id))?;
    Ok((StatusCode::SEE_OTHER, target, Json(receipt)))
}
