use axum::{
    Json,
    extract::{Path, State},
};

use crate::{
    errors::AppError,
    handlers::parse_id,
    identity::CurrentUser,
    models::{
        booking::{Booking, Receipt},
        payment::Payment,
    },
    state::AppState,
};

/// `GET /receipt/{booking_id}/`
pub async fn receipt(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Receipt>, AppError> {
    let id = parse_id(&id, "Booking")?;
    Ok(Json(state.receipts.get_receipt(id).await?))
}

/// `GET /payments/` - the caller's payments.
pub async fn my_payments(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<Payment>>, AppError> {
    Ok(Json(state.receipts.list_payments_for_user(&user.email).await?))
}

/// `GET /receipts/` - the caller's bookings, paid or not.
pub async fn my_receipts(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<Booking>>, AppError> {
    Ok(Json(state.receipts.list_bookings_for_user(&user.email).await?))
}
