//! About (reviews) and contact pages.

use axum::{
    Form, Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;

use crate::{
    dto::{contact_dto::ContactForm, review_dto::ReviewForm},
    errors::AppError,
    handlers::location,
    models::review::Review,
    services::contact_service::ContactInfo,
    state::AppState,
};

/// `GET /about/` - reviews, newest first.
pub async fn about(State(state): State<AppState>) -> Result<Json<Vec<Review>>, AppError> {
    Ok(Json(state.catalog.list_reviews().await?))
}

/// `POST /about/` - leave a review, then back to the list.
pub async fn submit_review(
    State(state): State<AppState>,
    Form(form): Form<ReviewForm>,
) -> Result<impl IntoResponse, AppError> {
    let review = state.catalog.submit_review(&form).await?;
    Ok((StatusCode::SEE_OTHER, location("/about/")?, Json(review)))
}

/// `GET /contact/`
pub async fn contact(State(state): State<AppState>) -> Json<ContactInfo> {
    Json(state.contact.info().clone())
}

/// `POST /contact/`
pub async fn submit_contact(
    State(state): State<AppState>,
    Form(form): Form<ContactForm>,
) -> Result<impl IntoResponse, AppError> {
    state.contact.submit(&form).await?;
    Ok((
        StatusCode::OK,
        Json(json!({ "message": "Your message has been sent successfully!" })),
    ))
}
