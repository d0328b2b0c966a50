//! Catalog read paths: vehicle list, vehicle detail, services page.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::{
    errors::AppError,
    handlers::parse_id,
    models::vehicle::{Vehicle, VehicleDetail},
    services::catalog_service::ServiceOffering,
    state::AppState,
};

/// `GET /cars/`
pub async fn list_cars(State(state): State<AppState>) -> Result<Json<Vec<Vehicle>>, AppError> {
    Ok(Json(state.catalog.list_available_vehicles().await?))
}

/// `GET /cars/{id}/`
pub async fn car_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<VehicleDetail>, AppError> {
    let id = parse_id(&id, "Vehicle")?;
    Ok(Json(state.catalog.get_vehicle(id).await?))
}

/// `GET /services/`
pub async fn services(State(state): State<AppState>) -> Json<&'static [ServiceOffering]> {
    Json(state.catalog.services())
}
