//! Rental workflows.
//!
//! Each service owns an `Arc<dyn RentalStore>` and, where it talks to the
//! outside world, an injected capability (`PaymentGateway`, `ContactMailer`).
//! All services report failures as [`RentalError`].

pub mod booking_service;
pub mod catalog_service;
pub mod contact_service;
pub mod payment_gateway;
pub mod payment_service;
pub mod receipt_service;

use thiserror::Error;
use uuid::Uuid;

use crate::{
    repositories::StoreError,
    services::{contact_service::MailError, payment_gateway::GatewayError},
    validation::ValidationErrors,
};

#[derive(Debug, Error)]
pub enum RentalError {
    #[error("{0}")]
    Validation(#[from] ValidationErrors),
    #[error("vehicle `{0}` not found")]
    VehicleNotFound(Uuid),
    #[error("booking `{0}` not found")]
    BookingNotFound(Uuid),
    #[error("payment declined: {0}")]
    PaymentDeclined(String),
    #[error("payment gateway unavailable: {0}")]
    GatewayUnavailable(String),
    #[error(transparent)]
    Mail(#[from] MailError),
    #[error(transparent)]
    Store(StoreError),
}

pub type RentalResult<T> = Result<T, RentalError>;

impl From<StoreError> for RentalError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::BookingNotFound(id) => RentalError::BookingNotFound(id),
            other => RentalError::Store(other),
        }
    }
}

impl From<GatewayError> for RentalError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::Declined(reason) => RentalError::PaymentDeclined(reason),
            GatewayError::Unavailable(reason) => RentalError::GatewayUnavailable(reason),
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::{str::FromStr, sync::Arc};

    use rust_decimal::Decimal;
    use sqlx::SqlitePool;

    use crate::{
        database,
        dto::vehicle_dto::NewVehicle,
        models::vehicle::Vehicle,
        repositories::{RentalStore, SqliteStore},
        services::catalog_service::CatalogService,
    };

    pub async fn store() -> Arc<dyn RentalStore> {
        store_with_pool().await.0
    }

    /// Store plus the raw pool, for tests that inspect or poke tables.
    pub async fn store_with_pool() -> (Arc<dyn RentalStore>, Arc<SqlitePool>) {
        let pool = database::connect("sqlite::memory:").await.unwrap();
        database::run_migrations(&pool).await.unwrap();
        let pool = Arc::new(pool);
        (Arc::new(SqliteStore::new(pool.clone())), pool)
    }

    pub fn new_vehicle(name: &str, price: &str, available: bool) -> NewVehicle {
        NewVehicle {
            name: name.into(),
            make: "Honda".into(),
            model_year: 2022,
            seats: 5,
            location: "Colombo".into(),
            price_per_day: Decimal::from_str(price).unwrap(),
            description: "Good car".into(),
            main_image: None,
            available,
            images: Vec::new(),
        }
    }

    pub async fn seed_vehicle(
        store: &Arc<dyn RentalStore>,
        name: &str,
        price: &str,
        available: bool,
    ) -> Vehicle {
        CatalogService::new(store.clone())
            .add_vehicle(new_vehicle(name, price, available))
            .await
            .unwrap()
            .vehicle
    }
}
