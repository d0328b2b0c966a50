//! Catalog and review read paths, plus the administrative vehicle insert.

use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::{
    dto::{
        review_dto::{ReviewForm, ReviewRequest},
        vehicle_dto::NewVehicle,
    },
    models::{
        review::Review,
        timestamp,
        vehicle::{Vehicle, VehicleDetail, VehicleImage},
    },
    money::to_currency,
    repositories::RentalStore,
    services::{RentalError, RentalResult},
};

/// Offerings shown on the services page.
#[derive(Debug, Clone, serde::Serialize, PartialEq, Eq)]
pub struct ServiceOffering {
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
}

pub const SERVICE_OFFERINGS: [ServiceOffering; 6] = [
    ServiceOffering {
        title: "Daily Car Rental",
        description: "Rent a car for your daily needs",
        icon: "fas fa-car",
    },
    ServiceOffering {
        title: "Weekly Rentals",
        description: "Extended rental options for longer stays",
        icon: "fas fa-calendar-week",
    },
    ServiceOffering {
        title: "Airport Transfers",
        description: "Pickup and drop-off services",
        icon: "fas fa-plane",
    },
    ServiceOffering {
        title: "24/7 Support",
        description: "Customer support anytime",
        icon: "fas fa-headset",
    },
    ServiceOffering {
        title: "GPS Navigation",
        description: "Cars with GPS systems",
        icon: "fas fa-map-marked-alt",
    },
    ServiceOffering {
        title: "Insurance Coverage",
        description: "Comprehensive insurance",
        icon: "fas fa-shield-alt",
    },
];

#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn RentalStore>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn RentalStore>) -> Self {
        Self { store }
    }

    /// Vehicles customers can book, in the order they were added.
    pub async fn list_available_vehicles(&self) -> RentalResult<Vec<Vehicle>> {
        Ok(self.store.list_available_vehicles().await?)
    }

    /// Vehicle with its gallery. Unavailable vehicles are still returned.
    pub async fn get_vehicle(&self, id: Uuid) -> RentalResult<VehicleDetail> {
        let vehicle = self
            .store
            .find_vehicle(id)
            .await?
            .ok_or(RentalError::VehicleNotFound(id))?;
        let images = self.store.list_vehicle_images(id).await?;
        Ok(VehicleDetail { vehicle, images })
    }

    /// Add a vehicle to the catalog. The daily price is normalized to the
    /// currency's minor unit.
    pub async fn add_vehicle(&self, new: NewVehicle) -> RentalResult<VehicleDetail> {
        new.validate()?;

        let created_at = timestamp();
        let vehicle = Vehicle {
            id: Uuid::new_v4(),
            name: new.name.trim().to_string(),
            make: new.make.trim().to_string(),
            model_year: new.model_year,
            seats: new.seats,
            location: new.location.trim().to_string(),
            price_per_day: to_currency(new.price_per_day),
            description: new.description,
            main_image: new.main_image,
            available: new.available,
            created_at,
        };
        let images = new
            .images
            .into_iter()
            .map(|reference| VehicleImage {
                id: Uuid::new_v4(),
                vehicle_id: vehicle.id,
                reference,
                created_at,
            })
            .collect::<Vec<_>>();

        self.store.insert_vehicle(&vehicle, &images).await?;
        info!(
            vehicle_id = %vehicle.id,
            name = %vehicle.name,
            price_per_day = %vehicle.price_per_day,
            "vehicle added to catalog"
        );
        Ok(VehicleDetail { vehicle, images })
    }

    /// Reviews, newest first.
    pub async fn list_reviews(&self) -> RentalResult<Vec<Review>> {
        Ok(self.store.list_reviews().await?)
    }

    pub async fn submit_review(&self, form: &ReviewForm) -> RentalResult<Review> {
        let request = ReviewRequest::parse(form)?;
        let review = Review {
            id: Uuid::new_v4(),
            name: request.name,
            comment: request.comment,
            created_at: timestamp(),
        };
        self.store.insert_review(&review).await?;
        info!(review_id = %review.id, "review submitted");
        Ok(review)
    }

    pub fn services(&self) -> &'static [ServiceOffering] {
        &SERVICE_OFFERINGS
    }
}
