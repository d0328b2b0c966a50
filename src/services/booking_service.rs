//! Booking workflow: validate a date range against a vehicle, price it and
//! record the booking.
//!
//! No overlap check is made; two bookings may cover the same vehicle and
//! dates.

use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::{
    dto::booking_dto::{BookingForm, BookingFormView, BookingRequest},
    models::{booking::Booking, timestamp, vehicle::Vehicle},
    money::rental_total,
    repositories::RentalStore,
    services::{RentalError, RentalResult},
    validation::Violation,
};

#[derive(Clone)]
pub struct BookingService {
    store: Arc<dyn RentalStore>,
}

impl BookingService {
    pub fn new(store: Arc<dyn RentalStore>) -> Self {
        Self { store }
    }

    async fn vehicle(&self, vehicle_id: Uuid) -> RentalResult<Vehicle> {
        self.store
            .find_vehicle(vehicle_id)
            .await?
            .ok_or(RentalError::VehicleNotFound(vehicle_id))
    }

    /// Context for an empty booking form.
    pub async fn booking_form(&self, vehicle_id: Uuid) -> RentalResult<BookingFormView> {
        Ok(BookingFormView::new(self.vehicle(vehicle_id).await?))
    }

    /// Create an unpaid booking.
    ///
    /// An unknown vehicle is reported before any form error. The total is
    /// nights × the vehicle's current daily rate, fixed at this point.
    pub async fn submit_booking(
        &self,
        vehicle_id: Uuid,
        form: &BookingForm,
    ) -> RentalResult<Booking> {
        let vehicle = self.vehicle(vehicle_id).await?;
        let request = BookingRequest::parse(form)?;

        let nights = request.nights();
        let total_amount = rental_total(vehicle.price_per_day, nights)
            .ok_or(RentalError::Validation(Violation::TotalOutOfRange.into()))?;

        let booking = Booking {
            id: Uuid::new_v4(),
            vehicle_id: vehicle.id,
            customer_name: request.customer_name,
            customer_email: request.customer_email,
            customer_phone: request.customer_phone,
            start_date: request.start_date,
            end_date: request.end_date,
            total_amount,
            paid: false,
            created_at: timestamp(),
        };
        self.store.insert_booking(&booking).await?;

        info!(
            booking_id = %booking.id,
            vehicle_id = %vehicle.id,
            nights,
            total_amount = %booking.total_amount,
            "booking created"
        );
        Ok(booking)
    }

    pub async fn get_booking(&self, booking_id: Uuid) -> RentalResult<Booking> {
        self.store
            .find_booking(booking_id)
            .await?
            .ok_or(RentalError::BookingNotFound(booking_id))
    }
}
