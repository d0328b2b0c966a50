//! Storage access for the rental workflows.
//!
//! Services depend on the [`RentalStore`] trait rather than on a pool, so a
//! workflow can be exercised against any backing store. [`SqliteStore`] is
//! the production implementation.

pub mod sqlite_repository;

pub use sqlite_repository::SqliteStore;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{
    booking::Booking,
    payment::Payment,
    review::Review,
    vehicle::{Vehicle, VehicleImage},
};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("booking `{0}` not found")]
    BookingNotFound(Uuid),
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Result of the atomic paid-transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentRecord {
    /// Payment inserted and booking flipped to paid.
    Recorded,
    /// Another payment won; nothing was written.
    AlreadyPaid,
}

#[async_trait]
pub trait RentalStore: Send + Sync {
    /// Cheap connectivity probe for readiness checks.
    async fn ping(&self) -> StoreResult<()>;

    /// Insert a vehicle and its gallery in one transaction.
    async fn insert_vehicle(&self, vehicle: &Vehicle, images: &[VehicleImage]) -> StoreResult<()>;

    /// Vehicles with `available = true`, in insertion order.
    async fn list_available_vehicles(&self) -> StoreResult<Vec<Vehicle>>;

    async fn find_vehicle(&self, id: Uuid) -> StoreResult<Option<Vehicle>>;

    async fn list_vehicle_images(&self, vehicle_id: Uuid) -> StoreResult<Vec<VehicleImage>>;

    async fn insert_booking(&self, booking: &Booking) -> StoreResult<()>;

    async fn find_booking(&self, id: Uuid) -> StoreResult<Option<Booking>>;

    /// Bookings whose customer email matches (case-insensitive), newest first.
    async fn list_bookings_by_email(&self, email: &str) -> StoreResult<Vec<Booking>>;

    async fn find_payment_for_booking(&self, booking_id: Uuid) -> StoreResult<Option<Payment>>;

    /// Payments joined through bookings by customer email, newest first.
    async fn list_payments_by_email(&self, email: &str) -> StoreResult<Vec<Payment>>;

    /// Insert `payment` and mark its booking paid, both or neither.
    ///
    /// Returns [`PaymentRecord::AlreadyPaid`] without writing when the booking
    /// is already paid, and [`StoreError::BookingNotFound`] when it is gone.
    async fn record_payment(&self, payment: &Payment) -> StoreResult<PaymentRecord>;

    async fn insert_review(&self, review: &Review) -> StoreResult<()>;

    /// All reviews, newest first.
    async fn list_reviews(&self) -> StoreResult<Vec<Review>>;
}
