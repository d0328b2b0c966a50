//! SQLite-backed [`RentalStore`].
//!
//! Amounts are bound as canonical decimal text; UUIDs as blobs; dates and
//! timestamps as ISO-8601 text. Listing order is made total with `rowid`
//! as a tie-breaker, which follows insertion order.

use async_trait::async_trait;
use sqlx::SqlitePool;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use super::{PaymentRecord, RentalStore, StoreError, StoreResult};
use crate::models::{
    booking::Booking,
    payment::Payment,
    review::Review,
    vehicle::{Vehicle, VehicleImage},
};

const VEHICLE_COLUMNS: &str = "id, name, make, model_year, seats, location, price_per_day, \
     description, main_image, available, created_at";

const BOOKING_COLUMNS: &str = "id, vehicle_id, customer_name, customer_email, customer_phone, \
     start_date, end_date, total_amount, paid, created_at";

#[derive(Clone)]
pub struct SqliteStore {
    /// Shared SQLite connection pool.
    pub db: Arc<SqlitePool>,
}

impl SqliteStore {
    pub fn new(db: Arc<SqlitePool>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RentalStore for SqliteStore {
    async fn ping(&self) -> StoreResult<()> {
        let one = sqlx::query_scalar::<_, i64>("SELECT 1")
            .fetch_one(&*self.db)
            .await?;
        debug!("sqlite ping returned {}", one);
        Ok(())
    }

    async fn insert_vehicle(&self, vehicle: &Vehicle, images: &[VehicleImage]) -> StoreResult<()> {
        let mut tx = self.db.begin().await?;

        sqlx::query(
            "INSERT INTO vehicles (id, name, make, model_year, seats, location, price_per_day,
                                   description, main_image, available, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(vehicle.id)
        .bind(&vehicle.name)
        .bind(&vehicle.make)
        .bind(vehicle.model_year)
        .bind(vehicle.seats)
        .bind(&vehicle.location)
        .bind(vehicle.price_per_day.to_string())
        .bind(&vehicle.description)
        .bind(vehicle.main_image.as_deref())
        .bind(vehicle.available)
        .bind(vehicle.created_at)
        .execute(&mut *tx)
        .await?;

        for image in images {
            sqlx::query(
                "INSERT INTO vehicle_images (id, vehicle_id, reference, created_at)
                 VALUES (?, ?, ?, ?)",
            )
            .bind(image.id)
            .bind(image.vehicle_id)
            .bind(&image.reference)
            .bind(image.created_at)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn list_available_vehicles(&self) -> StoreResult<Vec<Vehicle>> {
        let sql = format!(
            "SELECT {VEHICLE_COLUMNS} FROM vehicles WHERE available = 1 ORDER BY rowid ASC"
        );
        let rows = sqlx::query_as::<_, Vehicle>(&sql)
            .fetch_all(&*self.db)
            .await?;
        Ok(rows)
    }

    async fn find_vehicle(&self, id: Uuid) -> StoreResult<Option<Vehicle>> {
        let sql = format!("SELECT {VEHICLE_COLUMNS} FROM vehicles WHERE id = ?");
        let row = sqlx::query_as::<_, Vehicle>(&sql)
            .bind(id)
            .fetch_optional(&*self.db)
            .await?;
        Ok(row)
    }

    async fn list_vehicle_images(&self, vehicle_id: Uuid) -> StoreResult<Vec<VehicleImage>> {
        let rows = sqlx::query_as::<_, VehicleImage>(
            "SELECT id, vehicle_id, reference, created_at
             FROM vehicle_images WHERE vehicle_id = ?
             ORDER BY rowid ASC",
        )
        .bind(vehicle_id)
        .fetch_all(&*self.db)
        .await?;
        Ok(rows)
    }

    async fn insert_booking(&self, booking: &Booking) -> StoreResult<()> {
        sqlx::query(
            "INSERT INTO bookings (id, vehicle_id, customer_name, customer_email, customer_phone,
                                   start_date, end_date, total_amount, paid, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(booking.id)
        .bind(booking.vehicle_id)
        .bind(&booking.customer_name)
        .bind(&booking.customer_email)
        .bind(&booking.customer_phone)
        .bind(booking.start_date)
        .bind(booking.end_date)
        .bind(booking.total_amount.to_string())
        .bind(booking.paid)
        .bind(booking.created_at)
        .execute(&*self.db)
        .await?;
        Ok(())
    }

    async fn find_booking(&self, id: Uuid) -> StoreResult<Option<Booking>> {
        let sql = format!("SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = ?");
        let row = sqlx::query_as::<_, Booking>(&sql)
            .bind(id)
            .fetch_optional(&*self.db)
            .await?;
        Ok(row)
    }

    async fn list_bookings_by_email(&self, email: &str) -> StoreResult<Vec<Booking>> {
        let sql = format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings
             WHERE customer_email = ? COLLATE NOCASE
             ORDER BY created_at DESC, rowid DESC"
        );
        let rows = sqlx::query_as::<_, Booking>(&sql)
            .bind(email.trim())
            .fetch_all(&*self.db)
            .await?;
        Ok(rows)
    }

    async fn find_payment_for_booking(&self, booking_id: Uuid) -> StoreResult<Option<Payment>> {
        let row = sqlx::query_as::<_, Payment>(
            "SELECT id, booking_id, cardholder_name, card_last4, amount, reference, created_at
             FROM payments WHERE booking_id = ?",
        )
        .bind(booking_id)
        .fetch_optional(&*self.db)
        .await?;
        Ok(row)
    }

    async fn list_payments_by_email(&self, email: &str) -> StoreResult<Vec<Payment>> {
        let rows = sqlx::query_as::<_, Payment>(
            "SELECT p.id, p.booking_id, p.cardholder_name, p.card_last4, p.amount,
                    p.reference, p.created_at
             FROM payments p
             JOIN bookings b ON b.id = p.booking_id
             WHERE b.customer_email = ? COLLATE NOCASE
             ORDER BY p.created_at DESC, p.rowid DESC",
        )
        .bind(email.trim())
        .fetch_all(&*self.db)
        .await?;
        Ok(rows)
    }

    async fn record_payment(&self, payment: &Payment) -> StoreResult<PaymentRecord> {
        let mut tx = self.db.begin().await?;

        // Compare-and-set on the paid flag; only one writer can flip it.
        let flipped = sqlx::query("UPDATE bookings SET paid = 1 WHERE id = ? AND paid = 0")
            .bind(payment.booking_id)
            .execute(&mut *tx)
            .await?;

        if flipped.rows_affected() == 0 {
            let exists = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM bookings WHERE id = ?")
                .bind(payment.booking_id)
                .fetch_one(&mut *tx)
                .await?;
            tx.rollback().await?;
            return if exists == 0 {
                Err(StoreError::BookingNotFound(payment.booking_id))
            } else {
                Ok(PaymentRecord::AlreadyPaid)
            };
        }

        let inserted = sqlx::query(
            "INSERT INTO payments (id, booking_id, cardholder_name, card_last4, amount,
                                   reference, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(payment.id)
        .bind(payment.booking_id)
        .bind(&payment.cardholder_name)
        .bind(&payment.card_last4)
        .bind(payment.amount.to_string())
        .bind(&payment.reference)
        .bind(payment.created_at)
        .execute(&mut *tx)
        .await;

        match inserted {
            Ok(_) => {
                tx.commit().await?;
                Ok(PaymentRecord::Recorded)
            }
            Err(err) if is_unique_violation(&err) => {
                tx.rollback().await?;
                Ok(PaymentRecord::AlreadyPaid)
            }
            Err(err) => {
                let _ = tx.rollback().await;
                Err(StoreError::Sqlx(err))
            }
        }
    }

    async fn insert_review(&self, review: &Review) -> StoreResult<()> {
        sqlx::query("INSERT INTO reviews (id, name, comment, created_at) VALUES (?, ?, ?, ?)")
            .bind(review.id)
            .bind(&review.name)
            .bind(&review.comment)
            .bind(review.created_at)
            .execute(&*self.db)
            .await?;
        Ok(())
    }

    async fn list_reviews(&self) -> StoreResult<Vec<Review>> {
        let rows = sqlx::query_as::<_, Review>(
            "SELECT id, name, comment, created_at FROM reviews
             ORDER BY created_at DESC, rowid DESC",
        )
        .fetch_all(&*self.db)
        .await?;
        Ok(rows)
    }
}

/// Return true if SQLx error indicates a unique constraint violation.
fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Database(db_err) if db_err.message().to_ascii_lowercase().contains("unique")
    )
}
