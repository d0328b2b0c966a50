//! Represents a reservation of one vehicle for a date range.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Row, sqlite::SqliteRow};
use uuid::Uuid;

use super::{decode_money, payment::Payment};

/// A booking as created by the booking workflow.
///
/// `end_date` is exclusive, so a booking always spans at least one night.
/// `total_amount` is snapshotted from the vehicle's daily rate when the
/// booking is made and never recomputed. The only mutation a booking ever
/// sees is `paid` flipping from `false` to `true`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Booking {
    pub id: Uuid,

    /// Booked vehicle. Several bookings may reference the same vehicle.
    pub vehicle_id: Uuid,

    pub customer_name: String,
    pub customer_email: String,

    /// May be empty.
    pub customer_phone: String,

    pub start_date: NaiveDate,

    /// Exclusive end of the rental.
    pub end_date: NaiveDate,

    /// nights × daily rate at booking time.
    pub total_amount: Decimal,

    pub paid: bool,

    pub created_at: DateTime<Utc>,
}

impl Booking {
    /// Number of nights billed.
    pub fn nights(&self) -> i64 {
        (self.end_date - self.start_date).num_days()
    }
}

impl<'r> FromRow<'r, SqliteRow> for Booking {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            vehicle_id: row.try_get("vehicle_id")?,
            customer_name: row.try_get("customer_name")?,
            customer_email: row.try_get("customer_email")?,
            customer_phone: row.try_get("customer_phone")?,
            start_date: row.try_get("start_date")?,
            end_date: row.try_get("end_date")?,
            total_amount: decode_money(row, "total_amount")?,
            paid: row.try_get("paid")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

/// Read-only view of a booking and its payment, if one was captured.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct Receipt {
    pub booking: Booking,
    pub payment: Option<Payment>,
}
