//! Represents funds captured against a booking.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Row, sqlite::SqliteRow};
use uuid::Uuid;

use super::decode_money;

/// A payment record, one per booking at most.
///
/// Only the last four digits of the card are kept. The full number and the
/// CVV never reach this struct.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Payment {
    pub id: Uuid,

    /// Paid booking (unique).
    pub booking_id: Uuid,

    pub cardholder_name: String,

    /// Last four digits of the card number.
    pub card_last4: String,

    /// Always equal to the booking's `total_amount`.
    pub amount: Decimal,

    /// Authorization reference issued by the payment gateway.
    pub reference: String,

    pub created_at: DateTime<Utc>,
}

impl<'r> FromRow<'r, SqliteRow> for Payment {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            booking_id: row.try_get("booking_id")?,
            cardholder_name: row.try_get("cardholder_name")?,
            card_last4: row.try_get("card_last4")?,
            amount: decode_money(row, "amount")?,
            reference: row.try_get("reference")?,
            created_at: row.try_get("created_at")?,
        })
    }
}
