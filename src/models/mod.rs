//! Core data models for the car rental service.
//!
//! These entities map to the SQLite tables in `migrations/0001_init.sql`
//! and serialize as JSON via `serde`. Money columns are stored as decimal
//! text, so the models holding amounts implement `FromRow` by hand.

pub mod booking;
pub mod payment;
pub mod review;
pub mod vehicle;

use rust_decimal::Decimal;
use sqlx::{Row, sqlite::SqliteRow};

/// Decode a decimal TEXT column into an exact `Decimal`.
pub(crate) fn decode_money(row: &SqliteRow, column: &str) -> Result<Decimal, sqlx::Error> {
    let raw: String = row.try_get(column)?;
    Decimal::from_str_exact(&raw).map_err(|err| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(err),
    })
}

/// Creation timestamp for new records, truncated to microseconds so a value
/// read back from SQLite compares equal to the one written.
pub(crate) fn timestamp() -> chrono::DateTime<chrono::Utc> {
    use chrono::SubsecRound;
    chrono::Utc::now().trunc_subsecs(6)
}
