//! Represents a rentable vehicle and its gallery images.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Row, sqlite::SqliteRow};
use uuid::Uuid;

use super::decode_money;

/// A car in the rental catalog.
///
/// Only vehicles with `available = true` are listed to customers; detail and
/// booking lookups ignore the flag.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Vehicle {
    /// Internal UUID for DB indexing.
    pub id: Uuid,

    /// Display name (e.g. "Civic").
    pub name: String,

    /// Manufacturer (e.g. "Honda").
    pub make: String,

    pub model_year: i32,

    /// Number of seats, at least one.
    pub seats: i32,

    /// Where the car is picked up.
    pub location: String,

    /// Daily rate in the currency's minor-unit precision. Never negative.
    pub price_per_day: Decimal,

    pub description: String,

    /// Opaque reference to the primary photo, if any.
    pub main_image: Option<String>,

    /// Whether the vehicle shows up in the public listing.
    pub available: bool,

    /// When this vehicle was added to the catalog.
    pub created_at: DateTime<Utc>,
}

impl<'r> FromRow<'r, SqliteRow> for Vehicle {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            make: row.try_get("make")?,
            model_year: row.try_get("model_year")?,
            seats: row.try_get("seats")?,
            location: row.try_get("location")?,
            price_per_day: decode_money(row, "price_per_day")?,
            description: row.try_get("description")?,
            main_image: row.try_get("main_image")?,
            available: row.try_get("available")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

/// An additional photo attached to a vehicle.
#[derive(Serialize, Deserialize, Clone, FromRow, Debug, PartialEq)]
pub struct VehicleImage {
    pub id: Uuid,

    /// Owning vehicle; images are removed with it.
    pub vehicle_id: Uuid,

    /// Opaque reference to the stored binary (path or URL).
    pub reference: String,

    pub created_at: DateTime<Utc>,
}

/// A vehicle together with its gallery, as shown on the detail page.
#[derive(Serialize, Clone, Debug)]
pub struct VehicleDetail {
    #[serde(flatten)]
    pub vehicle: Vehicle,
    pub images: Vec<VehicleImage>,
}
