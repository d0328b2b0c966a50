use rust_decimal::Decimal;
use serde::Deserialize;

use crate::validation::{ValidationErrors, Violation, required};

/// A catalog entry as supplied by the administrative seed file.
#[derive(Debug, Clone, Deserialize)]
pub struct NewVehicle {
    pub name: String,
    pub make: String,
    pub model_year: i32,
    pub seats: i32,
    #[serde(default)]
    pub location: String,
    pub price_per_day: Decimal,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub main_image: Option<String>,
    #[serde(default = "default_available")]
    pub available: bool,
    /// Gallery image references.
    #[serde(default)]
    pub images: Vec<String>,
}

fn default_available() -> bool {
    true
}

impl NewVehicle {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        required(&mut errors, "name", &self.name);
        required(&mut errors, "make", &self.make);
        if self.seats < 1 {
            errors.push(Violation::InvalidSeats);
        }
        if self.price_per_day < Decimal::ZERO {
            errors.push(Violation::NegativePrice);
        }
        errors.finish(())
    }
}
