use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    models::vehicle::Vehicle,
    validation::{ValidationErrors, Violation, looks_like_email, max_chars, required},
};

const DATE_FORMAT: &str = "%Y-%m-%d";
const NAME_MAX: usize = 100;
const EMAIL_MAX: usize = 254;
const PHONE_MAX: usize = 20;

// Submitted booking form, as posted by the browser.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct BookingForm {
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub customer_email: String,
    #[serde(default)]
    pub customer_phone: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
}

/// A booking request that passed validation: trimmed contact details and a
/// date range of at least one night.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingRequest {
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl BookingRequest {
    pub fn parse(form: &BookingForm) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let customer_name = required(&mut errors, "customer_name", &form.customer_name);
        max_chars(&mut errors, "customer_name", &customer_name, NAME_MAX);

        let customer_email = required(&mut errors, "customer_email", &form.customer_email);
        if !customer_email.is_empty() {
            if !looks_like_email(&customer_email) {
                errors.push(Violation::InvalidEmail("customer_email"));
            }
            max_chars(&mut errors, "customer_email", &customer_email, EMAIL_MAX);
        }

        let customer_phone = form.customer_phone.trim().to_string();
        max_chars(&mut errors, "customer_phone", &customer_phone, PHONE_MAX);

        let start_date = parse_date(&mut errors, "start_date", &form.start_date);
        let end_date = parse_date(&mut errors, "end_date", &form.end_date);

        let (start_date, end_date) = match (start_date, end_date) {
            (Some(start), Some(end)) => {
                if end <= start {
                    errors.push(Violation::InvalidDateRange);
                }
                (start, end)
            }
            _ => return Err(errors),
        };

        errors.finish(Self {
            customer_name,
            customer_email,
            customer_phone,
            start_date,
            end_date,
        })
    }

    /// Nights between start and (exclusive) end.
    pub fn nights(&self) -> i64 {
        (self.end_date - self.start_date).num_days()
    }
}

fn parse_date(errors: &mut ValidationErrors, field: &'static str, raw: &str) -> Option<NaiveDate> {
    let value = required(errors, field, raw);
    if value.is_empty() {
        return None;
    }
    match parse_iso_date(&value) {
        Some(date) => Some(date),
        None => {
            errors.push(Violation::InvalidDateFormat(field));
            None
        }
    }
}

/// Strict `YYYY-MM-DD`. chrono's `%Y` alone would take short or signed years.
fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    let bytes = value.as_bytes();
    let shaped = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !shaped {
        return None;
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
}

/// Context for rendering the booking form.
#[derive(Debug, Serialize)]
pub struct BookingFormView {
    pub vehicle: Vehicle,
    pub required_fields: &'static [&'static str],
    pub optional_fields: &'static [&'static str],
    pub date_format: &'static str,
}

impl BookingFormView {
    pub fn new(vehicle: Vehicle) -> Self {
        Self {
            vehicle,
            required_fields: &["customer_name", "customer_email", "start_date", "end_date"],
            optional_fields: &["customer_phone"],
            date_format: "YYYY-MM-DD",
        }
    }
}
