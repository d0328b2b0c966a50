//! Field-level validation results shared by every form.
//!
//! Each violated rule becomes one [`Violation`]; forms collect all of them
//! before failing so the caller can report every problem at once. The
//! `Display` text of a violation is the message shown to the user.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// A single broken rule on a submitted field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("{0} is required.")]
    Required(&'static str),
    #[error("{field} must be at most {max} characters.")]
    TooLong { field: &'static str, max: usize },
    #[error("Enter a valid email address.")]
    InvalidEmail(&'static str),
    #[error("Invalid date format for {0}, expected YYYY-MM-DD.")]
    InvalidDateFormat(&'static str),
    #[error("End date must be after start date.")]
    InvalidDateRange,
    #[error("Booking total is out of range.")]
    TotalOutOfRange,
    #[error("Invalid card number.")]
    InvalidCardNumber,
    #[error("Cardholder name is required.")]
    CardholderRequired,
    #[error("Invalid expiry date format (MM/YY).")]
    InvalidExpiry,
    #[error("Invalid CVV.")]
    InvalidCvv,
    #[error("Price per day cannot be negative.")]
    NegativePrice,
    #[error("A vehicle needs at least one seat.")]
    InvalidSeats,
}

impl Violation {
    /// Name of the form field the violation belongs to.
    pub fn field(&self) -> &'static str {
        match self {
            Violation::Required(field)
            | Violation::TooLong { field, .. }
            | Violation::InvalidEmail(field)
            | Violation::InvalidDateFormat(field) => field,
            Violation::InvalidDateRange | Violation::TotalOutOfRange => "end_date",
            Violation::InvalidCardNumber => "card_number",
            Violation::CardholderRequired => "cardholder_name",
            Violation::InvalidExpiry => "expiry_date",
            Violation::InvalidCvv => "cvv",
            Violation::NegativePrice => "price_per_day",
            Violation::InvalidSeats => "seats",
        }
    }
}

/// Ordered list of violations for one submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<Violation>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, violation: Violation) {
        self.0.push(violation);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn violations(&self) -> &[Violation] {
        &self.0
    }

    pub fn contains(&self, violation: &Violation) -> bool {
        self.0.contains(violation)
    }

    /// User-facing messages in the order the rules were checked.
    pub fn messages(&self) -> Vec<String> {
        self.0.iter().map(ToString::to_string).collect()
    }

    /// Field-tagged messages for API responses.
    pub fn field_errors(&self) -> Vec<FieldError> {
        self.0
            .iter()
            .map(|v| FieldError {
                field: v.field(),
                message: v.to_string(),
            })
            .collect()
    }

    /// `Ok(value)` when nothing was recorded, otherwise the collected errors.
    pub fn finish<T>(self, value: T) -> Result<T, ValidationErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl From<Violation> for ValidationErrors {
    fn from(violation: Violation) -> Self {
        Self(vec![violation])
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.messages().join(" "))
    }
}

impl std::error::Error for ValidationErrors {}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Trimmed copy of `value`, recording `Required` when it is blank.
pub(crate) fn required(errors: &mut ValidationErrors, field: &'static str, value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.push(Violation::Required(field));
    }
    trimmed.to_string()
}

/// Record `TooLong` when `value` exceeds `max` characters.
pub(crate) fn max_chars(errors: &mut ValidationErrors, field: &'static str, value: &str, max: usize) {
    if value.chars().count() > max {
        errors.push(Violation::TooLong { field, max });
    }
}

/// Minimal address check: exactly one `@`, non-empty on both sides, no
/// whitespace.
pub(crate) fn looks_like_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !value.chars().any(char::is_whitespace)
        }
        None => false,
    }
}
