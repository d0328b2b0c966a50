use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{
    models::booking::Booking,
    validation::{ValidationErrors, Violation, max_chars},
};

const CARD_DIGITS_MIN: usize = 13;
const CARD_DIGITS_MAX: usize = 19;
const CVV_MIN: usize = 3;
const CARDHOLDER_MAX: usize = 100;

/// Submitted payment form. `Debug` never prints the card number or CVV.
#[derive(Default, Clone, Deserialize)]
pub struct PaymentForm {
    #[serde(default)]
    pub card_number: String,
    #[serde(default)]
    pub cardholder_name: String,
    #[serde(default, alias = "expiry")]
    pub expiry_date: String,
    #[serde(default)]
    pub cvv: String,
}

impl fmt::Debug for PaymentForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaymentForm")
            .field("card_number", &"<redacted>")
            .field("cardholder_name", &self.cardholder_name)
            .field("expiry_date", &self.expiry_date)
            .field("cvv", &"<redacted>")
            .finish()
    }
}

/// Card details that passed the form checks, ready for the gateway.
#[derive(Clone, PartialEq, Eq)]
pub struct CardDetails {
    number: String,
    pub cardholder_name: String,
    pub expiry_month: u32,
    pub expiry_year: u32,
    cvv: String,
}

impl CardDetails {
    /// Validate a payment form. Rules run in a fixed order and every failure
    /// is reported.
    pub fn parse(form: &PaymentForm) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let number: String = form.card_number.chars().filter(|c| *c != ' ').collect();
        let digits_ok = number.bytes().all(|b| b.is_ascii_digit());
        if !digits_ok || !(CARD_DIGITS_MIN..=CARD_DIGITS_MAX).contains(&number.len()) {
            errors.push(Violation::InvalidCardNumber);
        }

        let cardholder_name = form.cardholder_name.trim().to_string();
        if cardholder_name.is_empty() {
            errors.push(Violation::CardholderRequired);
        } else {
            max_chars(&mut errors, "cardholder_name", &cardholder_name, CARDHOLDER_MAX);
        }

        let expiry = parse_expiry(form.expiry_date.trim());
        if expiry.is_none() {
            errors.push(Violation::InvalidExpiry);
        }

        let cvv = form.cvv.trim().to_string();
        if cvv.chars().count() < CVV_MIN {
            errors.push(Violation::InvalidCvv);
        }

        let (expiry_month, expiry_year) = match expiry {
            Some(parts) if errors.is_empty() => parts,
            _ => return Err(errors),
        };

        Ok(Self {
            number,
            cardholder_name,
            expiry_month,
            expiry_year,
            cvv,
        })
    }

    /// Last four digits, the only part of the number that may be stored.
    pub fn last4(&self) -> &str {
        &self.number[self.number.len() - 4..]
    }

    /// Full digits, for handing to a gateway only.
    pub fn number(&self) -> &str {
        &self.number
    }

    pub fn cvv(&self) -> &str {
        &self.cvv
    }
}

impl fmt::Debug for CardDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardDetails")
            .field("last4", &self.last4())
            .field("cardholder_name", &self.cardholder_name)
            .field("expiry_month", &self.expiry_month)
            .field("expiry_year", &self.expiry_year)
            .finish_non_exhaustive()
    }
}

/// `MM/YY` with a real month.
fn parse_expiry(raw: &str) -> Option<(u32, u32)> {
    let bytes = raw.as_bytes();
    if bytes.len() != 5 || bytes[2] != b'/' {
        return None;
    }
    let (month, year) = (&raw[..2], &raw[3..]);
    if !month.bytes().chain(year.bytes()).all(|b| b.is_ascii_digit()) {
        return None;
    }
    let month: u32 = month.parse().ok()?;
    let year: u32 = year.parse().ok()?;
    (1..=12).contains(&month).then_some((month, year))
}

/// Context for rendering the payment form.
#[derive(Debug, Serialize)]
pub struct PaymentFormView {
    pub booking: Booking,
    pub nights: i64,
}

impl PaymentFormView {
    pub fn new(booking: Booking) -> Self {
        Self {
            nights: booking.nights(),
            booking,
        }
    }
}
