//! Fixed-point currency helpers.
//!
//! Amounts are `rust_decimal::Decimal` everywhere. Stored and rendered values
//! always carry exactly [`CURRENCY_SCALE`] fractional digits.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of fractional digits in the currency's minor unit.
pub const CURRENCY_SCALE: u32 = 2;

/// Round to the minor unit (half-to-even) and pad to a fixed scale, so
/// `5000` and `5000.00` are stored identically.
pub fn to_currency(value: Decimal) -> Decimal {
    let mut rounded =
        value.round_dp_with_strategy(CURRENCY_SCALE, RoundingStrategy::MidpointNearestEven);
    rounded.rescale(CURRENCY_SCALE);
    rounded
}

/// Total for `nights` at `price_per_day`, or `None` on overflow.
pub fn rental_total(price_per_day: Decimal, nights: i64) -> Option<Decimal> {
    price_per_day
        .checked_mul(Decimal::from(nights))
        .map(to_currency)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn d(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn four_nights_at_five_thousand() {
        let total = rental_total(d("5000.00"), 4).unwrap();
        assert_eq!(total, d("20000.00"));
        assert_eq!(total.to_string(), "20000.00");
    }

    #[test]
    fn whole_prices_are_padded_to_two_places() {
        assert_eq!(to_currency(d("45")).to_string(), "45.00");
    }

    #[test]
    fn rounds_half_to_even() {
        assert_eq!(to_currency(d("10.125")).to_string(), "10.12");
        assert_eq!(to_currency(d("10.135")).to_string(), "10.14");
    }

    #[test]
    fn no_binary_float_drift() {
        // 0.1 * 3 is the classic f64 failure case.
        assert_eq!(rental_total(d("0.10"), 3).unwrap().to_string(), "0.30");
    }
}
