//! Currency normalization
//!
//! Converts source-currency prices (colones) into the normalized currency
//! (US dollars) using a fixed exchange rate.

use super::Money;
use crate::config::settings::DEFAULT_EXCHANGE_RATE;

/// Pure converter from source to normalized currency
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurrencyConverter {
    /// Source units per normalized unit
    rate: f64,
}

impl CurrencyConverter {
    /// Create a converter with the given rate
    ///
    /// The rate is validated by `Settings::validate`; callers building a
    /// converter by hand must pass a positive, finite rate.
    pub fn new(rate: f64) -> Self {
        Self { rate }
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// `round(price_source / rate, 2)`
    ///
    /// Total: callers coerce missing or invalid prices to zero beforehand.
    pub fn to_normalized(&self, price_source: Money) -> Money {
        let quotient = price_source.to_decimal() / self.rate;
        // Round the exact binary quotient; scaling by 100 first can push
        // 0.0349999.. over the half-cent boundary.
        format!("{:.2}", quotient)
            .parse()
            .map(Money::from_decimal)
            .unwrap_or_else(|_| Money::from_decimal(quotient))
    }
}

impl Default for CurrencyConverter {
    fn default() -> Self {
        Self::new(DEFAULT_EXCHANGE_RATE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference(price: f64) -> f64 {
        format!("{:.2}", price / 516.0).parse().unwrap()
    }

    #[test]
    fn test_leche_price() {
        let converter = CurrencyConverter::default();
        let normalized = converter.to_normalized(Money::from_decimal(1000.0));
        assert_eq!(normalized, Money::from_cents(194));
    }

    #[test]
    fn test_zero_stays_zero() {
        let converter = CurrencyConverter::default();
        assert_eq!(converter.to_normalized(Money::zero()), Money::zero());
    }

    #[test]
    fn test_matches_rounded_division() {
        let converter = CurrencyConverter::default();
        for price in [1.0, 258.0, 516.0, 999.0, 1250.0, 4375.5, 12_990.0, 150_000.0] {
            let normalized = converter.to_normalized(Money::from_decimal(price));
            assert_eq!(
                normalized,
                Money::from_decimal(reference(price)),
                "price {}",
                price
            );
        }
    }

    #[test]
    fn test_half_cent_quotients_round_on_the_quotient() {
        let converter = CurrencyConverter::default();
        // 18.06 / 516 and 7.74 / 516 sit a hair either side of a half cent
        assert_eq!(
            converter.to_normalized(Money::from_decimal(18.06)),
            Money::from_cents(3)
        );
        assert_eq!(
            converter.to_normalized(Money::from_decimal(7.74)),
            Money::from_cents(2)
        );
    }

    #[test]
    fn test_custom_rate() {
        let converter = CurrencyConverter::new(500.0);
        assert_eq!(
            converter.to_normalized(Money::from_decimal(1000.0)),
            Money::from_cents(200)
        );
        assert_eq!(converter.rate(), 500.0);
    }
}
