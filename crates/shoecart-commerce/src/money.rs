//! Money type for representing prices.
//!
//! Uses an integer minor-unit representation. The product service sends
//! prices as decimal JSON numbers; [`decimal`] converts at the boundary so
//! arithmetic never touches floats.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    BRL,
    USD,
    EUR,
}

impl Currency {
    /// Get the currency code (e.g., "BRL").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::BRL => "BRL",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
        }
    }

    /// Get the currency symbol (e.g., "R$").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::BRL => "R$",
            Currency::USD => "$",
            Currency::EUR => "\u{20ac}",
        }
    }

    /// Number of decimal places for this currency.
    pub fn decimal_places(&self) -> u32 {
        2
    }

    /// Parse a currency code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_uppercase().as_str() {
            "BRL" => Some(Currency::BRL),
            "USD" => Some(Currency::USD),
            "EUR" => Some(Currency::EUR),
            _ => None,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A monetary value with currency.
///
/// Amounts are stored in the smallest unit of the currency (e.g., centavos).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in smallest currency unit.
    pub amount_cents: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from minor units.
    pub fn new(amount_cents: i64, currency: Currency) -> Self {
        Self {
            amount_cents,
            currency,
        }
    }

    /// Create a Money value from a decimal amount, rounding to the nearest
    /// minor unit.
    ///
    /// ```
    /// use shoecart_commerce::money::{Money, Currency};
    /// let price = Money::from_decimal(179.9, Currency::BRL);
    /// assert_eq!(price.amount_cents, 17990);
    /// ```
    pub fn from_decimal(amount: f64, currency: Currency) -> Self {
        let multiplier = 10_i64.pow(currency.decimal_places());
        let amount_cents = (amount * multiplier as f64).round() as i64;
        Self::new(amount_cents, currency)
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Convert to a decimal value.
    pub fn to_decimal(&self) -> f64 {
        let divisor = 10_i64.pow(self.currency.decimal_places());
        self.amount_cents as f64 / divisor as f64
    }

    /// Format as a display string (e.g., "R$179.90").
    pub fn display(&self) -> String {
        let places = self.currency.decimal_places() as usize;
        format!("{}{:.places$}", self.currency.symbol(), self.to_decimal())
    }

    /// Add another Money value, returning None on currency mismatch or
    /// overflow.
    pub fn try_add(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        let amount = self.amount_cents.checked_add(other.amount_cents)?;
        Some(Money::new(amount, self.currency))
    }

    /// Multiply by a quantity, returning None on overflow.
    pub fn try_multiply(&self, factor: i64) -> Option<Money> {
        let amount = self.amount_cents.checked_mul(factor)?;
        Some(Money::new(amount, self.currency))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// Serde adapter that reads and writes [`Money`] as a plain decimal number
/// in the default currency, which is how the product service and the
/// persisted cart represent prices.
///
/// ```
/// use serde::{Deserialize, Serialize};
/// use shoecart_commerce::money::{self, Money};
///
/// #[derive(Serialize, Deserialize)]
/// struct Priced {
///     #[serde(with = "money::decimal")]
///     price: Money,
/// }
///
/// let p: Priced = serde_json::from_str(r#"{"price": 139.9}"#).unwrap();
/// assert_eq!(p.price.amount_cents, 13990);
/// ```
pub mod decimal {
    use super::{Currency, Money};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(money: &Money, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(money.to_decimal())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Money, D::Error> {
        let amount = f64::deserialize(deserializer)?;
        if !amount.is_finite() || amount < 0.0 {
            return Err(de::Error::custom(format!("invalid price: {}", amount)));
        }
        Ok(Money::from_decimal(amount, Currency::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_from_decimal() {
        let m = Money::from_decimal(49.99, Currency::BRL);
        assert_eq!(m.amount_cents, 4999);

        let m = Money::from_decimal(139.9, Currency::BRL);
        assert_eq!(m.amount_cents, 13990);
    }

    #[test]
    fn test_money_to_decimal() {
        let m = Money::new(4999, Currency::USD);
        assert!((m.to_decimal() - 49.99).abs() < 0.001);
    }

    #[test]
    fn test_money_display() {
        assert_eq!(Money::new(4999, Currency::USD).display(), "$49.99");
        assert_eq!(Money::new(17990, Currency::BRL).display(), "R$179.90");
    }

    #[test]
    fn test_money_try_add() {
        let a = Money::new(1000, Currency::BRL);
        let b = Money::new(500, Currency::BRL);
        assert_eq!(a.try_add(&b).unwrap().amount_cents, 1500);

        let eur = Money::new(500, Currency::EUR);
        assert!(a.try_add(&eur).is_none());
    }

    #[test]
    fn test_money_try_multiply_overflow() {
        let m = Money::new(i64::MAX, Currency::BRL);
        assert!(m.try_multiply(2).is_none());
        assert_eq!(Money::new(250, Currency::BRL).try_multiply(3).unwrap().amount_cents, 750);
    }

    #[test]
    fn test_decimal_rejects_negative_price() {
        #[derive(Deserialize)]
        #[allow(dead_code)]
        struct Priced {
            #[serde(with = "decimal")]
            price: Money,
        }

        assert!(serde_json::from_str::<Priced>(r#"{"price": -1.0}"#).is_err());
        assert!(serde_json::from_str::<Priced>(r#"{"price": 180}"#).is_ok());
    }

    #[test]
    fn test_currency_from_code() {
        assert_eq!(Currency::from_code("brl"), Some(Currency::BRL));
        assert_eq!(Currency::from_code("INVALID"), None);
    }
}
