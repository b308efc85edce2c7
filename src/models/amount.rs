use std::fmt;
use std::ops::{Add, Sub};

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A rupee amount held as a whole number of paise.
///
/// The backend speaks rupees as JSON numbers (or decimal strings); keeping
/// paise internally makes `paid + pending == total` exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount(i64);

impl Amount {
    pub const ZERO: Amount = Amount(0);

    #[cfg(test)]
    pub fn from_paise(paise: i64) -> Self {
        Amount(paise)
    }

    #[cfg(test)]
    pub fn from_rupees(rupees: i64) -> Self {
        Amount(rupees * 100)
    }

    pub fn paise(self) -> i64 {
        self.0
    }

    pub fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Converts a decimal rupee value, rounding to the nearest paisa.
    pub fn from_decimal(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        let paise = (value * 100.0).round();
        if paise.abs() > i64::MAX as f64 {
            return None;
        }
        Some(Amount(paise as i64))
    }

    pub fn as_decimal(self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Parses user input such as `1500`, `1,500.5` or `-20.25`.
    ///
    /// At most two fractional digits are accepted.
    pub fn parse(input: &str) -> Option<Self> {
        let cleaned: String = input
            .trim()
            .chars()
            .filter(|c| *c != ',' && *c != '_')
            .collect();
        let (negative, digits) = match cleaned.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, cleaned.as_str()),
        };

        let (whole, fraction) = match digits.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (digits, ""),
        };
        if whole.is_empty() && fraction.is_empty() {
            return None;
        }
        if !whole.chars().all(|c| c.is_ascii_digit())
            || !fraction.chars().all(|c| c.is_ascii_digit())
            || fraction.len() > 2
        {
            return None;
        }

        let whole: i64 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
        let fraction: i64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().ok()? * 10,
            _ => fraction.parse().ok()?,
        };
        let paise = whole.checked_mul(100)?.checked_add(fraction)?;
        Some(Amount(if negative { -paise } else { paise }))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        if abs % 100 == 0 {
            write!(f, "{}{}", sign, abs / 100)
        } else {
            write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
        }
    }
}

impl Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Amount) -> Amount {
        Amount(self.0 + rhs.0)
    }
}

impl Sub for Amount {
    type Output = Amount;

    fn sub(self, rhs: Amount) -> Amount {
        Amount(self.0 - rhs.0)
    }
}

impl std::iter::Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Amount {
        iter.fold(Amount::ZERO, Add::add)
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0 % 100 == 0 {
            serializer.serialize_i64(self.0 / 100)
        } else {
            serializer.serialize_f64(self.as_decimal())
        }
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(AmountVisitor)
    }
}

struct AmountVisitor;

impl<'de> Visitor<'de> for AmountVisitor {
    type Value = Amount;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a rupee amount as a number or decimal string")
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Amount, E> {
        value
            .checked_mul(100)
            .map(Amount)
            .ok_or_else(|| E::custom("amount out of range"))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Amount, E> {
        i64::try_from(value)
            .map_err(|_| E::custom("amount out of range"))
            .and_then(|v| self.visit_i64(v))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Amount, E> {
        Amount::from_decimal(value).ok_or_else(|| E::custom("amount out of range"))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Amount, E> {
        Amount::parse(value).ok_or_else(|| E::custom(format!("invalid amount `{value}`")))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Amount, E> {
        Ok(Amount::ZERO)
    }

    fn visit_none<E: de::Error>(self) -> Result<Amount, E> {
        Ok(Amount::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_user_input() {
        assert_eq!(Amount::parse("1500"), Some(Amount::from_rupees(1500)));
        assert_eq!(Amount::parse("1,500.5"), Some(Amount::from_paise(150_050)));
        assert_eq!(Amount::parse(" 0.05 "), Some(Amount::from_paise(5)));
        assert_eq!(Amount::parse("-20.25"), Some(Amount::from_paise(-2025)));
        assert_eq!(Amount::parse(""), None);
        assert_eq!(Amount::parse("."), None);
        assert_eq!(Amount::parse("12.345"), None);
        assert_eq!(Amount::parse("12a"), None);
    }

    #[test]
    fn displays_without_trailing_zero_paise() {
        assert_eq!(Amount::from_rupees(2500).to_string(), "2500");
        assert_eq!(Amount::from_paise(250_050).to_string(), "2500.50");
        assert_eq!(Amount::from_paise(-5).to_string(), "-0.05");
    }

    #[test]
    fn reads_numbers_and_decimal_strings_from_json() {
        let values: Vec<Amount> =
            serde_json::from_str(r#"[1000, 999.99, "1200.50", null]"#).unwrap();
        assert_eq!(
            values,
            vec![
                Amount::from_rupees(1000),
                Amount::from_paise(99_999),
                Amount::from_paise(120_050),
                Amount::ZERO,
            ]
        );
    }

    #[test]
    fn writes_rupees_to_json() {
        assert_eq!(serde_json::to_string(&Amount::from_rupees(75)).unwrap(), "75");
        assert_eq!(serde_json::to_string(&Amount::from_paise(7_550)).unwrap(), "75.5");
    }
}
