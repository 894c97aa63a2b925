use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::EngineError;

/// Money amount in currency units, as stored in the `expenses.amount` column.
///
/// `Amount` is the boundary type for user input: parsing strips thousands
/// separators and whitespace before numeric conversion, and display renders
/// two decimals with thousands separators.
///
/// # Examples
///
/// ```rust
/// use engine::Amount;
///
/// let amount: Amount = "1,234.5".parse().unwrap();
/// assert_eq!(amount.value(), 1234.5);
/// assert_eq!(amount.to_string(), "1,234.50");
/// ```
///
/// Parsing only checks that the text is a finite number; sign rules belong to
/// the caller:
///
/// ```rust
/// use engine::Amount;
///
/// assert!("abc".parse::<Amount>().is_err());
/// assert!("".parse::<Amount>().is_err());
/// assert!("-3".parse::<Amount>().unwrap().value() < 0.0);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(f64);

impl Amount {
    pub const ZERO: Amount = Amount(0.0);

    #[must_use]
    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }

    #[must_use]
    pub fn is_positive(self) -> bool {
        self.0 > 0.0
    }

    /// Parses an expense amount: must be a number strictly greater than zero.
    pub fn parse_positive(raw: &str) -> Result<Self, EngineError> {
        let amount: Amount = raw.parse()?;
        if !amount.is_positive() {
            return Err(EngineError::InvalidAmount(format!(
                "amount must be > 0, got {raw:?}"
            )));
        }
        Ok(amount)
    }

    /// Parses a limit-like amount: zero is accepted, negatives are not.
    pub fn parse_non_negative(raw: &str) -> Result<Self, EngineError> {
        let amount: Amount = raw.parse()?;
        if amount.0 < 0.0 {
            return Err(EngineError::InvalidAmount(format!(
                "amount must be >= 0, got {raw:?}"
            )));
        }
        // normalise -0.0
        Ok(Self(amount.0.abs()))
    }
}

impl From<f64> for Amount {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl From<Amount> for f64 {
    fn from(value: Amount) -> Self {
        value.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = format!("{:.2}", self.0.abs());
        let (int_part, frac_part) = rendered.split_once('.').unwrap_or((rendered.as_str(), "00"));

        let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
        for (idx, ch) in int_part.chars().enumerate() {
            if idx > 0 && (int_part.len() - idx) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }

        let sign = if self.0 < 0.0 && rendered != "0.00" {
            "-"
        } else {
            ""
        };
        write!(f, "{sign}{grouped}.{frac_part}")
    }
}

impl FromStr for Amount {
    type Err = EngineError;

    /// Parses a decimal string, ignoring `,` thousands separators.
    ///
    /// Rejects empty input, non-numeric text, `inf` and `NaN`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cleaned: String = s.trim().chars().filter(|c| *c != ',').collect();
        if cleaned.is_empty() {
            return Err(EngineError::InvalidAmount("empty amount".to_string()));
        }

        let invalid = || EngineError::InvalidAmount(format!("not a number: {s:?}"));
        // f64::from_str accepts "inf"/"nan" spellings; only plain decimals are amounts.
        if !cleaned
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+'))
        {
            return Err(invalid());
        }

        let value: f64 = cleaned.parse().map_err(|_| invalid())?;
        if !value.is_finite() {
            return Err(invalid());
        }
        Ok(Self(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_groups_thousands() {
        assert_eq!(Amount::new(0.0).to_string(), "0.00");
        assert_eq!(Amount::new(5.5).to_string(), "5.50");
        assert_eq!(Amount::new(999.999).to_string(), "1,000.00");
        assert_eq!(Amount::new(1234.56).to_string(), "1,234.56");
        assert_eq!(Amount::new(1_234_567.0).to_string(), "1,234,567.00");
        assert_eq!(Amount::new(-1234.5).to_string(), "-1,234.50");
    }

    #[test]
    fn parse_strips_thousands_separators() {
        assert_eq!("1,234.56".parse::<Amount>().unwrap().value(), 1234.56);
        assert_eq!(" 12 ".parse::<Amount>().unwrap().value(), 12.0);
        assert_eq!("1,000,000".parse::<Amount>().unwrap().value(), 1_000_000.0);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!("".parse::<Amount>().is_err());
        assert!(",".parse::<Amount>().is_err());
        assert!("12abc".parse::<Amount>().is_err());
        assert!("inf".parse::<Amount>().is_err());
        assert!("NaN".parse::<Amount>().is_err());
        assert!("1.2.3".parse::<Amount>().is_err());
    }

    #[test]
    fn positive_rejects_zero_and_negative() {
        assert!(Amount::parse_positive("0").unwrap_err().is_validation());
        assert!(Amount::parse_positive("-1").unwrap_err().is_validation());
        assert_eq!(Amount::parse_positive("0.01").unwrap().value(), 0.01);
    }

    #[test]
    fn non_negative_accepts_zero() {
        assert_eq!(Amount::parse_non_negative("0").unwrap(), Amount::ZERO);
        assert_eq!(Amount::parse_non_negative("-0").unwrap(), Amount::ZERO);
        assert!(Amount::parse_non_negative("-5").is_err());
        assert_eq!(Amount::parse_non_negative("2,500").unwrap().value(), 2500.0);
    }
}
