//! Listing prices.
//!
//! The backend stores prices as decimals with two fractional digits and
//! serializes them as strings (`"49.99"`). Prices are kept as whole cents so
//! comparisons and sorting are exact.

use std::fmt;
use std::str::FromStr;

/// Errors raised while parsing a price.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PriceParseError {
    Empty,
    Negative,
    TooManyDecimals,
    Invalid { input: String },
}

impl fmt::Display for PriceParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "price must not be empty"),
            Self::Negative => write!(f, "price must not be negative"),
            Self::TooManyDecimals => write!(f, "price may have at most two decimal places"),
            Self::Invalid { input } => write!(f, "`{input}` is not a valid price"),
        }
    }
}

impl std::error::Error for PriceParseError {}

/// A non-negative amount of money in cents.
///
/// # Examples
/// ```
/// use mycollegebook::domain::Price;
///
/// let price: Price = "49.99".parse().unwrap();
/// assert_eq!(price.cents(), 4999);
/// assert_eq!(price.to_string(), "49.99");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Price(u64);

impl Price {
    pub const fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    pub const fn cents(self) -> u64 {
        self.0
    }

    /// Convert a JSON number, rounding to the nearest cent.
    pub fn from_f64(value: f64) -> Result<Self, PriceParseError> {
        if !value.is_finite() {
            return Err(PriceParseError::Invalid {
                input: value.to_string(),
            });
        }
        if value < 0.0 {
            return Err(PriceParseError::Negative);
        }
        #[expect(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "value is finite and non-negative"
        )]
        let cents = (value * 100.0).round() as u64;
        Ok(Self(cents))
    }
}

impl FromStr for Price {
    type Err = PriceParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(PriceParseError::Empty);
        }
        if trimmed.starts_with('-') {
            return Err(PriceParseError::Negative);
        }
        let invalid = || PriceParseError::Invalid {
            input: trimmed.to_owned(),
        };

        let (whole, fraction) = trimmed.split_once('.').unwrap_or((trimmed, ""));
        let all_digits = |part: &str| part.bytes().all(|byte| byte.is_ascii_digit());
        if (whole.is_empty() && fraction.is_empty()) || !all_digits(whole) || !all_digits(fraction) {
            return Err(invalid());
        }
        if fraction.len() > 2 {
            return Err(PriceParseError::TooManyDecimals);
        }

        let whole: u64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid())?
        };
        let fraction: u64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<u64>().map_err(|_| invalid())? * 10,
            _ => fraction.parse().map_err(|_| invalid())?,
        };
        whole
            .checked_mul(100)
            .and_then(|cents| cents.checked_add(fraction))
            .map(Self)
            .ok_or_else(invalid)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}
