use std::{fmt, str::FromStr, sync::LazyLock};

use regex::Regex;
use validator::ValidationError;

static SLUG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-a-zA-Z0-9_]+$").expect("valid slug regex"));

/// Amount in cents, rendered with two decimals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, serde::Serialize)]
pub struct Price(pub i64);

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum PriceError {
    #[error("Enter a number.")]
    Invalid,
    #[error("Ensure that there are no more than 2 decimal places.")]
    TooManyDecimals,
}

impl Price {
    pub fn cents(&self) -> i64 {
        self.0
    }
}

impl From<i64> for Price {
    fn from(cents: i64) -> Self {
        Self(cents)
    }
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (negative, digits) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            _ => (false, s.strip_prefix('+').unwrap_or(s)),
        };

        let (whole, fraction) = digits.split_once('.').unwrap_or((digits, ""));

        if (whole.is_empty() && fraction.is_empty())
            || !whole.chars().all(|c| c.is_ascii_digit())
            || !fraction.chars().all(|c| c.is_ascii_digit())
        {
            return Err(PriceError::Invalid);
        }

        if fraction.len() > 2 {
            return Err(PriceError::TooManyDecimals);
        }

        let whole = if whole.is_empty() {
            0
        } else {
            whole.parse::<i64>().map_err(|_| PriceError::Invalid)?
        };

        let fraction = format!("{fraction:0<2}")
            .parse::<i64>()
            .map_err(|_| PriceError::Invalid)?;

        let cents = whole
            .checked_mul(100)
            .and_then(|v| v.checked_add(fraction))
            .ok_or(PriceError::Invalid)?;

        Ok(Self(if negative { -cents } else { cents }))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();

        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

pub(crate) fn validate_price(price: &Price) -> Result<(), ValidationError> {
    if price.0 > 0 {
        return Ok(());
    }

    let mut error = ValidationError::new("min_value");
    error.message = Some("Ensure this value is greater than 0.".into());

    Err(error)
}

pub(crate) fn validate_slug(slug: &str) -> Result<(), ValidationError> {
    if SLUG_RE.is_match(slug) {
        return Ok(());
    }

    let mut error = ValidationError::new("invalid_slug");
    error.message = Some(
        "Enter a valid slug consisting of letters, numbers, underscores or hyphens.".into(),
    );

    Err(error)
}

/// Lowercases ASCII letters and digits and joins the remaining runs with `-`.
pub fn slugify(value: &str) -> String {
    let mut slug = String::with_capacity(value.len());

    for c in value.trim().chars() {
        if c.is_ascii_alphanumeric() || c == '_' {
            slug.push(c.to_ascii_lowercase());
        } else if (c.is_whitespace() || c == '-') && !slug.ends_with('-') && !slug.is_empty() {
            slug.push('-');
        }
    }

    slug.trim_end_matches('-').to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_parse() {
        assert_eq!("10".parse::<Price>(), Ok(Price(1000)));
        assert_eq!("10.5".parse::<Price>(), Ok(Price(1050)));
        assert_eq!("10.00".parse::<Price>(), Ok(Price(1000)));
        assert_eq!(" 0.99 ".parse::<Price>(), Ok(Price(99)));
        assert_eq!(".5".parse::<Price>(), Ok(Price(50)));
        assert_eq!("0.00".parse::<Price>(), Ok(Price(0)));
        assert_eq!("-1.00".parse::<Price>(), Ok(Price(-100)));
        assert_eq!("abc".parse::<Price>(), Err(PriceError::Invalid));
        assert_eq!("".parse::<Price>(), Err(PriceError::Invalid));
        assert_eq!("1.2.3".parse::<Price>(), Err(PriceError::Invalid));
        assert_eq!("1e3".parse::<Price>(), Err(PriceError::Invalid));
        assert_eq!("10.001".parse::<Price>(), Err(PriceError::TooManyDecimals));
    }

    #[test]
    fn test_price_display() {
        assert_eq!(Price(1000).to_string(), "10.00");
        assert_eq!(Price(1050).to_string(), "10.50");
        assert_eq!(Price(7).to_string(), "0.07");
        assert_eq!(Price(-100).to_string(), "-1.00");
    }

    #[test]
    fn test_price_must_be_positive() {
        assert!(validate_price(&Price(1000)).is_ok());
        assert!(validate_price(&Price(1)).is_ok());

        let err = validate_price(&Price(0)).unwrap_err();
        assert_eq!(
            err.message.as_deref(),
            Some("Ensure this value is greater than 0.")
        );
        assert!(validate_price(&Price(-100)).is_err());
    }

    #[test]
    fn test_slug() {
        assert!(validate_slug("pizza-margherita_2").is_ok());
        assert!(validate_slug("pizza margherita").is_err());
        assert!(validate_slug("").is_err());

        assert_eq!(slugify("  Pizza  Margherita! "), "pizza-margherita");
        assert_eq!(slugify("Crème brûlée"), "crme-brle");
    }
}
