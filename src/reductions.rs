//! Reductions
//!
//! A reduction describes how a discount lowers an offer's base price. Both the store and the
//! HTTP surface carry it in the compact `"N%"` / `"N"` text form.

use std::{fmt, str::FromStr};

use thiserror::Error;

/// Largest percentage a reduction may take away.
pub const MAX_PERCENT: u8 = 100;

/// Errors raised while building or decoding a reduction.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReductionError {
    /// The descriptor had no content.
    #[error("reduction descriptor is empty")]
    Empty,

    /// The amount was not a non-negative integer.
    #[error("reduction amount {0:?} is not a non-negative integer")]
    InvalidAmount(String),

    /// The percentage was larger than [`MAX_PERCENT`].
    #[error("reduction percentage {0} exceeds 100")]
    PercentOutOfRange(u64),
}

/// How much a discount takes off an offer's base price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reduction {
    /// Percentage of the base price, `0..=100`.
    Percent(u8),

    /// Fixed number of credits.
    Absolute(u64),
}

impl Reduction {
    /// Build a percentage reduction.
    ///
    /// # Errors
    ///
    /// Returns [`ReductionError::PercentOutOfRange`] when `amount` exceeds [`MAX_PERCENT`].
    pub fn percent(amount: u64) -> Result<Self, ReductionError> {
        u8::try_from(amount)
            .ok()
            .filter(|percent| *percent <= MAX_PERCENT)
            .map(Self::Percent)
            .ok_or(ReductionError::PercentOutOfRange(amount))
    }

    /// Build an absolute reduction.
    #[must_use]
    pub const fn absolute(amount: u64) -> Self {
        Self::Absolute(amount)
    }
}

impl fmt::Display for Reduction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Percent(amount) => write!(f, "{amount}%"),
            Self::Absolute(amount) => write!(f, "{amount}"),
        }
    }
}

impl FromStr for Reduction {
    type Err = ReductionError;

    fn from_str(descriptor: &str) -> Result<Self, Self::Err> {
        let descriptor = descriptor.trim();

        if descriptor.is_empty() {
            return Err(ReductionError::Empty);
        }

        match descriptor.strip_suffix('%') {
            Some(amount) => Self::percent(parse_amount(amount.trim_end())?),
            None => Ok(Self::absolute(parse_amount(descriptor)?)),
        }
    }
}

fn parse_amount(amount: &str) -> Result<u64, ReductionError> {
    // `u64::from_str` would also accept a leading `+`.
    if amount.is_empty() || !amount.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(ReductionError::InvalidAmount(amount.to_string()));
    }

    amount
        .parse()
        .map_err(|_overflow| ReductionError::InvalidAmount(amount.to_string()))
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn parses_percent_descriptor() -> TestResult {
        assert_eq!("25%".parse::<Reduction>()?, Reduction::Percent(25));
        assert_eq!(" 100 % ".parse::<Reduction>()?, Reduction::Percent(100));

        Ok(())
    }

    #[test]
    fn parses_multi_digit_percent_in_full() -> TestResult {
        // Only the leading digit would survive a naive one-character slice.
        assert_eq!("75%".parse::<Reduction>()?, Reduction::Percent(75));

        Ok(())
    }

    #[test]
    fn parses_absolute_descriptor() -> TestResult {
        assert_eq!("80".parse::<Reduction>()?, Reduction::Absolute(80));
        assert_eq!("0".parse::<Reduction>()?, Reduction::Absolute(0));

        Ok(())
    }

    #[test]
    fn rejects_percent_over_one_hundred() {
        assert_eq!(
            "101%".parse::<Reduction>(),
            Err(ReductionError::PercentOutOfRange(101))
        );
    }

    #[test]
    fn rejects_malformed_descriptors() {
        for descriptor in ["", "  ", "%", "abc", "-5", "+5", "1.5%", "10%%", "1e3"] {
            assert!(
                descriptor.parse::<Reduction>().is_err(),
                "expected {descriptor:?} to be rejected"
            );
        }
    }

    #[test]
    fn display_matches_storage_format() {
        assert_eq!(Reduction::Percent(20).to_string(), "20%");
        assert_eq!(Reduction::Absolute(300).to_string(), "300");
    }
}
