//! Integer amount type used for every monetary value in the engine.
//!
//! Amounts are whole units (minor currency units or abstract units). Arithmetic
//! saturates instead of wrapping so a pathological input can never flip the sign
//! of a score.

use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::num::ParseIntError;
use std::ops::{Add, Sub};
use std::str::FromStr;

/// A signed whole-unit amount.
///
/// # Examples
///
/// ```
/// use std::str::FromStr;
/// use fraud_engine::Amount;
///
/// let amount = Amount::from_str(" 1200 ").unwrap();
/// assert_eq!(amount, Amount::new(1200));
/// assert_eq!(amount.to_string(), "1200");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Deserialize)]
#[serde(transparent)]
pub struct Amount(i64);

impl Amount {
    /// Zero value.
    pub const ZERO: Self = Amount(0);

    pub const fn new(value: i64) -> Self {
        Amount(value)
    }

    /// Returns the raw integer value.
    pub const fn value(self) -> i64 {
        self.0
    }

    pub fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Twice this amount, saturating at the `i64` bounds.
    pub fn doubled(self) -> Self {
        Amount(self.0.saturating_mul(2))
    }

    /// Clamps negative values to zero.
    pub fn clamp_non_negative(self) -> Self {
        Amount(self.0.max(0))
    }

    /// Exact subtraction, `None` on overflow.
    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.0.checked_sub(rhs.0).map(Amount)
    }

    /// Mean of a sum over `count` items, truncating toward zero.
    ///
    /// Returns zero when `count` is zero.
    pub fn mean(sum: i128, count: u64) -> Self {
        if count == 0 {
            return Amount::ZERO;
        }
        // |sum / count| <= max |amount|, so the quotient always fits.
        Amount((sum / i128::from(count)) as i64)
    }
}

impl FromStr for Amount {
    type Err = ParseIntError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        s.trim().parse::<i64>().map(Amount)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Add for Amount {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Amount(self.0.saturating_add(rhs.0))
    }
}

impl Sub for Amount {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Amount(self.0.saturating_sub(rhs.0))
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_i64(self.0)
    }
}
