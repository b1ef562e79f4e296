//! Durations and offsets
//!
//! A `Duration` keeps the numerator/denominator pair it was built with, so
//! 2/8 stays 2/8 instead of collapsing to 1/4. The pair decides how a
//! division is notated; comparisons and hashing still go by value.
//!
//! Offsets are plain reduced rationals: they are positions, never notated.

use num_rational::Rational64;
use num_traits::{CheckedAdd, CheckedMul};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use thiserror::Error;

/// Exact rational used for all timeline arithmetic
pub type Rational = Rational64;

/// Absolute position on a timeline
pub type Offset = Rational;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DurationError {
    #[error("Duration denominator must be positive: {numerator}/{denominator}")]
    NonPositiveDenominator { numerator: i64, denominator: i64 },

    #[error("Duration arithmetic overflowed: {0}")]
    Overflow(String),
}

/// Span of musical time as a non-reduced fraction
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "(i64, i64)", into = "(i64, i64)")]
pub struct Duration {
    numerator: i64,
    denominator: i64,
}

impl Duration {
    /// Create a duration, keeping the pair exactly as given
    pub fn new(numerator: i64, denominator: i64) -> Result<Self, DurationError> {
        if denominator <= 0 {
            return Err(DurationError::NonPositiveDenominator {
                numerator,
                denominator,
            });
        }
        Ok(Self {
            numerator,
            denominator,
        })
    }

    pub fn zero() -> Self {
        Self {
            numerator: 0,
            denominator: 1,
        }
    }

    /// Duration in lowest terms from a rational value
    pub fn from_rational(value: Rational) -> Self {
        // Ratio keeps its denominator positive once normalized
        Self {
            numerator: *value.numer(),
            denominator: *value.denom(),
        }
    }

    pub fn numerator(&self) -> i64 {
        self.numerator
    }

    pub fn denominator(&self) -> i64 {
        self.denominator
    }

    /// The stored (non-reduced) pair
    pub fn pair(&self) -> (i64, i64) {
        (self.numerator, self.denominator)
    }

    /// Reduced value
    pub fn value(&self) -> Rational {
        Rational::new(self.numerator, self.denominator)
    }

    pub fn is_positive(&self) -> bool {
        self.numerator > 0
    }

    pub fn is_zero(&self) -> bool {
        self.numerator == 0
    }

    /// Re-express over `denominator` when the value allows it exactly
    pub fn with_denominator(&self, denominator: i64) -> Option<Self> {
        if denominator <= 0 {
            return None;
        }
        let scaled = self.value().checked_mul(&Rational::from_integer(denominator))?;
        if scaled.is_integer() {
            Some(Self {
                numerator: scaled.to_integer(),
                denominator,
            })
        } else {
            None
        }
    }

    /// Multiply by `factor`, keeping this denominator when it still fits
    pub fn scale(&self, factor: Rational) -> Result<Self, DurationError> {
        let product = self
            .value()
            .checked_mul(&factor)
            .map(Self::from_rational)
            .ok_or_else(|| DurationError::Overflow(format!("{} * {}", self, factor)))?;
        Ok(product
            .with_denominator(self.denominator)
            .unwrap_or(product))
    }

    /// Non-reduced sum: same denominators add numerators, otherwise both
    /// sides go over the lcm
    pub fn checked_add(&self, other: &Self) -> Result<Self, DurationError> {
        self.common(other)
            .and_then(|(a, b, denominator)| {
                a.checked_add(b).map(|numerator| Self {
                    numerator,
                    denominator,
                })
            })
            .ok_or_else(|| DurationError::Overflow(format!("{} + {}", self, other)))
    }

    /// Non-reduced difference, same rules as `checked_add`
    pub fn checked_sub(&self, other: &Self) -> Result<Self, DurationError> {
        self.common(other)
            .and_then(|(a, b, denominator)| {
                a.checked_sub(b).map(|numerator| Self {
                    numerator,
                    denominator,
                })
            })
            .ok_or_else(|| DurationError::Overflow(format!("{} - {}", self, other)))
    }

    /// Sum of all durations; zero when empty
    pub fn checked_sum<I>(durations: I) -> Result<Self, DurationError>
    where
        I: IntoIterator<Item = Duration>,
    {
        let mut iter = durations.into_iter();
        match iter.next() {
            Some(first) => iter.try_fold(first, |acc, d| acc.checked_add(&d)),
            None => Ok(Duration::zero()),
        }
    }

    /// Offset at which this duration ends when started at `start`
    pub fn stop_from(&self, start: Offset) -> Result<Offset, DurationError> {
        start
            .checked_add(&self.value())
            .ok_or_else(|| DurationError::Overflow(format!("{} + {}", start, self)))
    }

    /// True when one notehead (with dots) can carry this duration
    ///
    /// The reduced denominator must be a power of two, the value must lie in
    /// (0, 16) and the reduced numerator may not contain `01` in binary.
    pub fn is_assignable(&self) -> bool {
        let value = self.value();
        if value <= Rational::from_integer(0) || value >= Rational::from_integer(16) {
            return false;
        }
        is_power_of_two(*value.denom()) && is_assignable_integer(*value.numer())
    }

    /// Compound meters group in threes: 6/8, 9/8, 12/16, but not 3/8
    pub fn is_compound_meter(&self) -> bool {
        self.numerator % 3 == 0 && self.numerator != 3 && self.numerator > 0
    }

    fn cross(&self, other: &Self) -> (i128, i128) {
        (
            self.numerator as i128 * other.denominator as i128,
            other.numerator as i128 * self.denominator as i128,
        )
    }

    /// Bring two durations over a shared denominator; `None` on overflow
    fn common(&self, other: &Self) -> Option<(i64, i64, i64)> {
        if self.denominator == other.denominator {
            return Some((self.numerator, other.numerator, self.denominator));
        }
        let denominator = lcm(self.denominator, other.denominator)?;
        Some((
            self.numerator.checked_mul(denominator / self.denominator)?,
            other.numerator.checked_mul(denominator / other.denominator)?,
            denominator,
        ))
    }
}

impl Default for Duration {
    fn default() -> Self {
        Self::zero()
    }
}

impl PartialEq for Duration {
    fn eq(&self, other: &Self) -> bool {
        let (a, b) = self.cross(other);
        a == b
    }
}

impl Eq for Duration {}

impl Hash for Duration {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value().hash(state);
    }
}

impl PartialOrd for Duration {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Duration {
    fn cmp(&self, other: &Self) -> Ordering {
        let (a, b) = self.cross(other);
        a.cmp(&b)
    }
}

impl TryFrom<(i64, i64)> for Duration {
    type Error = DurationError;

    fn try_from((numerator, denominator): (i64, i64)) -> Result<Self, Self::Error> {
        Duration::new(numerator, denominator)
    }
}

impl From<Duration> for (i64, i64) {
    fn from(duration: Duration) -> Self {
        duration.pair()
    }
}

impl From<Duration> for Rational {
    fn from(duration: Duration) -> Self {
        duration.value()
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

/// Compute GCD of two numbers
fn gcd(a: i64, b: i64) -> i64 {
    if b == 0 { a.abs() } else { gcd(b, a % b) }
}

/// Compute LCM of two positive numbers; `None` when it overflows
fn lcm(a: i64, b: i64) -> Option<i64> {
    (a / gcd(a, b)).checked_mul(b)
}

fn is_power_of_two(n: i64) -> bool {
    n > 0 && n & (n - 1) == 0
}

fn is_assignable_integer(n: i64) -> bool {
    n > 0 && !format!("{:b}", n).contains("01")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(n: i64, den: i64) -> Duration {
        Duration::new(n, den).unwrap()
    }

    #[test]
    fn test_rejects_non_positive_denominator() {
        assert!(Duration::new(1, 0).is_err());
        assert!(Duration::new(1, -4).is_err());
    }

    #[test]
    fn test_keeps_non_reduced_pair() {
        let two_eighths = d(2, 8);
        assert_eq!(two_eighths.pair(), (2, 8));
        assert_eq!(two_eighths, d(1, 4));
    }

    #[test]
    fn test_add_same_denominator_keeps_denominator() {
        assert_eq!(d(7, 8).checked_add(&d(3, 8)).unwrap().pair(), (10, 8));
    }

    #[test]
    fn test_add_mixed_denominators_uses_lcm() {
        assert_eq!(d(1, 4).checked_add(&d(1, 8)).unwrap().pair(), (3, 8));
        assert_eq!(d(1, 6).checked_add(&d(1, 4)).unwrap().pair(), (5, 12));
    }

    #[test]
    fn test_sub() {
        assert_eq!(d(7, 8).checked_sub(&d(3, 4)).unwrap().pair(), (1, 8));
        assert!(d(1, 4).checked_sub(&d(1, 4)).unwrap().is_zero());
    }

    #[test]
    fn test_sum() {
        assert!(Duration::checked_sum(Vec::new()).unwrap().is_zero());
        let total = Duration::checked_sum(vec![d(1, 8), d(2, 8), d(1, 4)]).unwrap();
        assert_eq!(total.pair(), (5, 8));
    }

    #[test]
    fn test_coprime_denominators_overflow_is_an_error() {
        let a = d(1, 4_611_686_018_427_387_903);
        let b = d(1, 4_611_686_018_427_387_902);
        assert!(matches!(a.checked_add(&b), Err(DurationError::Overflow(_))));
        assert!(matches!(a.checked_sub(&b), Err(DurationError::Overflow(_))));
        assert!(Duration::checked_sum(vec![a, b]).is_err());
        assert!(d(i64::MAX, 1).checked_add(&d(1, 1)).is_err());
    }

    #[test]
    fn test_stop_from() {
        assert_eq!(d(3, 8).stop_from(Offset::new(1, 4)), Ok(Offset::new(5, 8)));
        assert!(d(1, 1).stop_from(Offset::from_integer(i64::MAX)).is_err());
    }

    #[test]
    fn test_with_denominator() {
        assert_eq!(d(1, 4).with_denominator(16).map(|x| x.pair()), Some((4, 16)));
        assert_eq!(d(1, 3).with_denominator(8), None);
    }

    #[test]
    fn test_assignable() {
        assert!(d(1, 4).is_assignable());
        assert!(d(3, 8).is_assignable());
        assert!(d(7, 16).is_assignable());
        assert!(d(4, 8).is_assignable());
        assert!(!d(5, 8).is_assignable());
        assert!(!d(1, 3).is_assignable());
        assert!(!d(0, 4).is_assignable());
    }

    #[test]
    fn test_compound_meter() {
        assert!(d(6, 8).is_compound_meter());
        assert!(d(9, 16).is_compound_meter());
        assert!(!d(3, 8).is_compound_meter());
        assert!(!d(4, 4).is_compound_meter());
    }

    #[test]
    fn test_scale_keeps_denominator() {
        let scaled = d(6, 8).scale(Rational::new(3, 2)).unwrap();
        assert_eq!(scaled.pair(), (9, 8));
        assert!(d(i64::MAX, 1).scale(Rational::from_integer(2)).is_err());
    }

    #[test]
    fn test_serde_as_pair() {
        let json = serde_json::to_string(&d(2, 8)).unwrap();
        assert_eq!(json, "[2,8]");
        let back: Duration = serde_json::from_str("[3,16]").unwrap();
        assert_eq!(back.pair(), (3, 16));
        assert!(serde_json::from_str::<Duration>("[1,0]").is_err());
    }
}
