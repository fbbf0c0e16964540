//! Score value object (0-100 scale, two-decimal precision).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// A score between 0 and 100 inclusive, rounded to two decimals.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Score(f64);

impl Score {
    /// Zero score.
    pub const ZERO: Self = Self(0.0);

    /// Full score.
    pub const MAX: Self = Self(100.0);

    /// Creates a Score by clamping into [0, 100] and rounding to two decimals.
    pub fn clamped(value: f64) -> Self {
        Self(round2(value.clamp(0.0, 100.0)))
    }

    /// Creates a Score, returning error if out of range or not finite.
    pub fn try_new(value: f64) -> Result<Self, ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::invalid_format("score", "must be a finite number"));
        }
        if !(0.0..=100.0).contains(&value) {
            return Err(ValidationError::out_of_range("score", 0.0, 100.0, value));
        }
        Ok(Self(round2(value)))
    }

    /// Returns the value as f64.
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl Default for Score {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Rounds to two decimal places, half away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamped_keeps_valid_values() {
        assert_eq!(Score::clamped(0.0).value(), 0.0);
        assert_eq!(Score::clamped(72.5).value(), 72.5);
        assert_eq!(Score::clamped(100.0).value(), 100.0);
    }

    #[test]
    fn clamped_bounds_out_of_range_values() {
        assert_eq!(Score::clamped(-10.0).value(), 0.0);
        assert_eq!(Score::clamped(130.0).value(), 100.0);
    }

    #[test]
    fn clamped_rounds_to_two_decimals() {
        assert_eq!(Score::clamped(33.333333).value(), 33.33);
        assert_eq!(Score::clamped(66.666666).value(), 66.67);
    }

    #[test]
    fn try_new_rejects_out_of_range() {
        assert!(Score::try_new(100.01).is_err());
        assert!(Score::try_new(-0.01).is_err());
        assert!(Score::try_new(f64::NAN).is_err());
        assert!(Score::try_new(f64::INFINITY).is_err());
    }

    #[test]
    fn try_new_accepts_boundaries() {
        assert_eq!(Score::try_new(0.0).unwrap(), Score::ZERO);
        assert_eq!(Score::try_new(100.0).unwrap(), Score::MAX);
    }

    #[test]
    fn serializes_transparently() {
        let json = serde_json::to_string(&Score::clamped(84.0)).unwrap();
        assert_eq!(json, "84.0");
    }
}
