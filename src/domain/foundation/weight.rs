//! Weight value object: a question's percentage contribution to the total score.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// Minimum weight a question may carry.
pub const MIN_WEIGHT: f64 = 0.1;

/// Maximum weight a question may carry.
pub const MAX_WEIGHT: f64 = 100.0;

/// Upper bound for the sum of weights in one question set.
pub const WEIGHT_SUM_LIMIT: f64 = 100.0;

/// Floating tolerance applied when checking the set-wide weight sum.
pub const WEIGHT_SUM_TOLERANCE: f64 = 0.01;

/// Percentage contribution of a question to the total score, in [0.1, 100].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Weight(f64);

impl Weight {
    /// Creates a Weight, returning error if out of range or not finite.
    pub fn try_new(value: f64) -> Result<Self, ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::invalid_format("weight", "must be a finite number"));
        }
        if !(MIN_WEIGHT..=MAX_WEIGHT).contains(&value) {
            return Err(ValidationError::out_of_range(
                "weight", MIN_WEIGHT, MAX_WEIGHT, value,
            ));
        }
        Ok(Self(value))
    }

    /// Returns the value as f64.
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Returns the weight as a fraction of 100 (0.001 to 1.0).
    pub fn as_fraction(&self) -> f64 {
        self.0 / 100.0
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn try_new_accepts_valid_range() {
        assert!(Weight::try_new(0.1).is_ok());
        assert!(Weight::try_new(40.0).is_ok());
        assert!(Weight::try_new(100.0).is_ok());
    }

    #[test]
    fn try_new_rejects_out_of_range() {
        assert!(Weight::try_new(0.0).is_err());
        assert!(Weight::try_new(0.09).is_err());
        assert!(Weight::try_new(100.1).is_err());
        assert!(Weight::try_new(f64::NAN).is_err());
    }

    #[test]
    fn as_fraction_converts_correctly() {
        let w = Weight::try_new(40.0).unwrap();
        assert!((w.as_fraction() - 0.4).abs() < f64::EPSILON);
    }

    #[test]
    fn displays_with_percent_sign() {
        assert_eq!(format!("{}", Weight::try_new(60.0).unwrap()), "60%");
    }
}
