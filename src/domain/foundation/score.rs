//! Likert raw scores and their normalized 0-100 form.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// Lowest selectable point on the Likert scale.
pub const RAW_SCORE_MIN: u8 = 1;

/// Highest selectable point on the Likert scale.
pub const RAW_SCORE_MAX: u8 = 7;

/// A selection on the fixed 1-7 Likert scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct RawScore(u8);

impl RawScore {
    /// Creates a RawScore, returning error if outside 1-7.
    pub fn try_new(value: i64) -> Result<Self, ValidationError> {
        if value < RAW_SCORE_MIN as i64 || value > RAW_SCORE_MAX as i64 {
            return Err(ValidationError::out_of_range(
                "raw_score",
                RAW_SCORE_MIN as i32,
                RAW_SCORE_MAX as i32,
                value.clamp(i32::MIN as i64, i32::MAX as i64) as i32,
            ));
        }
        Ok(Self(value as u8))
    }

    /// Returns the numeric value.
    pub fn value(&self) -> u8 {
        self.0
    }

    /// Maps the selection onto 0-100, rounded to two decimals.
    pub fn normalized(&self) -> NormalizedScore {
        let span = (RAW_SCORE_MAX - RAW_SCORE_MIN) as f64;
        NormalizedScore(round2((self.0 - RAW_SCORE_MIN) as f64 / span * 100.0))
    }
}

impl TryFrom<i64> for RawScore {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<RawScore> for u8 {
    fn from(score: RawScore) -> Self {
        score.0
    }
}

impl fmt::Display for RawScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A score on the 0-100 scale, always carried with two-decimal precision.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NormalizedScore(f64);

impl NormalizedScore {
    /// Wraps a stored value, rejecting anything outside 0-100 or non-finite.
    pub fn try_new(value: f64) -> Result<Self, ValidationError> {
        if !value.is_finite() || !(0.0..=100.0).contains(&value) {
            return Err(ValidationError::invalid_format(
                "normalized_score",
                format!("{} is outside 0-100", value),
            ));
        }
        Ok(Self(round2(value)))
    }

    /// Returns the numeric value.
    pub fn value(&self) -> f64 {
        self.0
    }
}

/// Rounds half away from zero to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn anchors_normalize_to_known_values() {
        assert_eq!(RawScore::try_new(1).unwrap().normalized().value(), 0.0);
        assert_eq!(RawScore::try_new(4).unwrap().normalized().value(), 50.0);
        assert_eq!(RawScore::try_new(7).unwrap().normalized().value(), 100.0);
    }

    #[test]
    fn thirds_round_to_two_decimals() {
        assert_eq!(RawScore::try_new(2).unwrap().normalized().value(), 16.67);
        assert_eq!(RawScore::try_new(3).unwrap().normalized().value(), 33.33);
        assert_eq!(RawScore::try_new(6).unwrap().normalized().value(), 83.33);
    }

    #[test]
    fn rejects_values_outside_scale() {
        assert!(RawScore::try_new(0).is_err());
        assert!(RawScore::try_new(8).is_err());
        assert!(RawScore::try_new(-3).is_err());
    }

    #[test]
    fn deserialization_validates_range() {
        let ok: RawScore = serde_json::from_str("5").unwrap();
        assert_eq!(ok.value(), 5);
        assert!(serde_json::from_str::<RawScore>("9").is_err());
    }

    #[test]
    fn normalized_score_rejects_out_of_range() {
        assert!(NormalizedScore::try_new(-0.01).is_err());
        assert!(NormalizedScore::try_new(100.01).is_err());
        assert!(NormalizedScore::try_new(f64::NAN).is_err());
        assert_eq!(NormalizedScore::try_new(66.666).unwrap().value(), 66.67);
    }

    proptest! {
        #[test]
        fn normalization_matches_formula(raw in 1i64..=7) {
            let expected = (((raw - 1) as f64 / 6.0) * 100.0 * 100.0).round() / 100.0;
            let score = RawScore::try_new(raw).unwrap().normalized().value();
            prop_assert_eq!(score, expected);
            prop_assert!((0.0..=100.0).contains(&score));
        }

        #[test]
        fn normalization_is_monotonic(a in 1i64..=7, b in 1i64..=7) {
            let na = RawScore::try_new(a).unwrap().normalized().value();
            let nb = RawScore::try_new(b).unwrap().normalized().value();
            prop_assert_eq!(a.cmp(&b), na.partial_cmp(&nb).unwrap());
        }
    }
}
