//! Envelope curves.

use serde::{Deserialize, Serialize};

/// A pair of amplitude curves that bound a signal.
///
/// The positive arm shapes samples at or above zero, the negative arm shapes
/// samples below zero. Arm values are used by magnitude, so the negative arm
/// may be given as negative numbers. Arm lengths are independent of each
/// other and of the signal they are applied to.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Envelope {
    /// Curve applied to non-negative samples.
    #[serde(default)]
    pub positive: Vec<f64>,
    /// Curve applied to negative samples.
    #[serde(default)]
    pub negative: Vec<f64>,
}

impl Envelope {
    /// Creates an envelope from two arms.
    pub fn new(positive: Vec<f64>, negative: Vec<f64>) -> Self {
        Self { positive, negative }
    }

    /// Creates an envelope whose arms are the same curve.
    pub fn symmetric(curve: Vec<f64>) -> Self {
        Self {
            negative: curve.iter().map(|v| -v).collect(),
            positive: curve,
        }
    }

    /// Returns true if either arm is empty.
    pub fn has_empty_arm(&self) -> bool {
        self.positive.is_empty() || self.negative.is_empty()
    }

    /// Returns true if every value in both arms is finite.
    pub fn is_finite(&self) -> bool {
        self.positive
            .iter()
            .chain(self.negative.iter())
            .all(|v| v.is_finite())
    }

    /// Parses an envelope from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symmetric_envelope() {
        let env = Envelope::symmetric(vec![0.1, 0.5, 1.0]);
        assert_eq!(env.positive, vec![0.1, 0.5, 1.0]);
        assert_eq!(env.negative, vec![-0.1, -0.5, -1.0]);
    }

    #[test]
    fn test_empty_and_finite_checks() {
        assert!(Envelope::default().has_empty_arm());
        assert!(Envelope::new(vec![1.0], vec![]).has_empty_arm());
        assert!(!Envelope::new(vec![1.0], vec![-1.0]).has_empty_arm());

        assert!(Envelope::new(vec![1.0], vec![-1.0]).is_finite());
        assert!(!Envelope::new(vec![f64::NAN], vec![-1.0]).is_finite());
        assert!(!Envelope::new(vec![1.0], vec![f64::NEG_INFINITY]).is_finite());
    }

    #[test]
    fn test_from_json_missing_arm_defaults_empty() {
        let env = Envelope::from_json(r#"{"positive":[0.1,0.2]}"#).unwrap();
        assert_eq!(env.positive.len(), 2);
        assert!(env.negative.is_empty());
    }
}
