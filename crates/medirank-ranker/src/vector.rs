//! Fixed-length feature vectors shared by patients and disease profiles.

use std::ops::Index;

use medirank_common::{MedirankError, Result};
use serde::{Deserialize, Serialize};

use crate::criteria::{Criterion, CRITERIA_COUNT};

/// Ordered numeric tuple, one entry per criterion in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct FeatureVector([f64; CRITERIA_COUNT]);

impl FeatureVector {
    pub fn new(values: [f64; CRITERIA_COUNT]) -> Self {
        Self(values)
    }

    /// Build from a slice, checking the length against the criterion schema.
    pub fn from_slice(values: &[f64], context: &str) -> Result<Self> {
        let array: [f64; CRITERIA_COUNT] =
            values
                .try_into()
                .map_err(|_| MedirankError::DimensionMismatch {
                    context: context.to_string(),
                    expected: CRITERIA_COUNT,
                    actual: values.len(),
                })?;
        Ok(Self(array))
    }

    pub fn values(&self) -> &[f64; CRITERIA_COUNT] {
        &self.0
    }

    pub fn get(&self, criterion: Criterion) -> f64 {
        self.0[criterion.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.iter().copied()
    }

    /// Pairs each value with its criterion.
    pub fn entries(&self) -> impl Iterator<Item = (Criterion, f64)> + '_ {
        Criterion::ALL.iter().copied().zip(self.iter())
    }

    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|v| v.is_finite())
    }
}

impl Index<usize> for FeatureVector {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.0[index]
    }
}

impl TryFrom<Vec<f64>> for FeatureVector {
    type Error = MedirankError;

    fn try_from(values: Vec<f64>) -> Result<Self> {
        Self::from_slice(&values, "feature vector")
    }
}

impl From<FeatureVector> for Vec<f64> {
    fn from(v: FeatureVector) -> Self {
        v.0.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_slice_checks_length() {
        let ok = FeatureVector::from_slice(&[38.5, 45.0, 4.0, 1.0, 0.6, 0.3, 0.9], "test");
        assert!(ok.is_ok());

        let err = FeatureVector::from_slice(&[38.5, 45.0, 4.0], "Sepsis").unwrap_err();
        match err {
            MedirankError::DimensionMismatch { context, expected, actual } => {
                assert_eq!(context, "Sepsis");
                assert_eq!(expected, 7);
                assert_eq!(actual, 3);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_serde_as_plain_array() {
        let v = FeatureVector::new([38.5, 45.0, 4.0, 1.0, 0.6, 0.3, 0.9]);
        let json = serde_json::to_string(&v).unwrap();
        assert_eq!(json, "[38.5,45.0,4.0,1.0,0.6,0.3,0.9]");

        let back: FeatureVector = serde_json::from_str(&json).unwrap();
        assert_eq!(back, v);
        assert!(serde_json::from_str::<FeatureVector>("[1.0, 2.0]").is_err());
    }

    #[test]
    fn test_get_by_criterion() {
        let v = FeatureVector::new([38.5, 45.0, 4.0, 1.0, 0.6, 0.3, 0.9]);
        assert_eq!(v.get(Criterion::PlateletCount), 45.0);
        assert_eq!(v.get(Criterion::Nausea), 0.9);
        assert_eq!(v[2], 4.0);
    }
}
