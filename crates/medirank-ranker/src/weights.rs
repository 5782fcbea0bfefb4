//! Per-criterion weight vector for the distance computation.

use medirank_common::{MedirankError, Result, ScoringConfig};
use serde::{Deserialize, Serialize};

use crate::criteria::{Criterion, CRITERIA_COUNT};

/// The 7-component weight vector W.
///
/// `distance = sqrt(Σ w_i · (P_i − D_i)²)`. The default (all ones) is the
/// plain Euclidean distance. Weights are not required to sum to 1: only
/// their ratios change the order, and the similarity scale is relative anyway.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightVector {
    pub fever: f64,
    pub platelet_count: f64,
    pub wbc_count: f64,
    pub bleeding: f64,
    pub fatigue: f64,
    pub pain: f64,
    pub nausea: f64,
}

impl Default for WeightVector {
    fn default() -> Self {
        Self::uniform(1.0)
    }
}

impl WeightVector {
    pub fn uniform(w: f64) -> Self {
        Self {
            fever: w,
            platelet_count: w,
            wbc_count: w,
            bleeding: w,
            fatigue: w,
            pain: w,
            nausea: w,
        }
    }

    /// Build from config, rejecting unusable weights.
    pub fn from_config(config: &ScoringConfig) -> Result<Self> {
        let [fever, platelet_count, wbc_count, bleeding, fatigue, pain, nausea] = config.as_array();
        let weights = Self {
            fever,
            platelet_count,
            wbc_count,
            bleeding,
            fatigue,
            pain,
            nausea,
        };
        weights.validate()?;
        Ok(weights)
    }

    /// Every weight must be finite and non-negative, and at least one positive.
    pub fn validate(&self) -> Result<()> {
        let arr = self.as_array();
        if let Some(c) = Criterion::ALL
            .iter()
            .find(|c| !arr[c.index()].is_finite() || arr[c.index()] < 0.0)
        {
            return Err(MedirankError::InvalidWeights(format!(
                "{} weight must be finite and non-negative, got {}",
                c,
                arr[c.index()]
            )));
        }
        if arr.iter().all(|&w| w == 0.0) {
            return Err(MedirankError::InvalidWeights("all weights are zero".into()));
        }
        Ok(())
    }

    /// True when this is the plain unweighted Euclidean distance.
    pub fn is_uniform(&self) -> bool {
        let arr = self.as_array();
        arr.iter().all(|&w| w == arr[0])
    }

    /// Convert to array for iteration.
    pub fn as_array(&self) -> [f64; CRITERIA_COUNT] {
        [
            self.fever,
            self.platelet_count,
            self.wbc_count,
            self.bleeding,
            self.fatigue,
            self.pain,
            self.nausea,
        ]
    }
}
