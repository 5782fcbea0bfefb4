//! Vectorizer: raw clinical inputs → validated feature vector.

use medirank_common::{MedirankError, Result};
use serde::{Deserialize, Serialize};

use crate::criteria::{Criterion, Domain, CRITERIA_COUNT};
use crate::vector::FeatureVector;

/// Raw values of one patient submission, as received from a form or API.
///
/// Continuous fields arrive as numbers; symptom fields arrive as labels
/// from the closed enumerations in [`crate::criteria`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawInputs {
    /// Body temperature in °C
    pub fever: f64,
    #[serde(alias = "platelet")]
    pub platelet_count: f64,
    #[serde(alias = "wbc")]
    pub wbc_count: f64,
    pub bleeding: String,
    pub fatigue: String,
    pub pain: String,
    pub nausea: String,
}

impl Default for RawInputs {
    /// The form's pre-filled example patient.
    fn default() -> Self {
        Self {
            fever: 38.5,
            platelet_count: 55.0,
            wbc_count: 3.0,
            bleeding: "No".to_string(),
            fatigue: "None".to_string(),
            pain: "None".to_string(),
            nausea: "None".to_string(),
        }
    }
}

enum RawValue<'a> {
    Number(f64),
    Label(&'a str),
}

impl RawInputs {
    fn raw(&self, criterion: Criterion) -> RawValue<'_> {
        match criterion {
            Criterion::Fever => RawValue::Number(self.fever),
            Criterion::PlateletCount => RawValue::Number(self.platelet_count),
            Criterion::WbcCount => RawValue::Number(self.wbc_count),
            Criterion::Bleeding => RawValue::Label(&self.bleeding),
            Criterion::Fatigue => RawValue::Label(&self.fatigue),
            Criterion::Pain => RawValue::Label(&self.pain),
            Criterion::Nausea => RawValue::Label(&self.nausea),
        }
    }
}

/// Encode and validate raw inputs. Fails on the first invalid criterion;
/// no partial vector is ever returned.
pub fn encode(raw: &RawInputs) -> Result<FeatureVector> {
    let mut values = [0.0; CRITERIA_COUNT];

    for criterion in Criterion::ALL {
        values[criterion.index()] = encode_one(criterion, raw.raw(criterion))?;
    }

    Ok(FeatureVector::new(values))
}

fn encode_one(criterion: Criterion, raw: RawValue<'_>) -> Result<f64> {
    match (criterion.domain(), raw) {
        (Domain::Continuous { min, max }, RawValue::Number(value)) => {
            if value.is_finite() && (min..=max).contains(&value) {
                Ok(value)
            } else {
                Err(MedirankError::OutOfRange {
                    criterion: criterion.label().to_string(),
                    value,
                    min,
                    max,
                })
            }
        }
        (Domain::Categorical(_), RawValue::Label(label)) => {
            criterion
                .encode_label(label)
                .ok_or_else(|| MedirankError::InvalidCategory {
                    criterion: criterion.label().to_string(),
                    value: label.to_string(),
                    expected: criterion.accepted_labels(),
                })
        }
        // RawInputs::raw pairs every criterion with the kind its domain expects.
        _ => Err(MedirankError::Config(format!(
            "criterion {criterion} has no matching raw field"
        ))),
    }
}

/// Human-readable value of one criterion (labels for symptoms).
pub fn describe_value(criterion: Criterion, value: f64) -> String {
    match criterion {
        Criterion::Fever => format!("{value:.1}"),
        Criterion::PlateletCount if value.fract() == 0.0 => format!("{value:.0}"),
        Criterion::PlateletCount | Criterion::WbcCount => format!("{value:.1}"),
        _ => criterion
            .label_for_value(value)
            .map(str::to_string)
            .unwrap_or_else(|| format!("{value:.2}")),
    }
}

/// Patient input summary lines, in criterion order.
pub fn summarize(vector: &FeatureVector) -> Vec<(Criterion, String)> {
    vector
        .entries()
        .map(|(criterion, value)| (criterion, describe_value(criterion, value)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs() -> RawInputs {
        RawInputs {
            fever: 38.5,
            platelet_count: 45.0,
            wbc_count: 4.0,
            bleeding: "Yes".into(),
            fatigue: "Moderate".into(),
            pain: "Mild".into(),
            nausea: "Frequent".into(),
        }
    }

    #[test]
    fn test_encode_canonical_order() {
        let v = encode(&inputs()).unwrap();
        assert_eq!(v.values(), &[38.5, 45.0, 4.0, 1.0, 0.6, 0.3, 0.9]);
    }

    #[test]
    fn test_encode_rejects_unknown_category() {
        let mut raw = inputs();
        raw.nausea = "Constant".into();
        let err = encode(&raw).unwrap_err();
        assert!(matches!(
            err,
            MedirankError::InvalidCategory { ref criterion, ref value, .. }
                if criterion == "Nausea" && value == "Constant"
        ));
        assert!(err.is_validation());
    }

    #[test]
    fn test_encode_rejects_out_of_range() {
        let mut raw = inputs();
        raw.platelet_count = 501.0;
        assert!(matches!(
            encode(&raw),
            Err(MedirankError::OutOfRange { max, .. }) if max == 500.0
        ));

        let mut raw = inputs();
        raw.fever = f64::NAN;
        assert!(matches!(encode(&raw), Err(MedirankError::OutOfRange { .. })));
    }

    #[test]
    fn test_encode_accepts_domain_bounds() {
        let mut raw = inputs();
        raw.fever = 35.0;
        raw.platelet_count = 500.0;
        raw.wbc_count = 0.5;
        assert!(encode(&raw).is_ok());
    }

    #[test]
    fn test_extreme_pain() {
        let mut raw = inputs();
        raw.pain = "Extreme".into();
        assert_eq!(encode(&raw).unwrap().get(Criterion::Pain), 1.0);
    }

    #[test]
    fn test_summary_uses_labels() {
        let v = encode(&inputs()).unwrap();
        let summary = summarize(&v);
        assert_eq!(summary[0].1, "38.5");
        assert_eq!(summary[1].1, "45");
        assert_eq!(summary[3].1, "Yes");
        assert_eq!(summary[4].1, "Moderate");
        assert_eq!(summary[6].1, "Frequent");
    }
}
