//! The patient form as posted by the browser.
//!
//! Numeric fields are taken as text and parsed here so a malformed entry
//! is reported in the page banner instead of as a bare extractor rejection.
//! Absent clinical fields deserialize as empty and are rejected by
//! [`DiagnoseForm::inputs`]; they never fall back to the example patient.

use medirank_common::{MedirankError, Result};
use medirank_ranker::{Criterion, RawInputs};
use medirank_report::ReportMeta;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnoseForm {
    #[serde(default)]
    pub patient_name: String,
    #[serde(default)]
    pub doctor_name: String,
    #[serde(default)]
    pub fever: String,
    #[serde(default)]
    pub platelet_count: String,
    #[serde(default)]
    pub wbc_count: String,
    #[serde(default)]
    pub bleeding: String,
    #[serde(default)]
    pub fatigue: String,
    #[serde(default)]
    pub pain: String,
    #[serde(default)]
    pub nausea: String,
}

impl Default for DiagnoseForm {
    fn default() -> Self {
        let raw = RawInputs::default();
        Self {
            patient_name: "John Doe".to_string(),
            doctor_name: "Dr. Zahari".to_string(),
            fever: raw.fever.to_string(),
            platelet_count: raw.platelet_count.to_string(),
            wbc_count: raw.wbc_count.to_string(),
            bleeding: raw.bleeding,
            fatigue: raw.fatigue,
            pain: raw.pain,
            nausea: raw.nausea,
        }
    }
}

fn parse_number(criterion: Criterion, text: &str) -> Result<f64> {
    text.trim()
        .parse::<f64>()
        .map_err(|_| MedirankError::InvalidNumber {
            criterion: criterion.label().to_string(),
            value: text.to_string(),
        })
}

impl DiagnoseForm {
    pub fn inputs(&self) -> Result<RawInputs> {
        if let Some(&missing) = Criterion::ALL.iter().find(|&&c| self.field(c).trim().is_empty()) {
            return Err(MedirankError::MissingField {
                criterion: missing.label().to_string(),
            });
        }
        Ok(RawInputs {
            fever: parse_number(Criterion::Fever, &self.fever)?,
            platelet_count: parse_number(Criterion::PlateletCount, &self.platelet_count)?,
            wbc_count: parse_number(Criterion::WbcCount, &self.wbc_count)?,
            bleeding: self.bleeding.clone(),
            fatigue: self.fatigue.clone(),
            pain: self.pain.clone(),
            nausea: self.nausea.clone(),
        })
    }

    pub fn meta(&self) -> ReportMeta {
        ReportMeta {
            patient_name: self.patient_name.trim().to_string(),
            doctor_name: self.doctor_name.trim().to_string(),
        }
    }

    /// Value currently held by the field backing `criterion`.
    pub fn field(&self, criterion: Criterion) -> &str {
        match criterion {
            Criterion::Fever => &self.fever,
            Criterion::PlateletCount => &self.platelet_count,
            Criterion::WbcCount => &self.wbc_count,
            Criterion::Bleeding => &self.bleeding,
            Criterion::Fatigue => &self.fatigue,
            Criterion::Pain => &self.pain,
            Criterion::Nausea => &self.nausea,
        }
    }

    /// Form field name for `criterion`.
    pub fn field_name(criterion: Criterion) -> &'static str {
        match criterion {
            Criterion::Fever => "fever",
            Criterion::PlateletCount => "platelet_count",
            Criterion::WbcCount => "wbc_count",
            Criterion::Bleeding => "bleeding",
            Criterion::Fatigue => "fatigue",
            Criterion::Pain => "pain",
            Criterion::Nausea => "nausea",
        }
    }
}
