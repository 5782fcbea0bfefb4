//! "Why is X ranked #1" rationale for the top match.

use serde::Serialize;

use crate::criteria::{Criterion, CRITERIA_COUNT};
use crate::normalise::normalised_gap;
use crate::scorer::RankedResult;
use crate::vector::FeatureVector;
use crate::vectorizer::describe_value;

/// Per-criterion comparison between patient and a profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CriterionMatch {
    pub criterion: Criterion,
    pub patient: f64,
    pub profile: f64,
    /// |patient − profile| on the radar scale
    pub gap: f64,
    pub strong: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rationale {
    pub disease: String,
    pub matches: Vec<CriterionMatch>,
    /// Configured free-text rationale for this disease, if any
    pub note: Option<String>,
}

impl Rationale {
    /// Compare the patient with `top` criterion by criterion. A criterion is a
    /// strong match when its radar-scale gap is at most `tolerance`.
    pub fn build(
        patient: &FeatureVector,
        top: &RankedResult,
        tolerance: f64,
        note: Option<&str>,
    ) -> Self {
        let matches = patient
            .entries()
            .map(|(criterion, value)| {
                let profile = top.profile.get(criterion);
                let gap = normalised_gap(criterion, value, profile);
                CriterionMatch {
                    criterion,
                    patient: value,
                    profile,
                    gap,
                    strong: gap <= tolerance + 1e-9,
                }
            })
            .collect();

        Self {
            disease: top.disease.clone(),
            matches,
            note: note.map(str::to_string),
        }
    }

    pub fn strong_count(&self) -> usize {
        self.matches.iter().filter(|m| m.strong).count()
    }

    pub fn headline(&self) -> String {
        format!("Why '{}' is Ranked #1", self.disease)
    }

    /// Bullet lines for screen and PDF.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(CRITERIA_COUNT + 2);
        if let Some(note) = &self.note {
            lines.push(note.clone());
        }

        for m in &self.matches {
            let patient = describe_value(m.criterion, m.patient);
            let profile = describe_value(m.criterion, m.profile);
            let line = if m.strong {
                format!(
                    "- {} matches the {} profile ({} vs {}).",
                    m.criterion, self.disease, patient, profile
                )
            } else {
                let direction = if m.patient > m.profile { "higher" } else { "lower" };
                format!(
                    "- {} is {} than the {} profile ({} vs {}).",
                    m.criterion, direction, self.disease, patient, profile
                )
            };
            lines.push(line);
        }

        lines.push(format!(
            "- Overall, {} of {} criteria are strong matches to {}.",
            self.strong_count(),
            self.matches.len(),
            self.disease
        ));
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profiles::ReferenceTable;
    use crate::scorer::rank;

    #[test]
    fn test_dengue_rationale() {
        let table = ReferenceTable::canonical().unwrap();
        // Form defaults with bleeding, moderate fatigue, severe pain, frequent nausea
        let patient = FeatureVector::new([38.5, 55.0, 3.0, 1.0, 0.6, 0.9, 0.9]);
        let ranking = rank(&patient, &table);
        let top = ranking.top().unwrap();
        assert_eq!(top.disease, "Dengue DHF");

        let rationale = Rationale::build(&patient, top, 0.1, None);
        assert_eq!(rationale.strong_count(), 7);
        let lines = rationale.lines();
        assert_eq!(lines.len(), 8);
        assert_eq!(lines[0], "- Fever matches the Dengue DHF profile (38.5 vs 38.5).");
        assert_eq!(lines[7], "- Overall, 7 of 7 criteria are strong matches to Dengue DHF.");
    }

    #[test]
    fn test_mismatch_direction_and_note() {
        let profile = FeatureVector::new([38.5, 45.0, 4.0, 1.0, 0.6, 0.9, 0.9]);
        let patient = FeatureVector::new([38.5, 45.0, 4.0, 0.0, 0.6, 0.3, 0.9]);
        let top = RankedResult {
            disease: "Dengue DHF".into(),
            distance: 0.0,
            similarity_pct: 100.0,
            profile,
        };
        let rationale = Rationale::build(&patient, &top, 0.1, Some("Classic dengue picture."));
        assert_eq!(rationale.strong_count(), 5);

        let lines = rationale.lines();
        assert_eq!(lines[0], "Classic dengue picture.");
        assert_eq!(lines[4], "- Bleeding is lower than the Dengue DHF profile (No vs Yes).");
        assert_eq!(lines[6], "- Pain is lower than the Dengue DHF profile (Mild vs Severe).");
    }
}
