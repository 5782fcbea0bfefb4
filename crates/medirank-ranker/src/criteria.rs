//! Criterion schema: the ordered clinical axes and their value domains.
//!
//! The ordinal tables below are the only place where a symptom label turns
//! into a number. Patient vectors and reference profiles both go through
//! the same order, so index `i` always means the same criterion.

use serde::{Deserialize, Serialize};

/// Number of criteria in every feature vector.
pub const CRITERIA_COUNT: usize = 7;

pub const BLEEDING_LEVELS: &[(&str, f64)] = &[("No", 0.0), ("Yes", 1.0)];

pub const FATIGUE_LEVELS: &[(&str, f64)] = &[
    ("None", 0.0),
    ("Mild", 0.3),
    ("Moderate", 0.6),
    ("Severe", 0.9),
];

pub const PAIN_LEVELS: &[(&str, f64)] = &[
    ("None", 0.0),
    ("Mild", 0.3),
    ("Moderate", 0.6),
    ("Severe", 0.9),
    ("Extreme", 1.0),
];

pub const NAUSEA_LEVELS: &[(&str, f64)] = &[("None", 0.0), ("Slight", 0.6), ("Frequent", 0.9)];

/// One clinical measurement or symptom axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
    Fever,
    PlateletCount,
    WbcCount,
    Bleeding,
    Fatigue,
    Pain,
    Nausea,
}

/// Declared value domain of a criterion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Domain {
    /// Inclusive numeric range, encoded as identity.
    Continuous { min: f64, max: f64 },
    /// Closed label set with a fixed numeric encoding per label.
    Categorical(&'static [(&'static str, f64)]),
}

impl Criterion {
    /// Canonical criterion order.
    pub const ALL: [Criterion; CRITERIA_COUNT] = [
        Criterion::Fever,
        Criterion::PlateletCount,
        Criterion::WbcCount,
        Criterion::Bleeding,
        Criterion::Fatigue,
        Criterion::Pain,
        Criterion::Nausea,
    ];

    /// Position of this criterion inside a feature vector.
    pub fn index(self) -> usize {
        match self {
            Criterion::Fever => 0,
            Criterion::PlateletCount => 1,
            Criterion::WbcCount => 2,
            Criterion::Bleeding => 3,
            Criterion::Fatigue => 4,
            Criterion::Pain => 5,
            Criterion::Nausea => 6,
        }
    }

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            Criterion::Fever => "Fever (°C)",
            Criterion::PlateletCount => "Platelet Count",
            Criterion::WbcCount => "WBC Count",
            Criterion::Bleeding => "Bleeding",
            Criterion::Fatigue => "Fatigue",
            Criterion::Pain => "Pain",
            Criterion::Nausea => "Nausea",
        }
    }

    /// Short label for chart axes.
    pub fn short_label(self) -> &'static str {
        match self {
            Criterion::Fever => "Fever",
            Criterion::PlateletCount => "Platelet",
            Criterion::WbcCount => "WBC",
            Criterion::Bleeding => "Bleeding",
            Criterion::Fatigue => "Fatigue",
            Criterion::Pain => "Pain",
            Criterion::Nausea => "Nausea",
        }
    }

    pub fn domain(self) -> Domain {
        match self {
            Criterion::Fever => Domain::Continuous { min: 35.0, max: 42.0 },
            Criterion::PlateletCount => Domain::Continuous { min: 10.0, max: 500.0 },
            Criterion::WbcCount => Domain::Continuous { min: 0.5, max: 30.0 },
            Criterion::Bleeding => Domain::Categorical(BLEEDING_LEVELS),
            Criterion::Fatigue => Domain::Categorical(FATIGUE_LEVELS),
            Criterion::Pain => Domain::Categorical(PAIN_LEVELS),
            Criterion::Nausea => Domain::Categorical(NAUSEA_LEVELS),
        }
    }

    /// Fixed divisor used to put every axis on a comparable [0, 1] scale for
    /// charts and rationale. Never used by the ranker.
    pub fn radar_max(self) -> f64 {
        match self {
            Criterion::Fever => 42.0,
            Criterion::PlateletCount => 500.0,
            Criterion::WbcCount => 30.0,
            _ => 1.0,
        }
    }

    /// Encoding of a categorical label, matched case-insensitively.
    /// `None` for unknown labels and for continuous criteria.
    pub fn encode_label(self, label: &str) -> Option<f64> {
        match self.domain() {
            Domain::Categorical(levels) => {
                let label = label.trim();
                levels
                    .iter()
                    .find(|(name, _)| name.eq_ignore_ascii_case(label))
                    .map(|&(_, value)| value)
            }
            Domain::Continuous { .. } => None,
        }
    }

    /// Reverse lookup used for human-readable summaries.
    pub fn label_for_value(self, value: f64) -> Option<&'static str> {
        match self.domain() {
            Domain::Categorical(levels) => levels
                .iter()
                .find(|(_, v)| (v - value).abs() < 1e-9)
                .map(|&(name, _)| name),
            Domain::Continuous { .. } => None,
        }
    }

    /// Comma-separated list of accepted labels.
    pub fn accepted_labels(self) -> String {
        match self.domain() {
            Domain::Categorical(levels) => levels
                .iter()
                .map(|(name, _)| *name)
                .collect::<Vec<_>>()
                .join(", "),
            Domain::Continuous { min, max } => format!("[{min}, {max}]"),
        }
    }
}

impl std::fmt::Display for Criterion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.short_label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_matches_index() {
        for (i, c) in Criterion::ALL.iter().enumerate() {
            assert_eq!(c.index(), i, "{c} out of order");
        }
    }

    #[test]
    fn test_encoding_tables_are_injective() {
        for table in [BLEEDING_LEVELS, FATIGUE_LEVELS, PAIN_LEVELS, NAUSEA_LEVELS] {
            for (i, (_, a)) in table.iter().enumerate() {
                for (_, b) in &table[i + 1..] {
                    assert!((a - b).abs() > 1e-9);
                }
            }
        }
    }

    #[test]
    fn test_encode_label() {
        assert_eq!(Criterion::Fatigue.encode_label("Moderate"), Some(0.6));
        assert_eq!(Criterion::Pain.encode_label(" extreme "), Some(1.0));
        assert_eq!(Criterion::Nausea.encode_label("Slight"), Some(0.6));
        assert_eq!(Criterion::Bleeding.encode_label("Yes"), Some(1.0));
        assert_eq!(Criterion::Nausea.encode_label("Mild"), None);
        assert_eq!(Criterion::Fever.encode_label("38"), None);
    }

    #[test]
    fn test_label_for_value() {
        assert_eq!(Criterion::Fatigue.label_for_value(0.9), Some("Severe"));
        assert_eq!(Criterion::Nausea.label_for_value(0.3), None);
        assert_eq!(Criterion::WbcCount.label_for_value(3.0), None);
    }
}
