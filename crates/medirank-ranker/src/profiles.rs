//! Reference disease table.
//!
//! Built once from configuration and handed to the [`crate::scorer::Ranker`].
//! Insertion order is preserved and is the tie-break order of every ranking.

use std::collections::HashSet;

use medirank_common::{config::default_profiles, MedirankError, ProfileEntry, Result};
use serde::{Deserialize, Serialize};

use crate::vector::FeatureVector;

/// A named reference vector representing the typical presentation of one disease.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiseaseProfile {
    pub name: String,
    pub vector: FeatureVector,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rationale: Option<String>,
}

impl DiseaseProfile {
    pub fn new(name: impl Into<String>, vector: FeatureVector) -> Self {
        Self {
            name: name.into(),
            vector,
            rationale: None,
        }
    }

    fn from_entry(entry: &ProfileEntry) -> Result<Self> {
        let vector = FeatureVector::from_slice(&entry.vector, &entry.name)?;
        Ok(Self {
            name: entry.name.clone(),
            vector,
            rationale: entry.rationale.clone(),
        })
    }
}

/// Immutable, non-empty, ordered set of disease profiles with unique names.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReferenceTable {
    profiles: Vec<DiseaseProfile>,
}

impl ReferenceTable {
    pub fn new(profiles: Vec<DiseaseProfile>) -> Result<Self> {
        if profiles.is_empty() {
            return Err(MedirankError::EmptyReferenceTable);
        }

        let mut seen = HashSet::new();
        for profile in &profiles {
            if profile.name.trim().is_empty() {
                return Err(MedirankError::InvalidProfile("profile name is empty".into()));
            }
            if !seen.insert(profile.name.as_str()) {
                return Err(MedirankError::InvalidProfile(format!(
                    "duplicate profile name: {}",
                    profile.name
                )));
            }
            if !profile.vector.is_finite() {
                return Err(MedirankError::InvalidProfile(format!(
                    "{} has a non-finite value",
                    profile.name
                )));
            }
        }

        Ok(Self { profiles })
    }

    /// Build from config entries, checking every vector's dimension.
    pub fn from_entries(entries: &[ProfileEntry]) -> Result<Self> {
        let profiles = entries
            .iter()
            .map(DiseaseProfile::from_entry)
            .collect::<Result<Vec<_>>>()?;
        Self::new(profiles)
    }

    /// The canonical nine-disease table.
    pub fn canonical() -> Result<Self> {
        Self::from_entries(&default_profiles())
    }

    pub fn get(&self, name: &str) -> Option<&DiseaseProfile> {
        self.profiles.iter().find(|p| p.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DiseaseProfile> {
        self.profiles.iter()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    /// Always false for a constructed table; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_table() {
        let table = ReferenceTable::canonical().unwrap();
        assert_eq!(table.len(), 9);
        let names: Vec<&str> = table.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names[0], "Dengue DHF");
        assert_eq!(names[8], "Appendicitis");
        assert_eq!(
            table.get("Sepsis").unwrap().vector.values(),
            &[39.0, 180.0, 25.0, 0.0, 0.3, 0.6, 0.0]
        );
    }

    #[test]
    fn test_empty_table_rejected() {
        assert!(matches!(
            ReferenceTable::new(vec![]),
            Err(MedirankError::EmptyReferenceTable)
        ));
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let v = FeatureVector::new([38.0, 100.0, 5.0, 0.0, 0.3, 0.3, 0.0]);
        let result = ReferenceTable::new(vec![
            DiseaseProfile::new("Malaria", v),
            DiseaseProfile::new("Malaria", v),
        ]);
        assert!(matches!(result, Err(MedirankError::InvalidProfile(_))));
    }

    #[test]
    fn test_wrong_dimension_rejected() {
        let entries = vec![ProfileEntry::new("Sepsis", vec![39.0, 180.0, 25.0])];
        assert!(matches!(
            ReferenceTable::from_entries(&entries),
            Err(MedirankError::DimensionMismatch { actual: 3, .. })
        ));
    }

    #[test]
    fn test_non_finite_rejected() {
        let v = FeatureVector::new([f64::NAN, 100.0, 5.0, 0.0, 0.3, 0.3, 0.0]);
        let result = ReferenceTable::new(vec![DiseaseProfile::new("Broken", v)]);
        assert!(matches!(result, Err(MedirankError::InvalidProfile(_))));
    }
}
