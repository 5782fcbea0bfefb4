//! Distance-based similarity ranking.
//!
//! d(P, D) = sqrt(Σ w_i · (P_i − D_i)²)
//! S(D)    = (1 − d(P, D) / max_D d(P, D)) × 100
//!
//! Scores are relative to one ranking run: the farthest profile always
//! scores 0 and an exact match scores 100.

use medirank_common::{MedirankConfig, MedirankError, Result};
use serde::Serialize;
use tracing::debug;

use crate::normalise::round_to;
use crate::profiles::ReferenceTable;
use crate::vector::FeatureVector;
use crate::vectorizer::{encode, RawInputs};
use crate::weights::WeightVector;

/// Weighted Euclidean distance. Symmetric in `a` and `b`.
pub fn weighted_distance(a: &FeatureVector, b: &FeatureVector, weights: &WeightVector) -> f64 {
    a.iter()
        .zip(b.iter())
        .zip(weights.as_array())
        .map(|((x, y), w)| {
            let d = x - y;
            w * d * d
        })
        .sum::<f64>()
        .sqrt()
}

/// Plain unweighted Euclidean distance.
pub fn euclidean_distance(a: &FeatureVector, b: &FeatureVector) -> f64 {
    weighted_distance(a, b, &WeightVector::default())
}

/// Similarity percentage of one distance within a run.
///
/// `max_distance == 0` means every profile coincides with the patient, so
/// every profile is an exact match.
pub fn similarity_pct(distance: f64, max_distance: f64) -> f64 {
    if max_distance <= 0.0 {
        return 100.0;
    }
    ((1.0 - distance / max_distance) * 100.0).clamp(0.0, 100.0)
}

/// One disease in a ranking, with unrounded scores.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedResult {
    pub disease: String,
    pub distance: f64,
    pub similarity_pct: f64,
    /// Reference vector of this disease, kept for chart comparison.
    #[serde(skip)]
    pub profile: FeatureVector,
}

/// Outbound row: distance at 2 dp, similarity at 1 dp.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedRow {
    pub rank: usize,
    pub disease: String,
    pub distance: f64,
    pub similarity_pct: f64,
}

/// Complete result of one ranking run, best match first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ranking {
    pub patient: FeatureVector,
    pub results: Vec<RankedResult>,
    pub max_distance: f64,
}

impl Ranking {
    /// Best match. `None` only for a ranking built by hand with no results.
    pub fn top(&self) -> Option<&RankedResult> {
        self.results.first()
    }

    /// True when every profile sits at distance 0 from the patient.
    pub fn is_degenerate(&self) -> bool {
        self.max_distance <= 0.0
    }

    pub fn rows(&self) -> Vec<RankedRow> {
        self.results
            .iter()
            .enumerate()
            .map(|(i, r)| RankedRow {
                rank: i + 1,
                disease: r.disease.clone(),
                distance: round_to(r.distance, 2),
                similarity_pct: round_to(r.similarity_pct, 1),
            })
            .collect()
    }
}

/// Rank every profile of `table` against `patient` with the given weights.
///
/// Sorting is stable on distance, so profiles with equal scores keep their
/// reference-table order. `patient` must be finite; [`Ranker::rank`] checks.
pub fn rank_weighted(
    patient: &FeatureVector,
    table: &ReferenceTable,
    weights: &WeightVector,
) -> Ranking {
    debug_assert!(patient.is_finite(), "non-finite patient vector {patient:?}");
    let distances: Vec<(&str, f64, FeatureVector)> = table
        .iter()
        .map(|p| (p.name.as_str(), weighted_distance(patient, &p.vector, weights), p.vector))
        .collect();

    let max_distance = distances.iter().map(|(_, d, _)| *d).fold(0.0_f64, f64::max);

    let mut results: Vec<RankedResult> = distances
        .into_iter()
        .map(|(name, distance, profile)| RankedResult {
            disease: name.to_string(),
            distance,
            similarity_pct: similarity_pct(distance, max_distance),
            profile,
        })
        .collect();

    results.sort_by(|a, b| a.distance.total_cmp(&b.distance));

    if max_distance <= 0.0 {
        debug!(profiles = results.len(), "degenerate ranking: every profile matches exactly");
    }

    Ranking {
        patient: *patient,
        results,
        max_distance,
    }
}

/// Rank with the default unweighted distance.
pub fn rank(patient: &FeatureVector, table: &ReferenceTable) -> Ranking {
    rank_weighted(patient, table, &WeightVector::default())
}

/// Stateless ranker holding an injected reference table and weights.
#[derive(Debug, Clone)]
pub struct Ranker {
    table: ReferenceTable,
    weights: WeightVector,
}

impl Ranker {
    pub fn new(table: ReferenceTable, weights: WeightVector) -> Result<Self> {
        weights.validate()?;
        Ok(Self { table, weights })
    }

    /// Unweighted ranker over the canonical table.
    pub fn canonical() -> Result<Self> {
        Self::new(ReferenceTable::canonical()?, WeightVector::default())
    }

    pub fn from_config(config: &MedirankConfig) -> Result<Self> {
        let table = ReferenceTable::from_entries(&config.profiles)?;
        let weights = WeightVector::from_config(&config.scoring)?;
        if !weights.is_uniform() {
            debug!(?weights, "using weighted distance");
        }
        Self::new(table, weights)
    }

    pub fn table(&self) -> &ReferenceTable {
        &self.table
    }

    pub fn weights(&self) -> &WeightVector {
        &self.weights
    }

    /// Rank a patient vector. A NaN or infinite component is rejected since
    /// it would make every distance NaN and every similarity 100.
    pub fn rank(&self, patient: &FeatureVector) -> Result<Ranking> {
        if let Some((criterion, value)) = patient.entries().find(|(_, v)| !v.is_finite()) {
            return Err(MedirankError::InvalidNumber {
                criterion: criterion.label().to_string(),
                value: value.to_string(),
            });
        }

        let ranking = rank_weighted(patient, &self.table, &self.weights);
        if let Some(top) = ranking.top() {
            debug!(
                disease = %top.disease,
                similarity = top.similarity_pct,
                distance = top.distance,
                "ranking complete"
            );
        }
        Ok(ranking)
    }

    /// Vectorize then rank. Validation errors abort before any scoring.
    pub fn rank_inputs(&self, raw: &RawInputs) -> Result<Ranking> {
        let patient = encode(raw)?;
        self.rank(&patient)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profiles::DiseaseProfile;

    fn dengue() -> FeatureVector {
        FeatureVector::new([38.5, 45.0, 4.0, 1.0, 0.6, 0.3, 0.9])
    }

    fn sepsis() -> FeatureVector {
        FeatureVector::new([39.0, 180.0, 25.0, 0.0, 0.3, 0.6, 0.0])
    }

    fn two_disease_table() -> ReferenceTable {
        ReferenceTable::new(vec![
            DiseaseProfile::new("Dengue DHF", dengue()),
            DiseaseProfile::new("Sepsis", sepsis()),
        ])
        .unwrap()
    }

    #[test]
    fn test_exact_match_scores_100_and_farthest_0() {
        let ranking = rank(&dengue(), &two_disease_table());
        let names: Vec<&str> = ranking.results.iter().map(|r| r.disease.as_str()).collect();
        assert_eq!(names, ["Dengue DHF", "Sepsis"]);
        assert_eq!(ranking.results[0].distance, 0.0);
        assert_eq!(ranking.results[0].similarity_pct, 100.0);
        assert_eq!(ranking.results[1].similarity_pct, 0.0);
        // 0.5² + 135² + 21² + 1 + 0.3² + 0.3² + 0.9²
        let expected = 18668.24_f64.sqrt();
        assert!((ranking.results[1].distance - expected).abs() < 1e-9);
    }

    #[test]
    fn test_distance_symmetry() {
        assert_eq!(euclidean_distance(&dengue(), &sepsis()), euclidean_distance(&sepsis(), &dengue()));
        let w = WeightVector { platelet_count: 0.01, ..WeightVector::default() };
        assert_eq!(
            weighted_distance(&dengue(), &sepsis(), &w),
            weighted_distance(&sepsis(), &dengue(), &w)
        );
    }

    #[test]
    fn test_single_candidate() {
        let table = ReferenceTable::new(vec![DiseaseProfile::new("Dengue DHF", dengue())]).unwrap();
        let exact = rank(&dengue(), &table);
        assert_eq!(exact.results[0].similarity_pct, 100.0);
        assert!(exact.is_degenerate());

        let far = rank(&sepsis(), &table);
        assert_eq!(far.results[0].similarity_pct, 0.0);
        assert!(!far.is_degenerate());
    }

    #[test]
    fn test_all_profiles_identical_to_patient() {
        let table = ReferenceTable::new(vec![
            DiseaseProfile::new("A", dengue()),
            DiseaseProfile::new("B", dengue()),
            DiseaseProfile::new("C", dengue()),
        ])
        .unwrap();
        let ranking = rank(&dengue(), &table);
        assert!(ranking.results.iter().all(|r| r.similarity_pct == 100.0));
        let names: Vec<&str> = ranking.results.iter().map(|r| r.disease.as_str()).collect();
        assert_eq!(names, ["A", "B", "C"]);
    }

    #[test]
    fn test_ties_keep_table_order() {
        let patient = FeatureVector::new([38.0, 100.0, 5.0, 0.0, 0.3, 0.3, 0.3]);
        let above = FeatureVector::new([38.0, 110.0, 5.0, 0.0, 0.3, 0.3, 0.3]);
        let below = FeatureVector::new([38.0, 90.0, 5.0, 0.0, 0.3, 0.3, 0.3]);
        let far = FeatureVector::new([38.0, 300.0, 5.0, 0.0, 0.3, 0.3, 0.3]);
        let table = ReferenceTable::new(vec![
            DiseaseProfile::new("Far", far),
            DiseaseProfile::new("Above", above),
            DiseaseProfile::new("Below", below),
        ])
        .unwrap();

        let ranking = rank(&patient, &table);
        let names: Vec<&str> = ranking.results.iter().map(|r| r.disease.as_str()).collect();
        assert_eq!(names, ["Above", "Below", "Far"]);
        assert_eq!(ranking.results[0].similarity_pct, ranking.results[1].similarity_pct);
    }

    #[test]
    fn test_weights_change_order() {
        // Platelets dominate unweighted; muting them lets symptoms decide.
        let patient = FeatureVector::new([38.5, 100.0, 5.0, 1.0, 0.9, 0.9, 0.9]);
        let platelet_match = FeatureVector::new([38.5, 100.0, 5.0, 0.0, 0.0, 0.0, 0.0]);
        let symptom_match = FeatureVector::new([38.5, 130.0, 5.0, 1.0, 0.9, 0.9, 0.9]);
        let table = ReferenceTable::new(vec![
            DiseaseProfile::new("Platelet match", platelet_match),
            DiseaseProfile::new("Symptom match", symptom_match),
        ])
        .unwrap();

        let unweighted = rank(&patient, &table);
        assert_eq!(unweighted.results[0].disease, "Platelet match");

        let w = WeightVector { platelet_count: 0.0, ..WeightVector::default() };
        let weighted = rank_weighted(&patient, &table, &w);
        assert_eq!(weighted.results[0].disease, "Symptom match");
    }

    #[test]
    fn test_rows_are_rounded() {
        let ranking = rank(&dengue(), &two_disease_table());
        let rows = ranking.rows();
        assert_eq!(rows[0].rank, 1);
        assert_eq!(rows[1].rank, 2);
        assert_eq!(rows[1].distance, 136.63);
        assert_eq!(rows[1].similarity_pct, 0.0);
    }

    #[test]
    fn test_ranker_rejects_bad_weights() {
        let result = Ranker::new(two_disease_table(), WeightVector::uniform(0.0));
        assert!(result.is_err());
    }

    #[test]
    fn test_ranker_rejects_non_finite_patient() {
        let ranker = Ranker::new(two_disease_table(), WeightVector::default()).unwrap();

        let nan = FeatureVector::new([f64::NAN, 45.0, 4.0, 1.0, 0.6, 0.9, 0.9]);
        let err = ranker.rank(&nan).unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("Fever"));

        let inf = FeatureVector::new([38.5, 45.0, f64::INFINITY, 1.0, 0.6, 0.9, 0.9]);
        assert!(ranker.rank(&inf).is_err());

        let ranking = ranker.rank(&dengue()).unwrap();
        assert!(!ranking.is_degenerate());
    }

    #[test]
    fn test_rank_inputs_validates_first() {
        let ranker = Ranker::canonical().unwrap();
        let raw = RawInputs { fever: 43.5, ..RawInputs::default() };
        assert!(ranker.rank_inputs(&raw).is_err());
        assert_eq!(ranker.rank_inputs(&RawInputs::default()).unwrap().results.len(), 9);
    }
}
