//! medirank-ranker: Disease similarity ranking engine.
//!
//! Vectorize → Rank: raw clinical inputs are encoded into a fixed
//! seven-criterion vector and compared against a reference table of disease
//! profiles by (optionally weighted) Euclidean distance.

pub mod criteria;
pub mod vector;
pub mod vectorizer;
pub mod profiles;
pub mod weights;
pub mod scorer;
pub mod normalise;
pub mod explain;

pub use criteria::{Criterion, CRITERIA_COUNT};
pub use explain::Rationale;
pub use profiles::{DiseaseProfile, ReferenceTable};
pub use scorer::{rank, RankedResult, RankedRow, Ranker, Ranking};
pub use vector::FeatureVector;
pub use vectorizer::{encode, RawInputs};
pub use weights::WeightVector;
