//! JSON API: rank a patient, list the reference table.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use medirank_ranker::criteria::Domain;
use medirank_ranker::{Criterion, DiseaseProfile, FeatureVector, Rationale, RankedRow, RawInputs, WeightVector};
use serde::Serialize;

use crate::error::ApiError;
use crate::state::SharedState;

#[derive(Debug, Serialize)]
pub struct SummaryItem {
    pub criterion: Criterion,
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Serialize)]
pub struct RankResponse {
    pub patient: FeatureVector,
    pub summary: Vec<SummaryItem>,
    pub top: Option<String>,
    /// Every profile sits at distance 0, so every similarity is 100
    pub degenerate: bool,
    pub results: Vec<RankedRow>,
    pub rationale: Option<Rationale>,
}

/// POST /api/rank: vectorize and rank one patient
pub async fn api_rank(
    State(state): State<SharedState>,
    payload: Result<Json<RawInputs>, JsonRejection>,
) -> Result<Json<RankResponse>, ApiError> {
    let Json(inputs) = payload?;
    let ranking = state.ranker.rank_inputs(&inputs)?;

    let ctx = &state.report_ctx;
    let rationale = ranking.top().map(|top| {
        Rationale::build(
            &ranking.patient,
            top,
            ctx.match_tolerance,
            ctx.note_for(&top.disease),
        )
    });

    let summary = medirank_ranker::vectorizer::summarize(&ranking.patient)
        .into_iter()
        .map(|(criterion, value)| SummaryItem {
            criterion,
            label: criterion.label(),
            value,
        })
        .collect();

    Ok(Json(RankResponse {
        patient: ranking.patient,
        summary,
        top: ranking.top().map(|r| r.disease.clone()),
        degenerate: ranking.is_degenerate(),
        results: ranking.rows(),
        rationale,
    }))
}

#[derive(Debug, Serialize)]
pub struct Level {
    pub label: &'static str,
    pub value: f64,
}

#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DomainView {
    Continuous { min: f64, max: f64 },
    Categorical { levels: Vec<Level> },
}

#[derive(Debug, Serialize)]
pub struct CriterionView {
    pub key: Criterion,
    pub label: &'static str,
    pub domain: DomainView,
    pub radar_max: f64,
}

impl From<Criterion> for CriterionView {
    fn from(c: Criterion) -> Self {
        let domain = match c.domain() {
            Domain::Continuous { min, max } => DomainView::Continuous { min, max },
            Domain::Categorical(levels) => DomainView::Categorical {
                levels: levels
                    .iter()
                    .map(|&(label, value)| Level { label, value })
                    .collect(),
            },
        };
        Self {
            key: c,
            label: c.label(),
            domain,
            radar_max: c.radar_max(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProfilesResponse {
    pub criteria: Vec<CriterionView>,
    pub weights: WeightVector,
    pub profiles: Vec<DiseaseProfile>,
}

/// GET /api/profiles: reference table in tie-break order plus the criterion schema
pub async fn api_profiles(State(state): State<SharedState>) -> Json<ProfilesResponse> {
    Json(ProfilesResponse {
        criteria: Criterion::ALL.into_iter().map(CriterionView::from).collect(),
        weights: *state.ranker.weights(),
        profiles: state.ranker.table().iter().cloned().collect(),
    })
}
