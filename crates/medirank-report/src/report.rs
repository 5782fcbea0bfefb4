//! Report composition: everything the screen and PDF renderers need, derived
//! from one finished ranking. Nothing here scores or reorders diseases.

use std::collections::HashMap;

use chrono::{DateTime, Local};
use medirank_common::{MedirankConfig, MedirankError, Result};
use medirank_ranker::scorer::RankedRow;
use medirank_ranker::vectorizer::summarize;
use medirank_ranker::{FeatureVector, Rationale, Ranking};
use serde::Serialize;
use uuid::Uuid;

use crate::chart::{BarChart, GroupedBarChart, RadarChart};

/// Who the report is for and who requested it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReportMeta {
    pub patient_name: String,
    pub doctor_name: String,
}

/// Startup-validated inputs for composing reports.
#[derive(Debug, Clone)]
pub struct ReportContext {
    pub title: String,
    pub organisation: String,
    pub match_tolerance: f64,
    pub healthy_baseline: FeatureVector,
    notes: HashMap<String, String>,
}

impl ReportContext {
    pub fn from_config(config: &MedirankConfig) -> Result<Self> {
        let healthy_baseline =
            FeatureVector::from_slice(&config.healthy_baseline, "healthy baseline")?;
        if !healthy_baseline.is_finite() {
            return Err(MedirankError::Config("healthy baseline has a non-finite value".into()));
        }
        if !(config.report.match_tolerance.is_finite() && config.report.match_tolerance >= 0.0) {
            return Err(MedirankError::Config(format!(
                "match_tolerance must be a non-negative number, got {}",
                config.report.match_tolerance
            )));
        }

        let notes = config
            .profiles
            .iter()
            .filter_map(|p| p.rationale.as_ref().map(|r| (p.name.clone(), r.clone())))
            .collect();

        Ok(Self {
            title: config.report.title.clone(),
            organisation: config.report.organisation.clone(),
            match_tolerance: config.report.match_tolerance,
            healthy_baseline,
            notes,
        })
    }

    pub fn note_for(&self, disease: &str) -> Option<&str> {
        self.notes.get(disease).map(String::as_str)
    }
}

/// A fully composed diagnosis report.
#[derive(Debug, Clone, Serialize)]
pub struct DiagnosisReport {
    pub id: Uuid,
    pub title: String,
    pub organisation: String,
    pub meta: ReportMeta,
    pub generated_at: DateTime<Local>,
    /// (criterion label, human-readable value)
    pub input_summary: Vec<(String, String)>,
    pub top_disease: String,
    pub top_similarity_pct: f64,
    pub rationale: Rationale,
    pub rows: Vec<RankedRow>,
    pub bar_chart: BarChart,
    pub radar_chart: RadarChart,
    pub healthy_chart: GroupedBarChart,
}

impl DiagnosisReport {
    pub fn compose(ranking: &Ranking, meta: ReportMeta, ctx: &ReportContext) -> Result<Self> {
        Self::compose_at(ranking, meta, ctx, Local::now())
    }

    pub fn compose_at(
        ranking: &Ranking,
        meta: ReportMeta,
        ctx: &ReportContext,
        generated_at: DateTime<Local>,
    ) -> Result<Self> {
        let top = ranking
            .top()
            .ok_or_else(|| MedirankError::Render("ranking has no results".into()))?;
        let rows = ranking.rows();
        let top_similarity_pct = rows.first().map(|r| r.similarity_pct).unwrap_or(0.0);

        let input_summary = summarize(&ranking.patient)
            .into_iter()
            .map(|(criterion, value)| (criterion.label().to_string(), value))
            .collect();

        let rationale = Rationale::build(
            &ranking.patient,
            top,
            ctx.match_tolerance,
            ctx.note_for(&top.disease),
        );

        Ok(Self {
            id: Uuid::new_v4(),
            title: ctx.title.clone(),
            organisation: ctx.organisation.clone(),
            meta,
            generated_at,
            input_summary,
            top_disease: top.disease.clone(),
            top_similarity_pct,
            rationale,
            rows,
            bar_chart: BarChart::similarity(ranking),
            radar_chart: RadarChart::comparison(&ranking.patient, top),
            healthy_chart: GroupedBarChart::healthy_comparison(
                &ranking.patient,
                &ctx.healthy_baseline,
            ),
        })
    }

    /// `%Y-%m-%d %H:%M:%S` in local time.
    pub fn timestamp(&self) -> String {
        self.generated_at.format("%Y-%m-%d %H:%M:%S").to_string()
    }

    pub fn summary_sentence(&self) -> String {
        format!(
            "The patient's profile most closely matches {} based on Euclidean similarity.",
            self.top_disease
        )
    }
}
