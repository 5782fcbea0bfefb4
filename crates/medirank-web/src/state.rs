//! Shared application state for the web server.

use std::sync::Arc;

use medirank_common::{MedirankConfig, Result};
use medirank_ranker::Ranker;
use medirank_report::ReportContext;

/// Shared state injected into every Axum handler.
///
/// Built once at startup; nothing in it is mutated per request, so handlers
/// never need a lock.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: MedirankConfig,
    pub ranker: Ranker,
    pub report_ctx: ReportContext,
}

impl AppState {
    /// Validate the configuration and build the ranker and report context.
    pub fn from_config(config: MedirankConfig) -> Result<Self> {
        let ranker = Ranker::from_config(&config)?;
        let report_ctx = ReportContext::from_config(&config)?;
        tracing::info!(
            profiles = ranker.table().len(),
            weighted = !ranker.weights().is_uniform(),
            "reference table ready"
        );
        Ok(Self {
            config,
            ranker,
            report_ctx,
        })
    }
}

pub type SharedState = Arc<AppState>;
