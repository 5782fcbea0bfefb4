//! PDF report download.

use std::path::PathBuf;

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Form,
};
use medirank_report::{download_filename, render_pdf, save_copy};

use crate::error::ApiError;
use crate::form::DiagnoseForm;
use crate::handlers::diagnose::compose_report;
use crate::state::SharedState;

/// POST /report: render the submitted patient's report as a PDF attachment
pub async fn report_download(
    State(state): State<SharedState>,
    Form(form): Form<DiagnoseForm>,
) -> Result<Response, ApiError> {
    let report = compose_report(&state, &form)?;

    let (report, bytes) = tokio::task::spawn_blocking(move || {
        render_pdf(&report).map(|bytes| (report, bytes))
    })
    .await??;

    if state.config.report.save_copy {
        let dir = PathBuf::from(&state.config.report.output_dir);
        // The download still succeeds when the archive copy cannot be written.
        if let Err(e) = save_copy(&bytes, &dir, &report) {
            tracing::warn!(error = %e, dir = %dir.display(), "could not save report copy");
        }
    }

    let filename = download_filename(&report);
    tracing::info!(report_id = %report.id, %filename, bytes = bytes.len(), "report rendered");

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        bytes,
    )
        .into_response())
}
