//! File naming and on-disk archiving of rendered reports.

use std::path::{Path, PathBuf};

use medirank_common::Result;

use crate::report::DiagnosisReport;

/// Keep `[A-Za-z0-9_-]`, map whitespace to `_`, drop everything else.
pub fn sanitize_name(name: &str) -> String {
    let cleaned: String = name
        .trim()
        .chars()
        .filter_map(|c| match c {
            c if c.is_ascii_alphanumeric() || c == '_' || c == '-' => Some(c),
            c if c.is_whitespace() => Some('_'),
            _ => None,
        })
        .collect();
    if cleaned.is_empty() {
        "patient".to_string()
    } else {
        cleaned
    }
}

/// Name offered to the browser: `MediRank_Report_<patient>.pdf`.
pub fn download_filename(report: &DiagnosisReport) -> String {
    format!("MediRank_Report_{}.pdf", sanitize_name(&report.meta.patient_name))
}

/// Name of the archived copy: `<YYYYmmdd_HHMMSS>_<patient>_Report.pdf`.
pub fn archive_filename(report: &DiagnosisReport) -> String {
    format!(
        "{}_{}_Report.pdf",
        report.generated_at.format("%Y%m%d_%H%M%S"),
        sanitize_name(&report.meta.patient_name)
    )
}

/// Write `bytes` under `dir`, creating the directory when missing.
pub fn save_copy(bytes: &[u8], dir: &Path, report: &DiagnosisReport) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(archive_filename(report));
    std::fs::write(&path, bytes)?;
    tracing::info!(path = %path.display(), report_id = %report.id, "saved report copy");
    Ok(path)
}
