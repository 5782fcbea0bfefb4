//! medirank-report: Report composition, charts, and PDF export.
//!
//! A [`DiagnosisReport`] is composed once from a finished ranking; the web
//! layer renders it as HTML/SVG and [`render_pdf`] renders it as a document.

pub mod chart;
pub mod export;
pub mod pdf;
pub mod report;

pub use chart::{BarChart, ChartColor, GroupedBarChart, RadarChart};
pub use export::{archive_filename, download_filename, sanitize_name, save_copy};
pub use pdf::render_pdf;
pub use report::{DiagnosisReport, ReportContext, ReportMeta};
