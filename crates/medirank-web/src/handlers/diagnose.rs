//! Patient form and results page.

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Form,
};
use medirank_common::Result;
use medirank_ranker::criteria::Domain;
use medirank_ranker::Criterion;
use medirank_report::DiagnosisReport;

use crate::error::ApiError;
use crate::form::DiagnoseForm;
use crate::handlers::layout::{escape_html, page};
use crate::state::{AppState, SharedState};

/// Vectorize, rank and compose the report for one submitted form.
pub(crate) fn compose_report(state: &AppState, form: &DiagnoseForm) -> Result<DiagnosisReport> {
    let inputs = form.inputs()?;
    let ranking = state.ranker.rank_inputs(&inputs)?;
    DiagnosisReport::compose(&ranking, form.meta(), &state.report_ctx)
}

/// GET /: empty form with the example patient pre-filled
pub async fn form_page(State(_state): State<SharedState>) -> Html<String> {
    Html(render_page(&DiagnoseForm::default(), None, None))
}

/// POST /diagnose: rank the submitted patient
pub async fn diagnose_submit(
    State(state): State<SharedState>,
    Form(form): Form<DiagnoseForm>,
) -> Response {
    match compose_report(&state, &form) {
        Ok(report) => {
            tracing::info!(
                report_id = %report.id,
                disease = %report.top_disease,
                similarity = report.top_similarity_pct,
                "diagnosis ranked"
            );
            Html(render_page(&form, Some(&report), None)).into_response()
        }
        // No partial results: the form comes back with only the banner.
        Err(e) if e.is_validation() => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Html(render_page(&form, None, Some(&e.to_string()))),
        )
            .into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

fn render_field(form: &DiagnoseForm, criterion: Criterion) -> String {
    let name = DiagnoseForm::field_name(criterion);
    let current = form.field(criterion);

    let control = match criterion.domain() {
        Domain::Continuous { min, max } => {
            let step = if criterion == Criterion::PlateletCount { "1" } else { "0.1" };
            format!(
                r#"<input type="number" id="{name}" name="{name}" min="{min}" max="{max}" step="{step}" value="{}" required>"#,
                escape_html(current)
            )
        }
        Domain::Categorical(levels) => {
            let options: String = levels
                .iter()
                .map(|(label, _)| {
                    let selected = if label.eq_ignore_ascii_case(current.trim()) {
                        " selected"
                    } else {
                        ""
                    };
                    format!(r#"<option value="{label}"{selected}>{label}</option>"#)
                })
                .collect();
            format!(r#"<select id="{name}" name="{name}">{options}</select>"#)
        }
    };

    format!(
        r#"<div><label for="{name}">{}</label>{control}</div>"#,
        escape_html(criterion.label())
    )
}

fn render_form(form: &DiagnoseForm) -> String {
    let fields: String = Criterion::ALL
        .iter()
        .map(|&c| render_field(form, c))
        .collect();

    format!(
        r#"
<div class="card">
    <form method="POST" action="/diagnose">
        <div class="grid">
            <div><label for="patient_name">Patient Name</label>
                <input type="text" id="patient_name" name="patient_name" value="{}"></div>
            <div><label for="doctor_name">Doctor Name</label>
                <input type="text" id="doctor_name" name="doctor_name" value="{}"></div>
        </div>
        <h3>Clinical Criteria</h3>
        <div class="grid">{}</div>
        <p><button type="submit">Diagnose</button></p>
    </form>
</div>"#,
        escape_html(&form.patient_name),
        escape_html(&form.doctor_name),
        fields
    )
}

/// Hidden copy of the submitted form so the PDF is built from the same inputs.
fn render_download(form: &DiagnoseForm) -> String {
    let mut hidden = format!(
        r#"<input type="hidden" name="patient_name" value="{}"><input type="hidden" name="doctor_name" value="{}">"#,
        escape_html(&form.patient_name),
        escape_html(&form.doctor_name)
    );
    for c in Criterion::ALL {
        hidden.push_str(&format!(
            r#"<input type="hidden" name="{}" value="{}">"#,
            DiagnoseForm::field_name(c),
            escape_html(form.field(c))
        ));
    }
    format!(
        r#"<form method="POST" action="/report">{hidden}<button type="submit">Download PDF Report</button></form>"#
    )
}

fn render_results(form: &DiagnoseForm, report: &DiagnosisReport) -> String {
    let summary: String = report
        .input_summary
        .iter()
        .map(|(label, value)| {
            format!(
                "<tr><th>{}</th><td>{}</td></tr>",
                escape_html(label),
                escape_html(value)
            )
        })
        .collect();

    let rows: String = report
        .rows
        .iter()
        .map(|r| {
            format!(
                "<tr><td>#{}</td><td>{}</td><td>{:.1}%</td><td>{:.2}</td></tr>",
                r.rank,
                escape_html(&r.disease),
                r.similarity_pct,
                r.distance
            )
        })
        .collect();

    let rationale: String = report
        .rationale
        .lines()
        .iter()
        .map(|l| format!("<li>{}</li>", escape_html(l.trim_start_matches("- "))))
        .collect();

    format!(
        r#"
<div class="card top">
    <h2>Most Likely Diagnosis: {} ({:.1}%)</h2>
    <p>{}</p>
    <p><small>Patient: {} · Doctor: {} · {} · Report {}</small></p>
    {}
</div>
<div class="grid">
    <div class="card"><h3>Patient Input Summary</h3><table>{}</table></div>
    <div class="card"><h3>Diagnosis Ranking</h3>
        <table><thead><tr><th>#</th><th>Disease</th><th>Similarity</th><th>Distance</th></tr></thead>
        <tbody>{}</tbody></table></div>
</div>
<div class="card charts">
    {}
    {}
    {}
</div>
<div class="card"><h3>{}</h3><ul>{}</ul></div>"#,
        escape_html(&report.top_disease),
        report.top_similarity_pct,
        escape_html(&report.summary_sentence()),
        escape_html(&report.meta.patient_name),
        escape_html(&report.meta.doctor_name),
        report.timestamp(),
        report.id,
        render_download(form),
        summary,
        rows,
        report.bar_chart.to_svg(),
        report.radar_chart.to_svg(),
        report.healthy_chart.to_svg(),
        escape_html(&report.rationale.headline()),
        rationale
    )
}

fn render_page(form: &DiagnoseForm, report: Option<&DiagnosisReport>, error: Option<&str>) -> String {
    let banner = error
        .map(|e| format!(r#"<div class="alert">{}</div>"#, escape_html(e)))
        .unwrap_or_default();
    let results = report
        .map(|r| render_results(form, r))
        .unwrap_or_default();

    page(
        "Diagnosis",
        &format!("{banner}{}{results}", render_form(form)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selected_option_follows_form() {
        let form = DiagnoseForm {
            pain: "severe".into(),
            ..DiagnoseForm::default()
        };
        let html = render_field(&form, Criterion::Pain);
        assert!(html.contains(r#"<option value="Severe" selected>"#));
        assert!(html.contains(r#"<option value="Extreme">"#));
    }

    #[test]
    fn test_names_are_escaped() {
        let form = DiagnoseForm {
            patient_name: "<script>".into(),
            ..DiagnoseForm::default()
        };
        let html = render_page(&form, None, None);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_banner_without_results() {
        let html = render_page(&DiagnoseForm::default(), None, Some("Pain is invalid"));
        assert!(html.contains(r#"class="alert""#));
        assert!(!html.contains("Most Likely Diagnosis"));
    }
}
