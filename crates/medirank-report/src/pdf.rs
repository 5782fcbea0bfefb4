//! PDF rendering of a composed [`DiagnosisReport`] via `printpdf`.
//!
//! Page 1 carries the text sections, the following pages the charts. Text
//! overflowing a page continues on a fresh page with the same header.

use std::io::BufWriter;

use medirank_common::{MedirankError, Result};
use printpdf::path::{PaintMode, WindingOrder};
use printpdf::*;

use crate::chart::{Bar, BarChart, ChartColor, GroupedBarChart, RadarChart};
use crate::report::DiagnosisReport;

const PAGE_W: f32 = 210.0;
const PAGE_H: f32 = 297.0;
const MARGIN: f32 = 20.0;
const BOTTOM: f32 = 18.0;
const BLACK: ChartColor = ChartColor(0, 0, 0);

fn render_err(context: &str, e: impl std::fmt::Display) -> MedirankError {
    MedirankError::Render(format!("PDF {context} error: {e}"))
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    italic: IndirectFontRef,
}

/// Cursor over the document: tracks the current layer and vertical position.
struct PageWriter<'a> {
    doc: &'a PdfDocumentReference,
    fonts: &'a Fonts,
    layer: PdfLayerReference,
    y: f32,
    pages: usize,
    header: String,
}

impl<'a> PageWriter<'a> {
    fn new_page(&mut self) {
        self.pages += 1;
        let (page, layer) = self.doc.add_page(
            Mm(PAGE_W),
            Mm(PAGE_H),
            format!("Page {}", self.pages),
        );
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.y = PAGE_H - MARGIN;
        self.write_header();
    }

    fn write_header(&mut self) {
        set_fill(&self.layer, BLACK);
        self.layer.use_text(
            pdf_text(&self.header),
            9.0,
            Mm(MARGIN),
            Mm(PAGE_H - 12.0),
            &self.fonts.italic,
        );
    }

    /// Start a new page unless `needed` mm still fit.
    fn ensure(&mut self, needed: f32) {
        if self.y - needed < BOTTOM {
            self.new_page();
        }
    }

    fn line(&mut self, text: &str, size: f32, font: &IndirectFontRef, indent: f32) {
        let height = size * 0.55;
        self.ensure(height);
        set_fill(&self.layer, BLACK);
        self.layer
            .use_text(pdf_text(text), size, Mm(MARGIN + indent), Mm(self.y), font);
        self.y -= height;
    }

    fn heading(&mut self, text: &str) {
        self.gap(2.0);
        let fonts = self.fonts;
        self.line(text, 12.0, &fonts.bold, 0.0);
    }

    fn body(&mut self, text: &str) {
        let fonts = self.fonts;
        for wrapped in wrap_text(text, 95) {
            self.line(&wrapped, 10.0, &fonts.regular, 2.0);
        }
    }

    fn gap(&mut self, mm: f32) {
        self.y -= mm;
    }
}

/// Render the report to PDF bytes.
pub fn render_pdf(report: &DiagnosisReport) -> Result<Vec<u8>> {
    let (doc, page1, layer1) =
        PdfDocument::new(pdf_text(&report.title), Mm(PAGE_W), Mm(PAGE_H), "Page 1");
    let fonts = Fonts {
        regular: doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| render_err("font", e))?,
        bold: doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| render_err("font", e))?,
        italic: doc
            .add_builtin_font(BuiltinFont::HelveticaOblique)
            .map_err(|e| render_err("font", e))?,
    };

    let mut w = PageWriter {
        doc: &doc,
        fonts: &fonts,
        layer: doc.get_page(page1).get_layer(layer1),
        y: PAGE_H - MARGIN,
        pages: 1,
        header: format!(
            "{}     Patient: {}     Doctor: {}     Date: {}",
            report.organisation,
            report.meta.patient_name,
            report.meta.doctor_name,
            report.timestamp()
        ),
    };
    w.write_header();

    // Title and identifiers
    for line in wrap_text(&report.title, 70) {
        w.line(&line, 14.0, &fonts.bold, 0.0);
    }
    w.gap(1.0);
    w.line(&format!("Patient: {}", report.meta.patient_name), 11.0, &fonts.regular, 0.0);
    w.line(&format!("Doctor: {}", report.meta.doctor_name), 11.0, &fonts.regular, 0.0);
    w.line(&format!("Date & Time: {}", report.timestamp()), 11.0, &fonts.regular, 0.0);
    w.line(&format!("Report ID: {}", report.id), 8.0, &fonts.italic, 0.0);

    // Input summary
    w.heading("Patient Input Summary:");
    for (label, value) in &report.input_summary {
        w.line(&format!("{label}: {value}"), 10.0, &fonts.regular, 2.0);
    }

    // Top diagnosis and rationale
    w.heading(&format!(
        "Most Likely Diagnosis: {} ({:.1}%)",
        report.top_disease, report.top_similarity_pct
    ));
    w.body(&report.summary_sentence());
    w.heading(&format!("{}:", report.rationale.headline()));
    for line in report.rationale.lines() {
        w.body(&line);
    }

    // Full ranking
    w.heading("Diagnosis Ranking:");
    for row in &report.rows {
        w.line(
            &format!(
                "{}. {}: {:.1}% (Distance: {:.2})",
                row.rank, row.disease, row.similarity_pct, row.distance
            ),
            10.0,
            &fonts.regular,
            2.0,
        );
    }

    // Charts
    w.new_page();
    w.heading("Similarity Chart:");
    let mut bars = report.bar_chart.bars.as_slice();
    while !bars.is_empty() {
        if bar_rows_fitting(w.y) == 0 {
            w.new_page();
        }
        let (chunk, rest) = bars.split_at(bar_rows_fitting(w.y).min(bars.len()));
        draw_bar_chart(&w.layer, &fonts, &report.bar_chart, chunk, MARGIN, w.y, PAGE_W - 2.0 * MARGIN);
        w.y -= bar_chart_height(chunk.len());
        bars = rest;
    }

    w.ensure(RADAR_BLOCK + 10.0);
    w.heading("Radar Comparison:");
    draw_radar_chart(&w.layer, &fonts, &report.radar_chart, PAGE_W / 2.0, w.y - RADAR_BLOCK / 2.0);
    w.y -= RADAR_BLOCK;

    let grouped_h = grouped_chart_height(&report.healthy_chart);
    w.ensure(grouped_h + 10.0);
    w.heading("Patient vs Healthy Profile:");
    draw_grouped_chart(
        &w.layer,
        &fonts,
        &report.healthy_chart,
        MARGIN,
        w.y,
        PAGE_W - 2.0 * MARGIN,
    );
    w.y -= grouped_h;

    let pages = w.pages;
    drop(w);
    let mut buf = BufWriter::new(Vec::new());
    doc.save(&mut buf).map_err(|e| render_err("save", e))?;
    let bytes = buf.into_inner().map_err(|e| render_err("buffer", e))?;

    tracing::debug!(report_id = %report.id, pages, bytes = bytes.len(), "rendered PDF report");
    Ok(bytes)
}

// ── Chart drawing ─────────────────────────────────────────────────────────────

const BAR_ROW: f32 = 7.0;
const BAR_LABEL_W: f32 = 38.0;
const RADAR_RADIUS: f32 = 32.0;
const RADAR_BLOCK: f32 = 2.0 * RADAR_RADIUS + 24.0;
const GROUP_ROW: f32 = 9.0;

fn bar_chart_height(rows: usize) -> f32 {
    BAR_ROW * rows as f32 + 12.0
}

/// Bars that still fit above the bottom margin when the chart starts at `top`.
fn bar_rows_fitting(top: f32) -> usize {
    let room = top - BOTTOM - bar_chart_height(0);
    if room < BAR_ROW {
        0
    } else {
        (room / BAR_ROW).floor() as usize
    }
}

fn grouped_chart_height(chart: &GroupedBarChart) -> f32 {
    GROUP_ROW * chart.categories.len() as f32 + 14.0
}

fn draw_bar_chart(
    layer: &PdfLayerReference,
    fonts: &Fonts,
    chart: &BarChart,
    bars: &[Bar],
    x: f32,
    top: f32,
    width: f32,
) {
    let plot_w = width - BAR_LABEL_W - 16.0;
    for (i, bar) in bars.iter().enumerate() {
        let y = top - BAR_ROW * (i as f32 + 1.0);
        let len = plot_w * chart.fraction(bar.value) as f32;

        set_fill(layer, BLACK);
        layer.use_text(pdf_text(&truncate(&bar.label, 24)), 9.0, Mm(x), Mm(y + 1.5), &fonts.regular);
        if len > 0.0 {
            set_fill(layer, chart.color);
            fill_rect(layer, x + BAR_LABEL_W, y + 0.5, len, BAR_ROW - 2.0);
        }
        set_fill(layer, BLACK);
        layer.use_text(
            format!("{:.1}%", bar.value),
            8.0,
            Mm(x + BAR_LABEL_W + len + 2.0),
            Mm(y + 1.5),
            &fonts.regular,
        );
    }

    let axis_y = top - BAR_ROW * bars.len() as f32 - 1.0;
    stroke_line(layer, BLACK, (x + BAR_LABEL_W, axis_y), (x + BAR_LABEL_W + plot_w, axis_y));
    set_fill(layer, BLACK);
    layer.use_text(
        pdf_text(&chart.axis_label),
        9.0,
        Mm(x + BAR_LABEL_W + plot_w / 2.0 - 12.0),
        Mm(axis_y - 6.0),
        &fonts.regular,
    );
}

fn draw_radar_chart(layer: &PdfLayerReference, fonts: &Fonts, chart: &RadarChart, cx: f32, cy: f32) {
    let scale = chart.scale_max();
    let n = chart.axes.len();
    let to_page = |(ux, uy): (f64, f64)| (cx + ux as f32 * RADAR_RADIUS, cy + uy as f32 * RADAR_RADIUS);

    for ring in [0.25, 0.5, 0.75, 1.0] {
        let pts: Vec<(f32, f32)> = RadarChart::unit_vertices(&vec![ring * scale; n], scale)
            .into_iter()
            .map(to_page)
            .collect();
        stroke_polygon(layer, ChartColor::GRID, &pts);
    }

    let spokes = RadarChart::unit_vertices(&vec![scale; n], scale);
    for (axis, (ux, uy)) in chart.axes.iter().zip(spokes) {
        stroke_line(layer, ChartColor::GRID, (cx, cy), to_page((ux, uy)));
        let (lx, ly) = to_page((ux * 1.22, uy * 1.22));
        set_fill(layer, BLACK);
        layer.use_text(pdf_text(axis), 8.0, Mm(lx - 5.0), Mm(ly - 1.0), &fonts.regular);
    }

    for (i, series) in chart.series.iter().enumerate() {
        let pts: Vec<(f32, f32)> = RadarChart::unit_vertices(&series.values, scale)
            .into_iter()
            .map(to_page)
            .collect();
        set_fill(layer, series.color.lighten(0.75));
        fill_polygon(layer, &pts, PaintMode::Fill);
        stroke_polygon(layer, series.color, &pts);

        let ly = cy + RADAR_RADIUS - 6.0 * i as f32;
        set_fill(layer, series.color);
        fill_rect(layer, cx + RADAR_RADIUS + 12.0, ly, 3.0, 3.0);
        set_fill(layer, BLACK);
        layer.use_text(
            pdf_text(&series.name),
            8.0,
            Mm(cx + RADAR_RADIUS + 17.0),
            Mm(ly + 0.3),
            &fonts.regular,
        );
    }
}

fn draw_grouped_chart(
    layer: &PdfLayerReference,
    fonts: &Fonts,
    chart: &GroupedBarChart,
    x: f32,
    top: f32,
    width: f32,
) {
    let max = chart.max();
    let plot_w = width - BAR_LABEL_W - 30.0;
    let bar_h = (GROUP_ROW - 2.0) / chart.series.len().max(1) as f32;

    for (i, category) in chart.categories.iter().enumerate() {
        let y = top - GROUP_ROW * (i as f32 + 1.0);
        set_fill(layer, BLACK);
        layer.use_text(pdf_text(category), 8.0, Mm(x), Mm(y + 3.0), &fonts.regular);

        for (j, series) in chart.series.iter().enumerate() {
            let value = series.values.get(i).copied().unwrap_or(0.0);
            let len = plot_w * (value / max).clamp(0.0, 1.0) as f32;
            if len > 0.0 {
                set_fill(layer, series.color);
                let by = y + GROUP_ROW - 2.0 - bar_h * (j as f32 + 1.0);
                fill_rect(layer, x + BAR_LABEL_W, by, len, bar_h - 0.4);
            }
        }
    }

    for (j, series) in chart.series.iter().enumerate() {
        let ly = top - 6.0 - 5.0 * j as f32;
        let lx = x + BAR_LABEL_W + plot_w + 6.0;
        set_fill(layer, series.color);
        fill_rect(layer, lx, ly, 3.0, 3.0);
        set_fill(layer, BLACK);
        layer.use_text(pdf_text(&series.name), 8.0, Mm(lx + 5.0), Mm(ly + 0.3), &fonts.regular);
    }

    let axis_y = top - GROUP_ROW * chart.categories.len() as f32 - 1.0;
    set_fill(layer, BLACK);
    layer.use_text(
        pdf_text(&chart.axis_label),
        8.0,
        Mm(x + BAR_LABEL_W + plot_w / 2.0 - 20.0),
        Mm(axis_y - 6.0),
        &fonts.regular,
    );
}

// ── Drawing primitives ────────────────────────────────────────────────────────

fn pdf_color(c: ChartColor) -> Color {
    let (r, g, b) = c.unit();
    Color::Rgb(Rgb::new(r, g, b, None))
}

fn set_fill(layer: &PdfLayerReference, c: ChartColor) {
    layer.set_fill_color(pdf_color(c));
}

fn points(pts: &[(f32, f32)]) -> Vec<(Point, bool)> {
    pts.iter()
        .map(|&(x, y)| (Point::new(Mm(x), Mm(y)), false))
        .collect()
}

fn fill_polygon(layer: &PdfLayerReference, pts: &[(f32, f32)], mode: PaintMode) {
    layer.add_polygon(Polygon {
        rings: vec![points(pts)],
        mode,
        winding_order: WindingOrder::NonZero,
    });
}

fn fill_rect(layer: &PdfLayerReference, x: f32, y: f32, w: f32, h: f32) {
    fill_polygon(
        layer,
        &[(x, y), (x + w, y), (x + w, y + h), (x, y + h)],
        PaintMode::Fill,
    );
}

fn stroke_polygon(layer: &PdfLayerReference, c: ChartColor, pts: &[(f32, f32)]) {
    layer.set_outline_color(pdf_color(c));
    layer.set_outline_thickness(0.6);
    layer.add_line(Line {
        points: points(pts),
        is_closed: true,
    });
}

fn stroke_line(layer: &PdfLayerReference, c: ChartColor, from: (f32, f32), to: (f32, f32)) {
    layer.set_outline_color(pdf_color(c));
    layer.set_outline_thickness(0.4);
    layer.add_line(Line {
        points: points(&[from, to]),
        is_closed: false,
    });
}

// ── Text helpers ──────────────────────────────────────────────────────────────

/// Builtin PDF fonts only cover Latin-1 reliably; map the few symbols we
/// use and replace anything else outside ASCII.
fn pdf_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '°' => out.push_str("deg"),
            '\u{2018}' | '\u{2019}' => out.push('\''),
            '\u{201C}' | '\u{201D}' => out.push('"'),
            '\u{2013}' | '\u{2014}' => out.push('-'),
            c if c.is_ascii() => out.push(c),
            _ => out.push('?'),
        }
    }
    out
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    out.push('.');
    out
}

/// Simple word-wrap helper for PDF text rendering.
fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.len() + word.len() + 1 > max_chars && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{ReportContext, ReportMeta};
    use medirank_common::MedirankConfig;
    use medirank_ranker::{Ranker, RawInputs};

    fn report() -> DiagnosisReport {
        let config = MedirankConfig::default();
        let ranking = Ranker::from_config(&config)
            .unwrap()
            .rank_inputs(&RawInputs::default())
            .unwrap();
        let ctx = ReportContext::from_config(&config).unwrap();
        let meta = ReportMeta {
            patient_name: "John Doe".into(),
            doctor_name: "Dr. Zahari".into(),
        };
        DiagnosisReport::compose(&ranking, meta, &ctx).unwrap()
    }

    #[test]
    fn test_pdf_generation() {
        let bytes = render_pdf(&report()).unwrap();
        assert!(!bytes.is_empty());
        // PDF magic bytes: %PDF
        assert_eq!(&bytes[0..4], b"%PDF");
    }

    #[test]
    fn test_pdf_with_long_custom_table() {
        let mut config = MedirankConfig::default();
        config.profiles = (0..40)
            .map(|i| medirank_common::ProfileEntry::new(
                format!("Condition {i} – variant"),
                vec![38.0, 100.0 + i as f64, 5.0, 0.0, 0.3, 0.3, 0.3],
            ))
            .collect();
        let ranking = Ranker::from_config(&config)
            .unwrap()
            .rank_inputs(&RawInputs::default())
            .unwrap();
        let ctx = ReportContext::from_config(&config).unwrap();
        let report = DiagnosisReport::compose(&ranking, ReportMeta::default(), &ctx).unwrap();
        let bytes = render_pdf(&report).unwrap();
        assert_eq!(&bytes[0..4], b"%PDF");
    }

    #[test]
    fn test_bar_rows_stay_above_bottom_margin() {
        assert_eq!(bar_rows_fitting(BOTTOM), 0);
        assert_eq!(bar_rows_fitting(BOTTOM + bar_chart_height(0) + BAR_ROW - 0.1), 0);
        assert_eq!(bar_rows_fitting(BOTTOM + bar_chart_height(3)), 3);

        // A fresh page holds fewer than 40 bars, so a 40-row chart must split.
        let top = PAGE_H - MARGIN;
        let rows = bar_rows_fitting(top);
        assert!(rows > 0 && rows < 40);
        assert!(top - bar_chart_height(rows) >= BOTTOM);
    }

    #[test]
    fn test_pdf_text_is_ascii() {
        assert_eq!(pdf_text("Fever (°C)"), "Fever (degC)");
        assert_eq!(pdf_text("patient’s"), "patient's");
        assert_eq!(pdf_text("naïve"), "na?ve");
    }

    #[test]
    fn test_wrap_text() {
        let lines = wrap_text("one two three four", 9);
        assert_eq!(lines, vec!["one two", "three", "four"]);
        assert_eq!(wrap_text("", 10), vec![String::new()]);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Dengue DHF", 24), "Dengue DHF");
        assert_eq!(truncate("abcdefghij", 5), "abcd.");
    }
}
