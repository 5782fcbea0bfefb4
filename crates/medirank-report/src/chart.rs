//! Chart models shared by the SVG (screen) and PDF (document) renderers.
//!
//! Geometry lives here once; each backend only maps unit coordinates onto
//! its own canvas.

use std::f64::consts::PI;

use medirank_ranker::normalise::radar_normalise;
use medirank_ranker::{Criterion, FeatureVector, RankedResult, Ranking};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChartColor(pub u8, pub u8, pub u8);

impl ChartColor {
    pub const GREEN: ChartColor = ChartColor(46, 139, 87);
    pub const BLUE: ChartColor = ChartColor(30, 100, 220);
    pub const DODGER_BLUE: ChartColor = ChartColor(30, 144, 255);
    pub const LIGHT_GRAY: ChartColor = ChartColor(190, 190, 190);
    pub const GRID: ChartColor = ChartColor(210, 210, 210);

    pub fn hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }

    /// Components in [0, 1].
    pub fn unit(self) -> (f32, f32, f32) {
        (self.0 as f32 / 255.0, self.1 as f32 / 255.0, self.2 as f32 / 255.0)
    }

    /// Blend towards white, used for translucent-looking fills.
    pub fn lighten(self, amount: f32) -> ChartColor {
        let mix = |c: u8| (c as f32 + (255.0 - c as f32) * amount).round().min(255.0) as u8;
        ChartColor(mix(self.0), mix(self.1), mix(self.2))
    }
}

// ── Ranking bar chart ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    pub label: String,
    pub value: f64,
}

/// Horizontal bar chart, one bar per row, top to bottom.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarChart {
    pub title: String,
    pub axis_label: String,
    pub bars: Vec<Bar>,
    pub max: f64,
    pub color: ChartColor,
}

impl BarChart {
    /// Similarity per disease, best match first.
    pub fn similarity(ranking: &Ranking) -> Self {
        let bars = ranking
            .rows()
            .into_iter()
            .map(|row| Bar {
                label: row.disease,
                value: row.similarity_pct,
            })
            .collect();
        Self {
            title: "Similarity Score per Disease".to_string(),
            axis_label: "Similarity (%)".to_string(),
            bars,
            max: 100.0,
            color: ChartColor::GREEN,
        }
    }

    /// Bar length as a fraction of the full axis.
    pub fn fraction(&self, value: f64) -> f64 {
        if self.max <= 0.0 {
            return 0.0;
        }
        (value / self.max).clamp(0.0, 1.0)
    }

    pub fn to_svg(&self) -> String {
        const LABEL_W: f64 = 130.0;
        const PLOT_W: f64 = 380.0;
        const ROW_H: f64 = 26.0;
        const TOP: f64 = 34.0;

        let height = TOP + ROW_H * self.bars.len() as f64 + 40.0;
        let width = LABEL_W + PLOT_W + 70.0;

        let mut svg = svg_open(width, height);
        svg.push_str(&svg_title(width / 2.0, 20.0, &self.title));

        for (i, bar) in self.bars.iter().enumerate() {
            let y = TOP + ROW_H * i as f64;
            let w = PLOT_W * self.fraction(bar.value);
            svg.push_str(&format!(
                r#"<text x="{:.1}" y="{:.1}" font-size="12" text-anchor="end">{}</text>"#,
                LABEL_W - 8.0,
                y + ROW_H * 0.6,
                escape_xml(&bar.label)
            ));
            svg.push_str(&format!(
                r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="{}"/>"#,
                LABEL_W,
                y + 4.0,
                w,
                ROW_H - 8.0,
                self.color.hex()
            ));
            svg.push_str(&format!(
                r#"<text x="{:.1}" y="{:.1}" font-size="11">{:.1}%</text>"#,
                LABEL_W + w + 6.0,
                y + ROW_H * 0.6,
                bar.value
            ));
        }

        let axis_y = TOP + ROW_H * self.bars.len() as f64 + 4.0;
        svg.push_str(&format!(
            r##"<line x1="{LABEL_W:.1}" y1="{axis_y:.1}" x2="{:.1}" y2="{axis_y:.1}" stroke="#555555"/>"##,
            LABEL_W + PLOT_W
        ));
        svg.push_str(&format!(
            r#"<text x="{:.1}" y="{:.1}" font-size="12" text-anchor="middle">{}</text>"#,
            LABEL_W + PLOT_W / 2.0,
            axis_y + 24.0,
            escape_xml(&self.axis_label)
        ));
        svg.push_str("</svg>");
        svg
    }
}

// ── Radar chart ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadarSeries {
    pub name: String,
    pub values: Vec<f64>,
    pub color: ChartColor,
}

/// Spider chart over the seven criteria, values on the radar scale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadarChart {
    pub axes: Vec<String>,
    pub series: Vec<RadarSeries>,
}

impl RadarChart {
    /// Normalised patient vector against the normalised top-match profile.
    pub fn comparison(patient: &FeatureVector, top: &RankedResult) -> Self {
        Self {
            axes: Criterion::ALL.iter().map(|c| c.short_label().to_string()).collect(),
            series: vec![
                RadarSeries {
                    name: "Patient".to_string(),
                    values: radar_normalise(patient).to_vec(),
                    color: ChartColor::BLUE,
                },
                RadarSeries {
                    name: top.disease.clone(),
                    values: radar_normalise(&top.profile).to_vec(),
                    color: ChartColor::GREEN,
                },
            ],
        }
    }

    /// Outer ring value; at least 1.0 so in-domain data never touches the rim.
    pub fn scale_max(&self) -> f64 {
        self.series
            .iter()
            .flat_map(|s| s.values.iter().copied())
            .fold(1.0, f64::max)
    }

    /// Vertex positions on the unit circle (y up), first axis at 12 o'clock,
    /// proceeding clockwise.
    pub fn unit_vertices(values: &[f64], scale_max: f64) -> Vec<(f64, f64)> {
        let n = values.len();
        values
            .iter()
            .enumerate()
            .map(|(k, &v)| {
                let r = if scale_max > 0.0 { (v / scale_max).max(0.0) } else { 0.0 };
                let theta = PI / 2.0 - 2.0 * PI * k as f64 / n as f64;
                (r * theta.cos(), r * theta.sin())
            })
            .collect()
    }

    pub fn to_svg(&self) -> String {
        const SIZE: f64 = 360.0;
        const RADIUS: f64 = 120.0;
        let (cx, cy) = (SIZE / 2.0, SIZE / 2.0 + 10.0);
        let scale = self.scale_max();
        let n = self.axes.len();

        let to_canvas = |(x, y): (f64, f64)| (cx + x * RADIUS, cy - y * RADIUS);
        let points = |values: &[f64]| {
            Self::unit_vertices(values, scale)
                .into_iter()
                .map(to_canvas)
                .map(|(x, y)| format!("{x:.1},{y:.1}"))
                .collect::<Vec<_>>()
                .join(" ")
        };

        let mut svg = svg_open(SIZE, SIZE + 30.0);

        for ring in [0.25, 0.5, 0.75, 1.0] {
            svg.push_str(&format!(
                r#"<polygon points="{}" fill="none" stroke="{}"/>"#,
                points(vec![ring * scale; n].as_slice()),
                ChartColor::GRID.hex()
            ));
        }

        let spokes = Self::unit_vertices(&vec![scale; n], scale);
        for (axis, spoke) in self.axes.iter().zip(spokes) {
            let (x, y) = to_canvas(spoke);
            let (lx, ly) = to_canvas((spoke.0 * 1.18, spoke.1 * 1.18));
            svg.push_str(&format!(
                r#"<line x1="{cx:.1}" y1="{cy:.1}" x2="{x:.1}" y2="{y:.1}" stroke="{}"/>"#,
                ChartColor::GRID.hex()
            ));
            svg.push_str(&format!(
                r#"<text x="{lx:.1}" y="{ly:.1}" font-size="11" text-anchor="middle">{}</text>"#,
                escape_xml(axis)
            ));
        }

        for (i, s) in self.series.iter().enumerate() {
            let color = s.color.hex();
            svg.push_str(&format!(
                r#"<polygon points="{}" fill="{color}" fill-opacity="0.25" stroke="{color}" stroke-width="2"/>"#,
                points(s.values.as_slice())
            ));
            let ly = 16.0 + 16.0 * i as f64;
            svg.push_str(&format!(
                r#"<rect x="{:.1}" y="{:.1}" width="10" height="10" fill="{color}"/><text x="{:.1}" y="{:.1}" font-size="11">{}</text>"#,
                SIZE - 120.0,
                ly - 9.0,
                SIZE - 106.0,
                ly,
                escape_xml(&s.name)
            ));
        }

        svg.push_str("</svg>");
        svg
    }
}

// ── Patient vs healthy grouped bars ───────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarSeries {
    pub name: String,
    pub values: Vec<f64>,
    pub color: ChartColor,
}

/// Horizontal grouped bars, one group per category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupedBarChart {
    pub title: String,
    pub axis_label: String,
    pub categories: Vec<String>,
    pub series: Vec<BarSeries>,
}

impl GroupedBarChart {
    /// Patient against the healthy baseline, both on the radar scale.
    pub fn healthy_comparison(patient: &FeatureVector, healthy: &FeatureVector) -> Self {
        Self {
            title: "Patient vs Healthy Profile".to_string(),
            axis_label: "Score / Severity (normalised)".to_string(),
            categories: Criterion::ALL.iter().map(|c| c.label().to_string()).collect(),
            series: vec![
                BarSeries {
                    name: "Patient".to_string(),
                    values: radar_normalise(patient).to_vec(),
                    color: ChartColor::DODGER_BLUE,
                },
                BarSeries {
                    name: "Healthy".to_string(),
                    values: radar_normalise(healthy).to_vec(),
                    color: ChartColor::LIGHT_GRAY,
                },
            ],
        }
    }

    pub fn max(&self) -> f64 {
        self.series
            .iter()
            .flat_map(|s| s.values.iter().copied())
            .fold(1.0, f64::max)
    }

    pub fn to_svg(&self) -> String {
        const LABEL_W: f64 = 120.0;
        const PLOT_W: f64 = 300.0;
        const GROUP_H: f64 = 30.0;
        const TOP: f64 = 34.0;

        let max = self.max();
        let bar_h = (GROUP_H - 8.0) / self.series.len().max(1) as f64;
        let height = TOP + GROUP_H * self.categories.len() as f64 + 50.0;
        let width = LABEL_W + PLOT_W + 110.0;

        let mut svg = svg_open(width, height);
        svg.push_str(&svg_title(width / 2.0, 20.0, &self.title));

        for (i, category) in self.categories.iter().enumerate() {
            let y = TOP + GROUP_H * i as f64;
            svg.push_str(&format!(
                r#"<text x="{:.1}" y="{:.1}" font-size="11" text-anchor="end">{}</text>"#,
                LABEL_W - 8.0,
                y + GROUP_H * 0.55,
                escape_xml(category)
            ));
            for (j, s) in self.series.iter().enumerate() {
                let value = s.values.get(i).copied().unwrap_or(0.0);
                let w = PLOT_W * (value / max).clamp(0.0, 1.0);
                svg.push_str(&format!(
                    r#"<rect x="{LABEL_W:.1}" y="{:.1}" width="{w:.1}" height="{bar_h:.1}" fill="{}"/>"#,
                    y + 4.0 + bar_h * j as f64,
                    s.color.hex()
                ));
            }
        }

        for (j, s) in self.series.iter().enumerate() {
            let ly = TOP + 10.0 + 16.0 * j as f64;
            svg.push_str(&format!(
                r#"<rect x="{:.1}" y="{:.1}" width="10" height="10" fill="{}"/><text x="{:.1}" y="{:.1}" font-size="11">{}</text>"#,
                LABEL_W + PLOT_W + 14.0,
                ly - 9.0,
                s.color.hex(),
                LABEL_W + PLOT_W + 28.0,
                ly,
                escape_xml(&s.name)
            ));
        }

        let axis_y = TOP + GROUP_H * self.categories.len() as f64 + 4.0;
        svg.push_str(&format!(
            r#"<text x="{:.1}" y="{:.1}" font-size="11" text-anchor="middle">{}</text>"#,
            LABEL_W + PLOT_W / 2.0,
            axis_y + 20.0,
            escape_xml(&self.axis_label)
        ));
        svg.push_str("</svg>");
        svg
    }
}

// ── SVG helpers ───────────────────────────────────────────────────────────────

fn svg_open(width: f64, height: f64) -> String {
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {width:.0} {height:.0}" width="{width:.0}" height="{height:.0}" font-family="Helvetica, Arial, sans-serif">"#
    )
}

fn svg_title(x: f64, y: f64, title: &str) -> String {
    format!(
        r#"<text x="{x:.1}" y="{y:.1}" font-size="14" font-weight="bold" text-anchor="middle">{}</text>"#,
        escape_xml(title)
    )
}

/// Escape text for XML/HTML element and attribute content.
pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use medirank_ranker::{rank, ReferenceTable};

    fn ranking() -> Ranking {
        let patient = FeatureVector::new([38.5, 55.0, 3.0, 1.0, 0.6, 0.9, 0.9]);
        rank(&patient, &ReferenceTable::canonical().unwrap())
    }

    #[test]
    fn test_similarity_bars_follow_ranking() {
        let chart = BarChart::similarity(&ranking());
        assert_eq!(chart.bars.len(), 9);
        assert_eq!(chart.bars[0].label, "Dengue DHF");
        assert_eq!(chart.bars.last().unwrap().value, 0.0);
        assert_eq!(chart.fraction(50.0), 0.5);
    }

    #[test]
    fn test_radar_vertices_start_at_top() {
        let v = RadarChart::unit_vertices(&[1.0, 1.0, 1.0, 1.0], 1.0);
        assert!((v[0].0).abs() < 1e-12 && (v[0].1 - 1.0).abs() < 1e-12);
        // clockwise: second axis at 3 o'clock
        assert!((v[1].0 - 1.0).abs() < 1e-12 && (v[1].1).abs() < 1e-12);
    }

    #[test]
    fn test_radar_comparison_series() {
        let r = ranking();
        let chart = RadarChart::comparison(&r.patient, r.top().unwrap());
        assert_eq!(chart.axes.len(), 7);
        assert_eq!(chart.series[1].name, "Dengue DHF");
        assert!((chart.series[1].values[1] - 45.0 / 500.0).abs() < 1e-12);
        assert_eq!(chart.scale_max(), 1.0);
    }

    #[test]
    fn test_svg_escapes_labels() {
        let chart = BarChart {
            title: "T".into(),
            axis_label: "x".into(),
            bars: vec![Bar { label: "A&B <x>".into(), value: 10.0 }],
            max: 100.0,
            color: ChartColor::GREEN,
        };
        let svg = chart.to_svg();
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains("A&amp;B &lt;x&gt;"));
        assert!(svg.contains("10.0%"));
    }

    #[test]
    fn test_healthy_comparison() {
        let patient = FeatureVector::new([38.5, 55.0, 3.0, 1.0, 0.6, 0.9, 0.9]);
        let healthy = FeatureVector::new([36.8, 250.0, 6.0, 0.0, 0.1, 0.1, 0.0]);
        let chart = GroupedBarChart::healthy_comparison(&patient, &healthy);
        assert_eq!(chart.categories.len(), 7);
        assert_eq!(chart.series.len(), 2);
        assert!((chart.series[1].values[1] - 0.5).abs() < 1e-12);
        assert!(chart.to_svg().contains("Patient vs Healthy Profile"));
    }

    #[test]
    fn test_lighten() {
        assert_eq!(ChartColor(0, 0, 0).lighten(1.0), ChartColor(255, 255, 255));
        assert_eq!(ChartColor::GREEN.lighten(0.0), ChartColor::GREEN);
        assert_eq!(ChartColor(255, 0, 16).hex(), "#ff0010");
    }
}
