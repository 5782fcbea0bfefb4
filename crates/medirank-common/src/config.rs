//! Runtime configuration for the diagnosis calculator.
//!
//! Everything here is plain data: the reference disease table, criterion
//! weights, the healthy baseline and report/server options. Loaded once at
//! startup from YAML, JSON or TOML and never mutated afterwards.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Complete application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MedirankConfig {
    /// Reference disease profiles, in tie-break order
    #[serde(default = "default_profiles")]
    pub profiles: Vec<ProfileEntry>,

    /// Per-criterion distance weights
    #[serde(default, alias = "weights")]
    pub scoring: ScoringConfig,

    /// Healthy reference vector used for the baseline comparison chart
    #[serde(default = "default_healthy_baseline")]
    pub healthy_baseline: Vec<f64>,

    /// Report options
    #[serde(default)]
    pub report: ReportConfig,

    /// Form server options
    #[serde(default)]
    pub server: ServerConfig,
}

impl Default for MedirankConfig {
    fn default() -> Self {
        Self {
            profiles: default_profiles(),
            scoring: ScoringConfig::default(),
            healthy_baseline: default_healthy_baseline(),
            report: ReportConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

// ── Disease Profiles ─────────────────────────────────────────────────────────

/// One named reference vector as it appears in a config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileEntry {
    /// Disease name (e.g., "Dengue DHF")
    pub name: String,

    /// Values in criterion order: fever, platelet, WBC, bleeding, fatigue, pain, nausea
    pub vector: Vec<f64>,

    /// Optional free-text rationale shown when this disease ranks first
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rationale: Option<String>,
}

impl ProfileEntry {
    pub fn new(name: impl Into<String>, vector: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            vector,
            rationale: None,
        }
    }
}

/// The canonical nine-disease reference table.
pub fn default_profiles() -> Vec<ProfileEntry> {
    vec![
        ProfileEntry::new("Dengue DHF",    vec![38.5,  45.0,  4.0, 1.0, 0.6, 0.9, 0.9]),
        ProfileEntry::new("Sepsis",        vec![39.0, 180.0, 25.0, 0.0, 0.3, 0.6, 0.0]),
        ProfileEntry::new("Meningitis",    vec![39.2, 150.0, 12.0, 0.0, 0.6, 0.9, 0.6]),
        ProfileEntry::new("Leukemia",      vec![38.0,  90.0,  1.2, 1.0, 0.6, 0.9, 0.3]),
        ProfileEntry::new("Typhoid Fever", vec![38.8, 110.0,  5.0, 0.0, 0.6, 0.3, 0.9]),
        ProfileEntry::new("Malaria",       vec![39.5,  70.0,  6.5, 1.0, 0.9, 0.9, 0.9]),
        ProfileEntry::new("COVID-19",      vec![39.0, 140.0,  7.0, 0.0, 0.9, 0.6, 0.3]),
        ProfileEntry::new("Hepatitis A",   vec![38.0, 160.0,  5.5, 0.0, 0.6, 0.3, 0.9]),
        ProfileEntry::new("Appendicitis",  vec![38.2, 250.0, 10.0, 0.0, 0.3, 0.9, 0.6]),
    ]
}

fn default_healthy_baseline() -> Vec<f64> {
    vec![36.8, 250.0, 6.0, 0.0, 0.1, 0.1, 0.0]
}

// ── Scoring Configuration ─────────────────────────────────────────────────────

/// Distance weights, one per criterion.
///
/// All ones reproduces the plain Euclidean distance, where platelet count
/// dominates the symptom scores by two orders of magnitude.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    #[serde(default = "default_weight")]
    pub fever: f64,

    #[serde(default = "default_weight")]
    pub platelet_count: f64,

    #[serde(default = "default_weight")]
    pub wbc_count: f64,

    #[serde(default = "default_weight")]
    pub bleeding: f64,

    #[serde(default = "default_weight")]
    pub fatigue: f64,

    #[serde(default = "default_weight")]
    pub pain: f64,

    #[serde(default = "default_weight")]
    pub nausea: f64,
}

fn default_weight() -> f64 { 1.0 }

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            fever: default_weight(),
            platelet_count: default_weight(),
            wbc_count: default_weight(),
            bleeding: default_weight(),
            fatigue: default_weight(),
            pain: default_weight(),
            nausea: default_weight(),
        }
    }
}

impl ScoringConfig {
    /// Weights in criterion order.
    pub fn as_array(&self) -> [f64; 7] {
        [
            self.fever,
            self.platelet_count,
            self.wbc_count,
            self.bleeding,
            self.fatigue,
            self.pain,
            self.nausea,
        ]
    }
}

// ── Report Configuration ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Title printed at the top of the document
    #[serde(default = "default_title")]
    pub title: String,

    /// Organisation line printed in the page header
    #[serde(default = "default_organisation")]
    pub organisation: String,

    /// Keep an on-disk copy of every generated PDF
    #[serde(default)]
    pub save_copy: bool,

    /// Directory for on-disk copies
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Max normalised difference for a criterion to count as a strong match
    #[serde(default = "default_match_tolerance")]
    pub match_tolerance: f64,
}

fn default_title() -> String {
    "MediRank: Diagnosis Support Tool Using Euclidean Distance-Based Similarity Analysis".to_string()
}
fn default_organisation() -> String { "MediRank Diagnostic Support".to_string() }
fn default_output_dir() -> String { "diagnosis_reports".to_string() }
fn default_match_tolerance() -> f64 { 0.1 }

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            organisation: default_organisation(),
            save_copy: false,
            output_dir: default_output_dir(),
            match_tolerance: default_match_tolerance(),
        }
    }
}

// ── Server Configuration ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Socket address the form server binds to
    #[serde(default = "default_bind")]
    pub bind: String,
}

fn default_bind() -> String { "127.0.0.1:3001".to_string() }

impl Default for ServerConfig {
    fn default() -> Self {
        Self { bind: default_bind() }
    }
}

// ── Helper Methods ─────────────────────────────────────────────────────────────

impl MedirankConfig {
    /// Load from YAML file
    pub fn from_yaml(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load from JSON file
    pub fn from_json(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Load from TOML file
    pub fn from_toml(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load by file extension (`.yaml`/`.yml`, `.json`, `.toml`).
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let path_str = path
            .to_str()
            .ok_or_else(|| anyhow::anyhow!("config path is not valid UTF-8: {}", path.display()))?;

        let config = match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml(path_str)?,
            Some("json") => Self::from_json(path_str)?,
            Some("toml") => Self::from_toml(path_str)?,
            other => anyhow::bail!("unsupported config format: {:?}", other),
        };

        tracing::debug!(
            path = %path.display(),
            profiles = config.profiles.len(),
            "loaded configuration"
        );
        Ok(config)
    }

    /// Save to YAML file
    pub fn to_yaml(&self, path: &str) -> anyhow::Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Rationale text configured for a disease, if any.
    pub fn rationale_for(&self, disease: &str) -> Option<&str> {
        self.profiles
            .iter()
            .find(|p| p.name == disease)
            .and_then(|p| p.rationale.as_deref())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
