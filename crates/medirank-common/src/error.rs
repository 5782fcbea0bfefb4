use thiserror::Error;

#[derive(Debug, Error)]
pub enum MedirankError {
    #[error("Invalid category for {criterion}: {value:?} (expected one of {expected})")]
    InvalidCategory {
        criterion: String,
        value: String,
        expected: String,
    },

    #[error("{criterion} value {value} is outside [{min}, {max}]")]
    OutOfRange {
        criterion: String,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("{criterion} is required")]
    MissingField { criterion: String },

    #[error("{criterion} must be a number, got {value:?}")]
    InvalidNumber { criterion: String, value: String },

    #[error("Dimension mismatch in {context}: expected {expected}, got {actual}")]
    DimensionMismatch {
        context: String,
        expected: usize,
        actual: usize,
    },

    #[error("Reference table has no disease profiles")]
    EmptyReferenceTable,

    #[error("Invalid disease profile: {0}")]
    InvalidProfile(String),

    #[error("Invalid criterion weights: {0}")]
    InvalidWeights(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MedirankError {
    /// True for errors caused by the submitted patient inputs rather than
    /// by configuration or rendering.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            MedirankError::InvalidCategory { .. }
                | MedirankError::InvalidNumber { .. }
                | MedirankError::MissingField { .. }
                | MedirankError::OutOfRange { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, MedirankError>;
