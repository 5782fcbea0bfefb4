//! medirank-common: Shared errors and configuration used across all MediRank crates.

pub mod error;
pub mod config;

// Re-export commonly used types
pub use config::{MedirankConfig, ProfileEntry, ReportConfig, ScoringConfig, ServerConfig};
pub use error::{MedirankError, Result};
