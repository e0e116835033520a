pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{load_competence_matrix, CsvCompetenceLoader};
pub use app::{AnalysisReport, AnalysisSession};
pub use config::{OutputFormat, RunSettings};
pub use crate::core::mapper::{CompetenceMapper, GapAnalysis, MappingSummary};
pub use domain::model::{BlueDynamicsAxis, Competence, CompetenceLevel, MicroCredential};
pub use domain::ports::CompetenceSource;
pub use utils::error::{MappingError, Result};
