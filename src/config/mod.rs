pub mod toml_config;

use crate::adapters::tabular::SUPPORTED_EXTENSIONS;
use crate::core::samples::{SAMPLE_AVAILABLE, SAMPLE_TARGET_SECTOR};
use crate::domain::model::{CompetenceLevel, MicroCredential};
use crate::utils::error::{MappingError, Result};
use crate::utils::validation::{validate_file_extensions, validate_non_empty_string, Validate};
use std::str::FromStr;
use toml_config::MappingConfig;

#[cfg(feature = "cli")]
use clap::Parser;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = MappingError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(MappingError::InvalidConfigValueError {
                field: "output.format".to_string(),
                value: other.to_string(),
                reason: format!(
                    "Unsupported format. Valid formats: {}",
                    toml_config::OUTPUT_FORMATS.join(", ")
                ),
            }),
        }
    }
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "morskamary")]
#[command(about = "Maritime competence mapping and micro-credential pathways")]
pub struct CliConfig {
    /// Path to a TOML mapping configuration
    #[arg(short, long)]
    pub config: Option<String>,

    /// Competence matrices to load (.csv or .tsv)
    #[arg(long, value_delimiter = ',')]
    pub competences: Vec<String>,

    /// Skip the built-in sample competences and credentials
    #[arg(long)]
    pub no_samples: bool,

    /// Competence ids the learner already holds
    #[arg(long, value_delimiter = ',')]
    pub available: Option<Vec<String>>,

    /// Target sector for gap analysis
    #[arg(long)]
    pub sector: Option<String>,

    /// Entry level for the pathway (currently informational)
    #[arg(long)]
    pub starting_level: Option<String>,

    /// Report format: text or json
    #[arg(long)]
    pub format: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,
}

/// Effective settings for one analysis run, after merging the config file
/// with command-line overrides.
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub competence_files: Vec<String>,
    pub include_samples: bool,
    pub credentials: Vec<MicroCredential>,
    pub available: Vec<String>,
    pub target_sector: String,
    pub starting_level: CompetenceLevel,
    pub format: OutputFormat,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            competence_files: Vec::new(),
            include_samples: true,
            credentials: Vec::new(),
            available: SAMPLE_AVAILABLE.iter().map(|id| id.to_string()).collect(),
            target_sector: SAMPLE_TARGET_SECTOR.to_string(),
            starting_level: CompetenceLevel::default(),
            format: OutputFormat::default(),
        }
    }
}

impl RunSettings {
    pub fn from_config(config: &MappingConfig) -> Result<Self> {
        let mut settings = Self {
            competence_files: config.competence_files().to_vec(),
            include_samples: config.include_samples(),
            credentials: config
                .credentials
                .iter()
                .cloned()
                .map(MicroCredential::from)
                .collect(),
            ..Self::default()
        };

        if let Some(available) = config.available() {
            settings.available = available.to_vec();
        }
        if let Some(sector) = config.target_sector() {
            settings.target_sector = sector.to_string();
        }
        if let Some(level) = config.starting_level()? {
            settings.starting_level = level;
        }
        if let Some(format) = config.output_format() {
            settings.format = format.parse()?;
        }

        Ok(settings)
    }

    /// Builds settings from the optional config file, then applies flags.
    #[cfg(feature = "cli")]
    pub fn from_cli(cli: &CliConfig) -> Result<Self> {
        let mut settings = match &cli.config {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path);
                let config = MappingConfig::from_file(path)?;
                config.validate()?;
                Self::from_config(&config)?
            }
            None => Self::default(),
        };

        settings.competence_files.extend(cli.competences.iter().cloned());
        if cli.no_samples {
            settings.include_samples = false;
        }
        if let Some(available) = &cli.available {
            // `--available=` arrives as a single empty value and means "holds nothing"
            settings.available = available
                .iter()
                .map(|id| id.trim())
                .filter(|id| !id.is_empty())
                .map(str::to_string)
                .collect();
        }
        if let Some(sector) = &cli.sector {
            settings.target_sector = sector.clone();
        }
        if let Some(level) = &cli.starting_level {
            settings.starting_level = level.parse()?;
        }
        if let Some(format) = &cli.format {
            settings.format = format.parse()?;
        }

        settings.validate()?;
        Ok(settings)
    }
}

impl Validate for RunSettings {
    fn validate(&self) -> Result<()> {
        validate_file_extensions("competences", &self.competence_files, SUPPORTED_EXTENSIONS)?;
        validate_non_empty_string("sector", &self.target_sector)?;
        Ok(())
    }
}
