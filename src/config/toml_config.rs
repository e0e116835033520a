use crate::adapters::tabular::SUPPORTED_EXTENSIONS;
use crate::domain::model::{CompetenceLevel, CredentialRecord};
use crate::utils::error::{MappingError, Result};
use crate::utils::validation::{
    validate_file_extensions, validate_non_empty_string, validate_one_of,
    validate_required_field, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const OUTPUT_FORMATS: &[&str] = &["text", "json"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MappingConfig {
    pub mapping: MappingInfo,
    pub sources: Option<SourcesConfig>,
    #[serde(default)]
    pub credentials: Vec<CredentialRecord>,
    pub analysis: Option<AnalysisConfig>,
    pub output: Option<OutputConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MappingInfo {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourcesConfig {
    #[serde(default)]
    pub competence_files: Vec<String>,
    pub include_samples: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisConfig {
    pub available: Option<Vec<String>>,
    pub target_sector: Option<String>,
    pub starting_level: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: Option<String>,
}

impl MappingConfig {
    /// Loads and parses a TOML configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(MappingError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| MappingError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are left as-is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| MappingError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn competence_files(&self) -> &[String] {
        self.sources
            .as_ref()
            .map(|s| s.competence_files.as_slice())
            .unwrap_or(&[])
    }

    pub fn include_samples(&self) -> bool {
        self.sources
            .as_ref()
            .and_then(|s| s.include_samples)
            .unwrap_or(true)
    }

    pub fn available(&self) -> Option<&[String]> {
        self.analysis.as_ref()?.available.as_deref()
    }

    pub fn target_sector(&self) -> Option<&str> {
        self.analysis.as_ref()?.target_sector.as_deref()
    }

    pub fn starting_level(&self) -> Result<Option<CompetenceLevel>> {
        self.analysis
            .as_ref()
            .and_then(|a| a.starting_level.as_deref())
            .map(str::parse)
            .transpose()
    }

    pub fn output_format(&self) -> Option<&str> {
        self.output.as_ref()?.format.as_deref()
    }
}

impl Validate for MappingConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("mapping.name", &self.mapping.name)?;

        validate_file_extensions(
            "sources.competence_files",
            self.competence_files(),
            SUPPORTED_EXTENSIONS,
        )?;

        for (index, credential) in self.credentials.iter().enumerate() {
            validate_non_empty_string(&format!("credentials[{}].id", index), &credential.id)?;
        }

        if let Some(analysis) = &self.analysis {
            let sector = validate_required_field("analysis.target_sector", &analysis.target_sector)?;
            validate_non_empty_string("analysis.target_sector", sector)?;
        }

        if let Err(e) = self.starting_level() {
            return Err(MappingError::InvalidConfigValueError {
                field: "analysis.starting_level".to_string(),
                value: self
                    .analysis
                    .as_ref()
                    .and_then(|a| a.starting_level.clone())
                    .unwrap_or_default(),
                reason: e.to_string(),
            });
        }

        if let Some(format) = self.output_format() {
            validate_one_of("output.format", format, OUTPUT_FORMATS)?;
        }

        tracing::debug!("✅ Configuration '{}' validated", self.mapping.name);
        Ok(())
    }
}
