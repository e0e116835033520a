use thiserror::Error;

#[derive(Error, Debug)]
pub enum MappingError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Unsupported file format: {path}")]
    UnsupportedFormat { path: String },

    #[error("Missing dependency for {format} input: {hint}")]
    MissingDependency { format: String, hint: String },

    #[error("Unknown competence axis: '{value}'")]
    UnknownAxis { value: String },

    #[error("Unknown competence level: '{value}'")]
    UnknownLevel { value: String },

    #[error("Invalid row {row} in {path}: {source}")]
    InvalidRow {
        path: String,
        row: usize,
        #[source]
        source: Box<MappingError>,
    },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Input,
    Data,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl MappingError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            MappingError::IoError(_) => ErrorCategory::Io,
            MappingError::CsvError(_)
            | MappingError::UnsupportedFormat { .. }
            | MappingError::MissingDependency { .. } => ErrorCategory::Input,
            MappingError::SerializationError(_)
            | MappingError::UnknownAxis { .. }
            | MappingError::UnknownLevel { .. }
            | MappingError::InvalidRow { .. } => ErrorCategory::Data,
            MappingError::ConfigError { .. }
            | MappingError::InvalidConfigValueError { .. }
            | MappingError::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Io => ErrorSeverity::Critical,
            ErrorCategory::Input | ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::Medium,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            MappingError::IoError(_) => {
                "Check that the file exists and is readable".to_string()
            }
            MappingError::CsvError(_) => {
                "Make sure the file has a header row and consistent column counts".to_string()
            }
            MappingError::SerializationError(_) => {
                "Report output could not be encoded; re-run with --format text".to_string()
            }
            MappingError::UnsupportedFormat { .. } => {
                "Provide a .csv or .tsv competence matrix".to_string()
            }
            MappingError::MissingDependency { hint, .. } => hint.clone(),
            MappingError::UnknownAxis { .. } => {
                "Use one of MARINE, MARITIME, OCEANIC (or the codes M, T, O)".to_string()
            }
            MappingError::UnknownLevel { .. } => {
                "Use one of FOUNDATIONAL, INTERMEDIATE, ADVANCED, EXPERT".to_string()
            }
            MappingError::InvalidRow { source, .. } => source.recovery_suggestion(),
            MappingError::ConfigError { .. } | MappingError::MissingConfigError { .. } => {
                "Review the configuration file against the documented sections".to_string()
            }
            MappingError::InvalidConfigValueError { field, .. } => {
                format!("Fix the value of '{}' in the configuration", field)
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            MappingError::InvalidRow { path, row, source } => {
                format!("Row {} of {} could not be read: {}", row, path, source)
            }
            MappingError::UnsupportedFormat { path } => {
                format!("Cannot read competences from '{}': unsupported file type", path)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, MappingError>;
