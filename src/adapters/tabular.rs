use crate::domain::model::{BlueDynamicsAxis, Competence, CompetenceLevel};
use crate::domain::ports::CompetenceSource;
use crate::utils::error::{MappingError, Result};
use serde::Deserialize;
use std::io::Read;
use std::path::{Path, PathBuf};

pub const SUPPORTED_EXTENSIONS: &[&str] = &["csv", "tsv"];

const KEYWORD_SEPARATOR: char = ';';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabularFormat {
    Csv,
    Tsv,
}

impl TabularFormat {
    /// Picks a format from the file extension.
    ///
    /// Spreadsheets are recognised but cannot be parsed by this build.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        match extension.as_deref() {
            Some("csv") => Ok(TabularFormat::Csv),
            Some("tsv") => Ok(TabularFormat::Tsv),
            Some(ext @ ("xlsx" | "xls")) => Err(MappingError::MissingDependency {
                format: ext.to_string(),
                hint: format!(
                    "no spreadsheet reader is compiled in; export '{}' to CSV or TSV \
                     (e.g. File > Save As > CSV) and load that file instead",
                    path.display()
                ),
            }),
            _ => Err(MappingError::UnsupportedFormat {
                path: path.display().to_string(),
            }),
        }
    }

    fn delimiter(self) -> u8 {
        match self {
            TabularFormat::Csv => b',',
            TabularFormat::Tsv => b'\t',
        }
    }
}

/// One row of a competence matrix. Absent columns and empty cells fall
/// back to the row defaults in [`CompetenceRow::into_competence`].
#[derive(Debug, Default, Deserialize)]
struct CompetenceRow {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    axis: Option<String>,
    #[serde(default)]
    level: Option<String>,
    #[serde(default)]
    keywords: Option<String>,
}

impl CompetenceRow {
    fn into_competence(self) -> Result<Competence> {
        let axis = match self.axis.as_deref() {
            Some(raw) => raw.parse()?,
            None => BlueDynamicsAxis::Marine,
        };
        let level = match self.level.as_deref() {
            Some(raw) => raw.parse()?,
            None => CompetenceLevel::Foundational,
        };

        Ok(Competence::new(
            self.id.unwrap_or_default(),
            self.name.unwrap_or_default(),
            self.description.unwrap_or_default(),
            axis,
            level,
            split_keywords(self.keywords.as_deref().unwrap_or_default()),
        ))
    }
}

fn split_keywords(raw: &str) -> Vec<String> {
    raw.split(KEYWORD_SEPARATOR)
        .map(str::trim)
        .filter(|word| !word.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parses a whole matrix from any reader. `origin` only labels errors.
pub fn read_competences<R: Read>(
    reader: R,
    format: TabularFormat,
    origin: &str,
) -> Result<Vec<Competence>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(format.delimiter())
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut competences = Vec::new();
    for (index, row) in csv_reader.deserialize::<CompetenceRow>().enumerate() {
        let row_number = index + 1;
        let competence = row
            .map_err(MappingError::from)
            .and_then(CompetenceRow::into_competence)
            .map_err(|e| MappingError::InvalidRow {
                path: origin.to_string(),
                row: row_number,
                source: Box::new(e),
            })?;
        tracing::trace!("Row {}: competence '{}'", row_number, competence.id());
        competences.push(competence);
    }

    Ok(competences)
}

/// Loads a competence matrix from a `.csv` or `.tsv` file.
pub fn load_competence_matrix<P: AsRef<Path>>(path: P) -> Result<Vec<Competence>> {
    let path = path.as_ref();
    let format = TabularFormat::from_path(path)?;

    tracing::debug!("Reading {:?} competence matrix from {}", format, path.display());
    let file = std::fs::File::open(path)?;
    let competences = read_competences(file, format, &path.display().to_string())?;

    tracing::info!(
        "📄 Read {} competences from {}",
        competences.len(),
        path.display()
    );
    Ok(competences)
}

#[derive(Debug, Clone)]
pub struct CsvCompetenceLoader {
    path: PathBuf,
}

impl CsvCompetenceLoader {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CompetenceSource for CsvCompetenceLoader {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn load_competences(&self) -> Result<Vec<Competence>> {
        load_competence_matrix(&self.path)
    }
}
