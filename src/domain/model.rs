use crate::utils::error::{MappingError, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Tripartite Model of Blue Dynamics (TMBD) axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BlueDynamicsAxis {
    /// Biophysical agency.
    Marine,
    /// Techno-economic and institutional mediation.
    Maritime,
    /// Planetary governance and hydrosocial subjectivity.
    Oceanic,
}

impl BlueDynamicsAxis {
    pub const ALL: [BlueDynamicsAxis; 3] = [
        BlueDynamicsAxis::Marine,
        BlueDynamicsAxis::Maritime,
        BlueDynamicsAxis::Oceanic,
    ];

    /// Short code used in exported records.
    pub fn code(self) -> &'static str {
        match self {
            BlueDynamicsAxis::Marine => "M",
            BlueDynamicsAxis::Maritime => "T",
            BlueDynamicsAxis::Oceanic => "O",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            BlueDynamicsAxis::Marine => "MARINE",
            BlueDynamicsAxis::Maritime => "MARITIME",
            BlueDynamicsAxis::Oceanic => "OCEANIC",
        }
    }
}

impl fmt::Display for BlueDynamicsAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Accepts either the short code or the axis name, case-insensitively.
impl FromStr for BlueDynamicsAxis {
    type Err = MappingError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|axis| {
                axis.code().eq_ignore_ascii_case(wanted) || axis.name().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| MappingError::UnknownAxis {
                value: s.to_string(),
            })
    }
}

/// Proficiency levels. Ordering follows [`CompetenceLevel::rank`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CompetenceLevel {
    #[default]
    Foundational,
    Intermediate,
    Advanced,
    Expert,
}

impl CompetenceLevel {
    pub const ALL: [CompetenceLevel; 4] = [
        CompetenceLevel::Foundational,
        CompetenceLevel::Intermediate,
        CompetenceLevel::Advanced,
        CompetenceLevel::Expert,
    ];

    /// Numeric rank, averaged when ordering credential pathways.
    pub fn rank(self) -> u8 {
        match self {
            CompetenceLevel::Foundational => 1,
            CompetenceLevel::Intermediate => 2,
            CompetenceLevel::Advanced => 3,
            CompetenceLevel::Expert => 4,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            CompetenceLevel::Foundational => "FOUNDATIONAL",
            CompetenceLevel::Intermediate => "INTERMEDIATE",
            CompetenceLevel::Advanced => "ADVANCED",
            CompetenceLevel::Expert => "EXPERT",
        }
    }
}

impl PartialOrd for CompetenceLevel {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CompetenceLevel {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl fmt::Display for CompetenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CompetenceLevel {
    type Err = MappingError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|level| level.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| MappingError::UnknownLevel {
                value: s.to_string(),
            })
    }
}

/// A single skill or knowledge unit.
///
/// Fields are read-only once constructed; the mapper replaces whole values
/// rather than editing them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Competence {
    id: String,
    name: String,
    description: String,
    axis: BlueDynamicsAxis,
    level: CompetenceLevel,
    keywords: Vec<String>,
}

impl Competence {
    /// No validation happens here: empty ids and keyword lists are accepted.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        axis: BlueDynamicsAxis,
        level: CompetenceLevel,
        keywords: Vec<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            axis,
            level,
            keywords,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn axis(&self) -> BlueDynamicsAxis {
        self.axis
    }

    pub fn level(&self) -> CompetenceLevel {
        self.level
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn to_record(&self) -> CompetenceRecord {
        CompetenceRecord {
            id: self.id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            axis: self.axis.code().to_string(),
            level: self.level.name().to_string(),
            keywords: self.keywords.clone(),
        }
    }
}

/// Flat export form of a [`Competence`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompetenceRecord {
    pub id: String,
    pub name: String,
    pub description: String,
    pub axis: String,
    pub level: String,
    pub keywords: Vec<String>,
}

impl TryFrom<CompetenceRecord> for Competence {
    type Error = MappingError;

    fn try_from(record: CompetenceRecord) -> Result<Self> {
        let axis = record.axis.parse()?;
        let level = record.level.parse()?;
        Ok(Competence::new(
            record.id,
            record.name,
            record.description,
            axis,
            level,
            record.keywords,
        ))
    }
}

/// A stackable bundle of competences aimed at one sector.
///
/// `competences` holds ids only and may name competences that were never
/// registered with a mapper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MicroCredential {
    id: String,
    title: String,
    competences: Vec<String>,
    description: String,
    sector: String,
}

impl MicroCredential {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        competences: Vec<String>,
        description: impl Into<String>,
        sector: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            competences,
            description: description.into(),
            sector: sector.into(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn competences(&self) -> &[String] {
        &self.competences
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn sector(&self) -> &str {
        &self.sector
    }

    /// Case-insensitive sector comparison used by gap analysis.
    pub fn serves_sector(&self, sector: &str) -> bool {
        self.sector.to_lowercase() == sector.to_lowercase()
    }

    pub fn to_record(&self) -> CredentialRecord {
        CredentialRecord {
            id: self.id.clone(),
            title: self.title.clone(),
            competences: self.competences.clone(),
            description: self.description.clone(),
            sector: self.sector.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialRecord {
    pub id: String,
    pub title: String,
    pub competences: Vec<String>,
    #[serde(default)]
    pub description: String,
    pub sector: String,
}

impl From<CredentialRecord> for MicroCredential {
    fn from(record: CredentialRecord) -> Self {
        MicroCredential::new(
            record.id,
            record.title,
            record.competences,
            record.description,
            record.sector,
        )
    }
}
