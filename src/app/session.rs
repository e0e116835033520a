use crate::adapters::tabular::CsvCompetenceLoader;
use crate::config::RunSettings;
use crate::core::mapper::{CompetenceMapper, GapAnalysis, MappingSummary};
use crate::core::samples::{sample_competences, sample_credentials};
use crate::domain::model::{CompetenceLevel, CompetenceRecord, CredentialRecord};
use crate::utils::error::Result;
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathwayStep {
    pub position: usize,
    pub average_level: f64,
    pub credential: CredentialRecord,
}

/// Everything one run produces, in a serializable shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub summary: MappingSummary,
    pub target_sector: String,
    pub held: Vec<String>,
    pub gaps: GapAnalysis,
    /// Missing competences that exist in the store, for display.
    pub missing_competences: Vec<CompetenceRecord>,
    pub starting_level: CompetenceLevel,
    pub pathway: Vec<PathwayStep>,
}

/// A populated mapper plus the question to ask it.
pub struct AnalysisSession {
    mapper: CompetenceMapper,
    settings: RunSettings,
}

impl AnalysisSession {
    pub fn new(mapper: CompetenceMapper, settings: RunSettings) -> Self {
        Self { mapper, settings }
    }

    /// Populates a mapper from samples, matrix files and configured
    /// credentials, in that order, so later sources overwrite earlier ids.
    pub fn from_settings(settings: RunSettings) -> Result<Self> {
        let mut mapper = CompetenceMapper::new();

        if settings.include_samples {
            mapper.load_from(&sample_competences())?;
            for credential in sample_credentials() {
                mapper.add_credential(credential);
            }
        }

        for file in &settings.competence_files {
            mapper.load_from(&CsvCompetenceLoader::new(file))?;
        }

        for credential in &settings.credentials {
            mapper.add_credential(credential.clone());
        }

        tracing::info!(
            "Mapper ready: {} competences, {} credentials",
            mapper.competence_count(),
            mapper.credential_count()
        );

        Ok(Self::new(mapper, settings))
    }

    pub fn mapper(&self) -> &CompetenceMapper {
        &self.mapper
    }

    pub fn settings(&self) -> &RunSettings {
        &self.settings
    }

    pub fn run(&self) -> AnalysisReport {
        let summary = self.mapper.summary();
        let gaps = self.mapper.analyze_competence_gaps(
            self.settings.available.iter().cloned(),
            &self.settings.target_sector,
        );

        let missing_competences = gaps
            .missing
            .iter()
            .filter_map(|id| self.mapper.competence(id))
            .map(|c| c.to_record())
            .collect();

        let averages: HashMap<&str, f64> = self
            .mapper
            .credential_levels()
            .into_iter()
            .map(|(cred, avg)| (cred.id(), avg))
            .collect();

        let pathway = self
            .mapper
            .suggest_credential_pathway(self.settings.starting_level)
            .into_iter()
            .enumerate()
            .map(|(index, cred)| PathwayStep {
                position: index + 1,
                average_level: averages.get(cred.id()).copied().unwrap_or_default(),
                credential: cred.to_record(),
            })
            .collect();

        AnalysisReport {
            summary,
            target_sector: self.settings.target_sector.clone(),
            held: self.settings.available.clone(),
            gaps,
            missing_competences,
            starting_level: self.settings.starting_level,
            pathway,
        }
    }
}
