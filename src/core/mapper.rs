use crate::domain::model::{BlueDynamicsAxis, Competence, CompetenceLevel, MicroCredential};
use crate::domain::ports::CompetenceSource;
use crate::utils::error::Result;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Insertion-ordered id index. Re-inserting an id replaces the value but
/// keeps its original position.
#[derive(Debug, Clone)]
struct OrderedIndex<T> {
    positions: HashMap<String, usize>,
    entries: Vec<T>,
}

impl<T> Default for OrderedIndex<T> {
    fn default() -> Self {
        Self {
            positions: HashMap::new(),
            entries: Vec::new(),
        }
    }
}

impl<T> OrderedIndex<T> {
    /// Returns true when an existing entry was replaced.
    fn upsert(&mut self, id: &str, value: T) -> bool {
        match self.positions.get(id) {
            Some(&pos) => {
                self.entries[pos] = value;
                true
            }
            None => {
                self.positions.insert(id.to_string(), self.entries.len());
                self.entries.push(value);
                false
            }
        }
    }

    fn get(&self, id: &str) -> Option<&T> {
        self.positions.get(id).map(|&pos| &self.entries[pos])
    }

    fn contains(&self, id: &str) -> bool {
        self.positions.contains_key(id)
    }

    fn iter(&self) -> std::slice::Iter<'_, T> {
        self.entries.iter()
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Result of [`CompetenceMapper::analyze_competence_gaps`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GapAnalysis {
    /// Held competences that the sector actually requires.
    pub available: BTreeSet<String>,
    /// Required competences not held, including ids no competence was registered for.
    pub missing: BTreeSet<String>,
    /// Missing ids that resolve to a stored competence, grouped by level.
    /// Levels without missing ids are absent.
    pub by_level: BTreeMap<CompetenceLevel, Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MappingSummary {
    pub total_competences: usize,
    pub total_credentials: usize,
    pub competences_by_axis: BTreeMap<BlueDynamicsAxis, usize>,
    pub competences_by_level: BTreeMap<CompetenceLevel, usize>,
    /// Raw sector strings, deduplicated by exact match. Unlike
    /// [`CompetenceMapper::sector_competences`], case is significant here.
    pub sectors: BTreeSet<String>,
}

/// In-memory index of competences and micro-credentials.
///
/// Both stores are keyed by id with last-write-wins semantics: adding an
/// entity whose id is already present overwrites the stored one and never
/// fails. Iteration follows first-insertion order.
#[derive(Debug, Clone, Default)]
pub struct CompetenceMapper {
    competences: OrderedIndex<Competence>,
    credentials: OrderedIndex<MicroCredential>,
}

impl CompetenceMapper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_competence(&mut self, competence: Competence) {
        let id = competence.id().to_string();
        if self.competences.upsert(&id, competence) {
            tracing::debug!("Competence '{}' overwritten", id);
        } else {
            tracing::trace!("Competence '{}' added", id);
        }
    }

    pub fn add_credential(&mut self, credential: MicroCredential) {
        let id = credential.id().to_string();
        if self.credentials.upsert(&id, credential) {
            tracing::debug!("Credential '{}' overwritten", id);
        } else {
            tracing::trace!("Credential '{}' added", id);
        }
    }

    /// Reads the whole batch first, so a failing source leaves the mapper untouched.
    pub fn load_from<S: CompetenceSource + ?Sized>(&mut self, source: &S) -> Result<usize> {
        let batch = source.load_competences()?;
        let count = batch.len();
        for competence in batch {
            self.add_competence(competence);
        }
        tracing::info!("Loaded {} competences from {}", count, source.describe());
        Ok(count)
    }

    pub fn competence(&self, id: &str) -> Option<&Competence> {
        self.competences.get(id)
    }

    pub fn credential(&self, id: &str) -> Option<&MicroCredential> {
        self.credentials.get(id)
    }

    pub fn contains_competence(&self, id: &str) -> bool {
        self.competences.contains(id)
    }

    pub fn competences(&self) -> impl Iterator<Item = &Competence> {
        self.competences.iter()
    }

    pub fn credentials(&self) -> impl Iterator<Item = &MicroCredential> {
        self.credentials.iter()
    }

    pub fn competence_count(&self) -> usize {
        self.competences.len()
    }

    pub fn credential_count(&self) -> usize {
        self.credentials.len()
    }

    pub fn competences_by_axis(&self, axis: BlueDynamicsAxis) -> Vec<&Competence> {
        self.competences().filter(|c| c.axis() == axis).collect()
    }

    pub fn competences_by_level(&self, level: CompetenceLevel) -> Vec<&Competence> {
        self.competences().filter(|c| c.level() == level).collect()
    }

    /// Union of competence ids referenced by every credential whose sector
    /// matches `sector`, ignoring case.
    pub fn sector_competences(&self, sector: &str) -> BTreeSet<String> {
        self.credentials()
            .filter(|cred| cred.serves_sector(sector))
            .flat_map(|cred| cred.competences().iter().cloned())
            .collect()
    }

    pub fn analyze_competence_gaps<I, S>(&self, available: I, required_sector: &str) -> GapAnalysis
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let required = self.sector_competences(required_sector);
        let held: BTreeSet<String> = available.into_iter().map(Into::into).collect();

        let available: BTreeSet<String> = held.intersection(&required).cloned().collect();
        let missing: BTreeSet<String> = required.difference(&held).cloned().collect();

        let mut by_level: BTreeMap<CompetenceLevel, Vec<String>> = BTreeMap::new();
        for id in &missing {
            // dangling ids stay in `missing` but have no level to report
            if let Some(competence) = self.competence(id) {
                by_level
                    .entry(competence.level())
                    .or_default()
                    .push(id.clone());
            }
        }

        tracing::debug!(
            "Gap analysis for '{}': {} required, {} available, {} missing",
            required_sector,
            required.len(),
            available.len(),
            missing.len()
        );

        GapAnalysis {
            available,
            missing,
            by_level,
        }
    }

    /// Average level rank per credential, in credential insertion order.
    ///
    /// Only competences present in the store add to the sum, but every
    /// referenced id counts in the denominator (at least 1), so dangling ids
    /// pull the average down and a credential with none resolvable averages 0.
    pub fn credential_levels(&self) -> Vec<(&MicroCredential, f64)> {
        self.credentials()
            .map(|cred| {
                let total: u32 = cred
                    .competences()
                    .iter()
                    .filter_map(|id| self.competence(id))
                    .map(|c| u32::from(c.level().rank()))
                    .sum();
                let average = f64::from(total) / cred.competences().len().max(1) as f64;
                (cred, average)
            })
            .collect()
    }

    /// Every stored credential ordered by ascending average level; ties keep
    /// insertion order.
    ///
    /// `_starting_level` is accepted for callers that plan to filter by entry
    /// level but does not affect the ordering yet.
    pub fn suggest_credential_pathway(
        &self,
        _starting_level: CompetenceLevel,
    ) -> Vec<&MicroCredential> {
        let mut levels = self.credential_levels();
        levels.sort_by(|a, b| a.1.total_cmp(&b.1));
        levels.into_iter().map(|(cred, _)| cred).collect()
    }

    pub fn summary(&self) -> MappingSummary {
        let competences_by_axis = BlueDynamicsAxis::ALL
            .into_iter()
            .map(|axis| (axis, self.competences_by_axis(axis).len()))
            .collect();

        let competences_by_level = CompetenceLevel::ALL
            .into_iter()
            .map(|level| (level, self.competences_by_level(level).len()))
            .collect();

        let sectors = self
            .credentials()
            .map(|cred| cred.sector().to_string())
            .collect();

        MappingSummary {
            total_competences: self.competence_count(),
            total_credentials: self.credential_count(),
            competences_by_axis,
            competences_by_level,
            sectors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::MappingError;

    fn competence(id: &str, axis: BlueDynamicsAxis, level: CompetenceLevel) -> Competence {
        Competence::new(id, format!("{} name", id), "", axis, level, vec![])
    }

    fn credential(id: &str, competences: &[&str], sector: &str) -> MicroCredential {
        MicroCredential::new(
            id,
            format!("{} title", id),
            competences.iter().map(|c| c.to_string()).collect(),
            "",
            sector,
        )
    }

    struct FailingSource;

    impl CompetenceSource for FailingSource {
        fn describe(&self) -> String {
            "failing source".to_string()
        }

        fn load_competences(&self) -> Result<Vec<Competence>> {
            Err(MappingError::UnknownAxis {
                value: "Z".to_string(),
            })
        }
    }

    #[test]
    fn test_overwrite_keeps_position_and_size() {
        let mut mapper = CompetenceMapper::new();
        mapper.add_competence(competence("a", BlueDynamicsAxis::Marine, CompetenceLevel::Expert));
        mapper.add_competence(competence("b", BlueDynamicsAxis::Marine, CompetenceLevel::Expert));
        mapper.add_competence(competence("a", BlueDynamicsAxis::Oceanic, CompetenceLevel::Foundational));

        assert_eq!(mapper.competence_count(), 2);
        let ids: Vec<&str> = mapper.competences().map(|c| c.id()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(mapper.competence("a").unwrap().axis(), BlueDynamicsAxis::Oceanic);
        assert!(mapper.contains_competence("b"));
        assert!(!mapper.contains_competence("c"));
    }

    #[test]
    fn test_credential_overwrite() {
        let mut mapper = CompetenceMapper::new();
        mapper.add_credential(credential("c", &["x"], "ports"));
        mapper.add_credential(credential("c", &["y"], "tourism"));
        assert_eq!(mapper.credential_count(), 1);
        assert_eq!(mapper.credential("c").unwrap().sector(), "tourism");
    }

    #[test]
    fn test_by_level_skips_dangling_and_empty_levels() {
        let mut mapper = CompetenceMapper::new();
        mapper.add_competence(competence("known", BlueDynamicsAxis::Marine, CompetenceLevel::Expert));
        mapper.add_credential(credential("c", &["known", "ghost"], "ports"));

        let gaps = mapper.analyze_competence_gaps(Vec::<String>::new(), "Ports");
        assert!(gaps.missing.contains("ghost"));
        assert!(gaps.missing.contains("known"));
        assert_eq!(gaps.by_level.len(), 1);
        assert_eq!(gaps.by_level[&CompetenceLevel::Expert], vec!["known".to_string()]);
    }

    #[test]
    fn test_available_is_restricted_to_required() {
        let mut mapper = CompetenceMapper::new();
        mapper.add_credential(credential("c", &["a", "b"], "ports"));
        let gaps = mapper.analyze_competence_gaps(["a", "unrelated"], "ports");
        assert_eq!(gaps.available, BTreeSet::from(["a".to_string()]));
        assert_eq!(gaps.missing, BTreeSet::from(["b".to_string()]));
    }

    #[test]
    fn test_credential_without_resolvable_competences_averages_zero() {
        let mut mapper = CompetenceMapper::new();
        mapper.add_competence(competence("a", BlueDynamicsAxis::Marine, CompetenceLevel::Foundational));
        mapper.add_credential(credential("basic", &["a"], "ports"));
        mapper.add_credential(credential("empty", &[], "ports"));
        mapper.add_credential(credential("dangling", &["ghost"], "ports"));

        let levels: Vec<(&str, f64)> = mapper
            .credential_levels()
            .into_iter()
            .map(|(cred, avg)| (cred.id(), avg))
            .collect();
        assert_eq!(levels, vec![("basic", 1.0), ("empty", 0.0), ("dangling", 0.0)]);

        let pathway: Vec<&str> = mapper
            .suggest_credential_pathway(CompetenceLevel::Foundational)
            .into_iter()
            .map(|cred| cred.id())
            .collect();
        assert_eq!(pathway, vec!["empty", "dangling", "basic"]);
    }

    #[test]
    fn test_dangling_ids_count_towards_the_average() {
        let mut mapper = CompetenceMapper::new();
        mapper.add_competence(competence("a", BlueDynamicsAxis::Marine, CompetenceLevel::Intermediate));
        mapper.add_competence(competence("b", BlueDynamicsAxis::Oceanic, CompetenceLevel::Advanced));
        mapper.add_competence(competence("c", BlueDynamicsAxis::Oceanic, CompetenceLevel::Advanced));
        mapper.add_credential(credential("offshore", &["a", "b"], "offshore-energy"));
        mapper.add_credential(credential("governance", &["c"], "governance"));
        mapper.add_credential(credential("mixed", &["c", "ghost"], "governance"));

        let levels: Vec<(&str, f64)> = mapper
            .credential_levels()
            .into_iter()
            .map(|(cred, avg)| (cred.id(), avg))
            .collect();
        assert_eq!(levels, vec![("offshore", 2.5), ("governance", 3.0), ("mixed", 1.5)]);

        let pathway: Vec<&str> = mapper
            .suggest_credential_pathway(CompetenceLevel::Foundational)
            .into_iter()
            .map(|cred| cred.id())
            .collect();
        assert_eq!(pathway, vec!["mixed", "offshore", "governance"]);
    }

    #[test]
    fn test_pathway_ignores_starting_level() {
        let mut mapper = CompetenceMapper::new();
        mapper.add_competence(competence("a", BlueDynamicsAxis::Marine, CompetenceLevel::Expert));
        mapper.add_competence(competence("b", BlueDynamicsAxis::Marine, CompetenceLevel::Intermediate));
        mapper.add_credential(credential("hard", &["a"], "ports"));
        mapper.add_credential(credential("easy", &["b"], "ports"));

        let from_foundational = mapper.suggest_credential_pathway(CompetenceLevel::Foundational);
        let from_expert = mapper.suggest_credential_pathway(CompetenceLevel::Expert);
        assert_eq!(from_foundational, from_expert);
        assert_eq!(from_expert[0].id(), "easy");
    }

    #[test]
    fn test_summary_keeps_raw_sector_case() {
        let mut mapper = CompetenceMapper::new();
        mapper.add_credential(credential("a", &["x"], "Ports"));
        mapper.add_credential(credential("b", &["y"], "ports"));
        mapper.add_credential(credential("c", &[], "ports"));

        let summary = mapper.summary();
        assert_eq!(summary.sectors.len(), 2);
        assert_eq!(summary.total_credentials, 3);
        assert_eq!(
            mapper.sector_competences("PORTS"),
            BTreeSet::from(["x".to_string(), "y".to_string()])
        );
    }

    #[test]
    fn test_failed_load_leaves_mapper_untouched() {
        let mut mapper = CompetenceMapper::new();
        mapper.add_competence(competence("a", BlueDynamicsAxis::Marine, CompetenceLevel::Expert));
        assert!(mapper.load_from(&FailingSource).is_err());
        assert_eq!(mapper.competence_count(), 1);

        let batch = vec![competence("b", BlueDynamicsAxis::Oceanic, CompetenceLevel::Advanced)];
        assert_eq!(mapper.load_from(&batch).unwrap(), 1);
        assert_eq!(mapper.competence_count(), 2);
    }
}
