use crate::domain::model::Competence;
use crate::utils::error::Result;

/// Anything able to produce a full batch of competences, e.g. a tabular file.
///
/// Implementations return every competence or an error; partial batches are
/// never handed to the mapper.
pub trait CompetenceSource {
    fn describe(&self) -> String;
    fn load_competences(&self) -> Result<Vec<Competence>>;
}

impl CompetenceSource for Vec<Competence> {
    fn describe(&self) -> String {
        format!("{} in-memory competences", self.len())
    }

    fn load_competences(&self) -> Result<Vec<Competence>> {
        Ok(self.clone())
    }
}
