// Adapters layer: concrete sources feeding the mapper from outside data.

pub mod tabular;

pub use tabular::{load_competence_matrix, CsvCompetenceLoader, TabularFormat};
