pub mod mapper;
pub mod samples;

pub use crate::domain::model::{
    BlueDynamicsAxis, Competence, CompetenceLevel, CompetenceRecord, CredentialRecord,
    MicroCredential,
};
pub use crate::domain::ports::CompetenceSource;
pub use crate::utils::error::Result;
