//! Built-in demonstration catalogue.

use crate::domain::model::{BlueDynamicsAxis, Competence, CompetenceLevel, MicroCredential};

fn strings(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

pub fn sample_competences() -> Vec<Competence> {
    vec![
        Competence::new(
            "comp_marine_001",
            "Marine Ecosystem Understanding",
            "Comprehensive understanding of marine biophysical systems, species interactions, and ecosystem dynamics",
            BlueDynamicsAxis::Marine,
            CompetenceLevel::Intermediate,
            strings(&["marine biology", "ecology", "biodiversity", "fisheries"]),
        ),
        Competence::new(
            "comp_maritime_001",
            "Maritime Infrastructure Management",
            "Management of ports, fleets, grids, and maritime spatial planning (MSP) infrastructure",
            BlueDynamicsAxis::Maritime,
            CompetenceLevel::Advanced,
            strings(&["ports", "maritime spatial planning", "infrastructure", "fleet management"]),
        ),
        Competence::new(
            "comp_oceanic_001",
            "Ocean Governance and Cooperation",
            "Cross-border ocean governance integration, hydrosocial literacy, and transcorporeal responsibility",
            BlueDynamicsAxis::Oceanic,
            CompetenceLevel::Advanced,
            strings(&["governance", "international cooperation", "policy", "sustainability"]),
        ),
    ]
}

pub fn sample_credentials() -> Vec<MicroCredential> {
    vec![
        MicroCredential::new(
            "cred_offshore_001",
            "Offshore Energy Operations Specialist",
            strings(&["comp_marine_001", "comp_maritime_001"]),
            "Micro-credential for professionals in offshore renewable energy",
            "offshore-energy",
        ),
        MicroCredential::new(
            "cred_ocean_gov_001",
            "Ocean Governance Practitioner",
            strings(&["comp_oceanic_001"]),
            "Micro-credential for ocean governance and policy professionals",
            "governance",
        ),
    ]
}

pub const SAMPLE_AVAILABLE: &[&str] = &["comp_marine_001"];
pub const SAMPLE_TARGET_SECTOR: &str = "offshore-energy";
