use anyhow::Result;
use morskamary::config::toml_config::MappingConfig;
use morskamary::utils::validation::Validate;
use morskamary::{
    load_competence_matrix, AnalysisSession, BlueDynamicsAxis, CompetenceLevel, CompetenceMapper,
    CsvCompetenceLoader, MappingError, RunSettings,
};
use tempfile::TempDir;

const PORTS_MATRIX: &str = "\
id,name,description,axis,level,keywords
comp_port_001,Berth Planning,Scheduling berth allocation,T,FOUNDATIONAL,ports;scheduling
comp_port_002,Cargo Safety,Dangerous goods handling,MARITIME,ADVANCED,safety; cargo ;
comp_port_003,Harbour Ecology,Water quality around terminals,M,INTERMEDIATE,
";

fn write_file(dir: &TempDir, name: &str, content: &str) -> Result<String> {
    let path = dir.path().join(name);
    std::fs::write(&path, content)?;
    Ok(path.to_string_lossy().into_owned())
}

#[test]
fn test_load_csv_matrix() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = write_file(&temp_dir, "ports.csv", PORTS_MATRIX)?;

    let competences = load_competence_matrix(&path)?;

    assert_eq!(competences.len(), 3);
    assert_eq!(competences[0].axis(), BlueDynamicsAxis::Maritime);
    assert_eq!(competences[1].level(), CompetenceLevel::Advanced);
    assert_eq!(competences[1].keywords(), ["safety", "cargo"]);
    assert_eq!(competences[2].axis(), BlueDynamicsAxis::Marine);
    assert!(competences[2].keywords().is_empty());
    Ok(())
}

#[test]
fn test_load_tsv_matrix() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let tsv = PORTS_MATRIX.replace(',', "\t");
    let path = write_file(&temp_dir, "ports.tsv", &tsv)?;

    let competences = load_competence_matrix(&path)?;
    assert_eq!(competences.len(), 3);
    assert_eq!(competences[0].name(), "Berth Planning");
    Ok(())
}

#[test]
fn test_spreadsheet_reports_missing_dependency() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = write_file(&temp_dir, "ports.xlsx", "not really a workbook")?;

    let err = load_competence_matrix(&path).unwrap_err();
    match &err {
        MappingError::MissingDependency { format, hint } => {
            assert_eq!(format, "xlsx");
            assert!(hint.contains("CSV"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
    Ok(())
}

#[test]
fn test_unsupported_extension() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = write_file(&temp_dir, "ports.json", "[]")?;

    assert!(matches!(
        load_competence_matrix(&path),
        Err(MappingError::UnsupportedFormat { .. })
    ));
    Ok(())
}

#[test]
fn test_bad_row_leaves_mapper_unchanged() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let bad = format!("{}comp_port_004,Pilotage,,Q,EXPERT,\n", PORTS_MATRIX);
    let path = write_file(&temp_dir, "broken.csv", &bad)?;

    let mut mapper = CompetenceMapper::new();
    let err = mapper.load_from(&CsvCompetenceLoader::new(&path)).unwrap_err();

    match err {
        MappingError::InvalidRow { row, source, .. } => {
            assert_eq!(row, 4);
            assert!(matches!(*source, MappingError::UnknownAxis { .. }));
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(mapper.competence_count(), 0);
    Ok(())
}

#[test]
fn test_config_driven_session() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let matrix_path = write_file(&temp_dir, "ports.csv", PORTS_MATRIX)?;
    let normalized_path = matrix_path.replace('\\', "/");

    let config_content = format!(
        r#"
[mapping]
name = "ports-demo"

[sources]
competence_files = ["{}"]
include_samples = false

[[credentials]]
id = "cred_ports_001"
title = "Port Operations Foundation"
competences = ["comp_port_001", "comp_port_003"]
description = "Entry credential for terminal staff"
sector = "ports"

[[credentials]]
id = "cred_ports_002"
title = "Port Safety Lead"
competences = ["comp_port_002", "comp_port_404"]
sector = "Ports"

[analysis]
available = ["comp_port_001"]
target_sector = "PORTS"
"#,
        normalized_path
    );
    let config_path = write_file(&temp_dir, "ports.toml", &config_content)?;

    let config = MappingConfig::from_file(&config_path)?;
    config.validate()?;
    let settings = RunSettings::from_config(&config)?;
    let session = AnalysisSession::from_settings(settings)?;
    let report = session.run();

    assert_eq!(report.summary.total_competences, 3);
    assert_eq!(report.summary.sectors.len(), 2);
    assert_eq!(report.gaps.available.len(), 1);
    assert_eq!(report.gaps.missing.len(), 3);
    assert!(report.gaps.missing.contains("comp_port_404"));
    assert_eq!(report.missing_competences.len(), 2);

    // (1 + 2) / 2 = 1.5 for both; the undefined comp_port_404 still counts,
    // so the safety credential ties and keeps its later position
    let averages: Vec<f64> = report.pathway.iter().map(|step| step.average_level).collect();
    assert_eq!(averages, vec![1.5, 1.5]);
    let order: Vec<&str> = report
        .pathway
        .iter()
        .map(|step| step.credential.id.as_str())
        .collect();
    assert_eq!(order, vec!["cred_ports_001", "cred_ports_002"]);
    Ok(())
}
