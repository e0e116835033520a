use crate::app::session::AnalysisReport;
use crate::core::mapper::CompetenceMapper;
use crate::utils::error::Result;
use std::fmt;

const RULE_WIDTH: usize = 70;

/// Human-readable rendering of a run, listing the mapper contents first.
pub struct TextReport<'a> {
    mapper: &'a CompetenceMapper,
    report: &'a AnalysisReport,
}

impl<'a> TextReport<'a> {
    pub fn new(mapper: &'a CompetenceMapper, report: &'a AnalysisReport) -> Self {
        Self { mapper, report }
    }
}

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(RULE_WIDTH);
        let report = self.report;
        let summary = &report.summary;

        writeln!(f, "{}", rule)?;
        writeln!(f, "MORSKAMARY: Blue Sociology Competence Mapping")?;
        writeln!(f, "{}", rule)?;
        writeln!(f)?;

        writeln!(f, "[1] Competences:")?;
        for c in self.mapper.competences() {
            writeln!(f, "    - {} ({} axis, {})", c.name(), c.axis(), c.level())?;
        }
        writeln!(f)?;

        writeln!(f, "[2] Micro-credentials:")?;
        for cred in self.mapper.credentials() {
            writeln!(f, "    - {} ({} sector)", cred.title(), cred.sector())?;
        }
        writeln!(f)?;

        writeln!(f, "[3] Competence Mapping Summary:")?;
        writeln!(f, "    Total competences: {}", summary.total_competences)?;
        writeln!(f, "    Total credentials: {}", summary.total_credentials)?;
        writeln!(f, "    Competences by TMBD axis:")?;
        for (axis, count) in &summary.competences_by_axis {
            writeln!(f, "      - {}: {}", axis, count)?;
        }
        writeln!(f, "    Competences by level:")?;
        for (level, count) in &summary.competences_by_level {
            writeln!(f, "      - {}: {}", level, count)?;
        }
        let sectors: Vec<&str> = summary.sectors.iter().map(String::as_str).collect();
        writeln!(f, "    Sectors: {}", sectors.join(", "))?;
        writeln!(f)?;

        writeln!(f, "[4] Competence Gap Analysis:")?;
        writeln!(f, "    User has: {:?}", report.held)?;
        writeln!(f, "    Target sector: {}", report.target_sector)?;
        if report.gaps.missing.is_empty() {
            writeln!(f, "    No missing competences")?;
        } else {
            writeln!(f, "    Missing competences:")?;
            for missing in &report.missing_competences {
                writeln!(f, "      - {} ({})", missing.name, missing.level)?;
            }
            let unresolved = report
                .gaps
                .missing
                .iter()
                .filter(|id| !self.mapper.contains_competence(id))
                .count();
            if unresolved > 0 {
                writeln!(f, "      - {} referenced but undefined", unresolved)?;
            }
        }
        writeln!(f)?;

        writeln!(f, "[5] Suggested Micro-Credential Pathway:")?;
        for step in &report.pathway {
            writeln!(f, "    {}. {}", step.position, step.credential.title)?;
            writeln!(f, "       Sector: {}", step.credential.sector)?;
            writeln!(f, "       Description: {}", step.credential.description)?;
            writeln!(f, "       Average level: {:.2}", step.average_level)?;
        }
        writeln!(f)?;
        write!(f, "{}", rule)
    }
}

pub fn render_json(report: &AnalysisReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}
