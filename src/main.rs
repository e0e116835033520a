use clap::Parser;
use morskamary::app::{render_json, AnalysisSession, TextReport};
use morskamary::utils::error::{ErrorSeverity, MappingError};
use morskamary::utils::logger;
use morskamary::{CliConfig, OutputFormat, RunSettings};

fn run(cli: &CliConfig) -> Result<String, MappingError> {
    let settings = RunSettings::from_cli(cli)?;
    tracing::debug!("Run settings: {:?}", settings);

    let session = AnalysisSession::from_settings(settings)?;
    let report = session.run();

    match session.settings().format {
        OutputFormat::Text => Ok(TextReport::new(session.mapper(), &report).to_string()),
        OutputFormat::Json => render_json(&report),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("🚀 Starting morskamary");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    match run(&cli) {
        Ok(output) => {
            println!("{}", output);
            Ok(())
        }
        Err(e) => {
            tracing::error!(
                "❌ Analysis failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            std::process::exit(exit_code);
        }
    }
}
