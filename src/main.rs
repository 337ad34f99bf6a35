//! Sample Intake - Main Entry Point
//!
//! Organizes malicious and benign executable collections into a
//! deduplicated, content-addressed dataset tree with a metadata record.

mod config;
mod logic;
pub mod constants;

use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgGroup, Parser};

use config::Config;
use logic::pipeline::{PipelineDriver, SourceSet};
use logic::summary::RunSummary;

#[derive(Parser, Debug)]
#[command(name = "sample-intake")]
#[command(version = constants::APP_VERSION)]
#[command(about = "Organize malicious and benign executable samples into a deduplicated dataset")]
#[command(after_help = "Examples:
  sample-intake --malicious ./malware_samples --output ./packhero-dataset
  sample-intake --benign ./benign_samples
  sample-intake --malicious ./malware --benign ./benign")]
#[command(group(ArgGroup::new("sources").args(["malicious", "benign"]).required(true).multiple(true)))]
struct Cli {
    /// Directory containing malicious executables
    #[arg(long, value_name = "DIR")]
    malicious: Option<PathBuf>,

    /// Directory containing benign executables
    #[arg(long, value_name = "DIR")]
    benign: Option<PathBuf>,

    /// Output base directory [default: packhero-dataset]
    #[arg(short, long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Candidate file extension [default: exe]
    #[arg(long, value_name = "EXT")]
    extension: Option<String>,

    /// Debug-level logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn into_parts(self, mut config: Config) -> (Config, SourceSet) {
        if let Some(output) = self.output {
            config.output_dir = output;
        }
        if let Some(ext) = self.extension {
            config.extension = ext.trim_start_matches('.').to_string();
        }

        let sources = SourceSet {
            malicious: self.malicious,
            benign: self.benign,
        };
        (config, sources)
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    dotenvy::dotenv().ok();
    let (config, sources) = cli.into_parts(Config::from_env());

    log::info!("Starting {} v{}", constants::APP_NAME, constants::APP_VERSION);
    log::debug!("Config: {:?}", config);

    let driver = PipelineDriver::new(config);
    let report = driver
        .run(&sources)
        .with_context(|| format!("dataset run failed for {}", driver.layout().root().display()))?;

    for intake in &report.intakes {
        log::info!(
            "{} from {}: {:?}, {} accepted",
            intake.label,
            intake.source.display(),
            intake.status,
            intake.accepted().count()
        );
        for sample in &intake.samples {
            log::debug!("  {} -> {:?}", sample.file_name, sample.outcome);
        }
    }

    println!();
    println!("{}", RunSummary::from_report(&report));
    let metadata = report
        .metadata
        .with_context(|| format!("failed to write {}", report.metadata_path.display()))?;
    println!(
        "📄 Metadata: {} (on disk: {} malicious, {} benign)",
        report.metadata_path.display(),
        metadata.malicious_count,
        metadata.benign_count
    );

    Ok(())
}
