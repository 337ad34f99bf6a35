//! Pipeline Driver
//!
//! bootstrap layout -> intake per supplied label -> metadata record.
//! Owns the run statistics and threads them through each intake call.

use std::path::PathBuf;

use super::dataset::{self, DatasetMetadataRecord, MetadataError};
use super::intake::{FileIntake, IntakeReport};
use super::layout::{DestinationLayout, LayoutError};
use super::sample::{Label, RunStatistics};
use crate::config::Config;

/// Source directory per label; at least one must be set
#[derive(Debug, Clone, Default)]
pub struct SourceSet {
    pub malicious: Option<PathBuf>,
    pub benign: Option<PathBuf>,
}

impl SourceSet {
    pub fn get(&self, label: Label) -> Option<&PathBuf> {
        match label {
            Label::Malicious => self.malicious.as_ref(),
            Label::Benign => self.benign.as_ref(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.malicious.is_none() && self.benign.is_none()
    }
}

/// Conditions that stop the run before a dataset can be assembled
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("provide at least a malicious or a benign source directory")]
    NoSources,

    #[error(transparent)]
    Bootstrap(#[from] LayoutError),
}

/// Outcome of a completed run. Samples are already on disk by the time the
/// metadata is written, so a metadata failure is carried here instead of
/// discarding the statistics.
#[derive(Debug)]
pub struct RunReport {
    pub stats: RunStatistics,
    pub intakes: Vec<IntakeReport>,
    pub metadata: Result<DatasetMetadataRecord, MetadataError>,
    pub metadata_path: PathBuf,
    pub output_dir: PathBuf,
}

pub struct PipelineDriver {
    config: Config,
    layout: DestinationLayout,
}

impl PipelineDriver {
    pub fn new(config: Config) -> Self {
        let layout = DestinationLayout::new(config.output_dir.clone(), config.packed_variants.clone());
        Self { config, layout }
    }

    pub fn layout(&self) -> &DestinationLayout {
        &self.layout
    }

    pub fn run(&self, sources: &SourceSet) -> Result<RunReport, PipelineError> {
        if sources.is_empty() {
            return Err(PipelineError::NoSources);
        }

        self.layout.bootstrap()?;

        let intake = FileIntake::new(&self.layout, &self.config.extension);
        let mut stats = RunStatistics::default();
        let mut intakes = Vec::new();

        for label in Label::ALL {
            if let Some(source) = sources.get(label) {
                let report = intake.intake(source, label, stats);
                stats = report.stats;
                intakes.push(report);
            }
        }

        let metadata = dataset::write_metadata(
            &self.layout,
            &stats,
            &self.config.structure,
            &self.config.extension,
        );
        if let Err(e) = &metadata {
            log::error!("Failed to write dataset metadata: {}", e);
        }

        Ok(RunReport {
            stats,
            intakes,
            metadata,
            metadata_path: self.layout.metadata_file(),
            output_dir: self.layout.root().to_path_buf(),
        })
    }
}
