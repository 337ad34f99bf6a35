//! End-of-run summary printed to stdout

use std::fmt;
use std::path::Path;

use super::pipeline::RunReport;
use super::sample::RunStatistics;
use crate::constants::{MIN_SAMPLES_WARNING, RECOMMENDED_SAMPLES};

const RULE_WIDTH: usize = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetSize {
    TooSmall,
    Basic,
    Sufficient,
}

impl DatasetSize {
    pub fn classify(total: u64) -> Self {
        if total < MIN_SAMPLES_WARNING {
            DatasetSize::TooSmall
        } else if total < RECOMMENDED_SAMPLES {
            DatasetSize::Basic
        } else {
            DatasetSize::Sufficient
        }
    }

    fn advice(&self) -> String {
        match self {
            DatasetSize::TooSmall => format!(
                "⚠️  Warning: You have fewer than {} samples.\n   Consider collecting more samples before packing.",
                MIN_SAMPLES_WARNING
            ),
            DatasetSize::Basic => format!(
                "✓ Good start! You have enough for basic testing.\n  For better results, aim for {}-100 samples total.",
                RECOMMENDED_SAMPLES
            ),
            DatasetSize::Sufficient => "✓ Excellent! You have enough samples for proper training.".to_string(),
        }
    }
}

pub struct RunSummary<'a> {
    stats: &'a RunStatistics,
    output_dir: &'a Path,
}

impl<'a> RunSummary<'a> {
    pub fn new(stats: &'a RunStatistics, output_dir: &'a Path) -> Self {
        Self { stats, output_dir }
    }

    pub fn from_report(report: &'a RunReport) -> Self {
        Self::new(&report.stats, &report.output_dir)
    }
}

impl fmt::Display for RunSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(RULE_WIDTH);
        let total = self.stats.total_accepted();

        writeln!(f, "{}", rule)?;
        writeln!(f, "Organization Summary")?;
        writeln!(f, "{}", rule)?;
        writeln!(f, "Malicious samples organized: {}", self.stats.malicious)?;
        writeln!(f, "Benign samples organized: {}", self.stats.benign)?;
        writeln!(f, "Duplicates skipped: {}", self.stats.duplicates)?;
        writeln!(f, "Errors encountered: {}", self.stats.errors)?;
        writeln!(f, "Total samples: {}", total)?;
        writeln!(f, "{}", rule)?;
        writeln!(f)?;
        writeln!(f, "{}", DatasetSize::classify(total).advice())?;
        writeln!(f)?;
        write!(f, "📁 Dataset location: {}", absolute(self.output_dir).display())
    }
}

fn absolute(path: &Path) -> std::borrow::Cow<'_, Path> {
    match std::env::current_dir() {
        Ok(cwd) if path.is_relative() => cwd.join(path).into(),
        _ => path.into(),
    }
}
