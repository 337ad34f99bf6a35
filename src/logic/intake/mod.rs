//! File Intake Module
//!
//! Moves one labeled source directory into `original/<label>`:
//! discover candidates, check the `MZ` header, hash, drop duplicates seen
//! earlier in the same call, copy the rest under
//! `<label>_<digest16>_<original name>`.
//!
//! Every per-file failure is folded into `RunStatistics::errors`; nothing
//! short of a missing source directory stops the pass.

pub mod copy;

#[cfg(test)]
mod tests;

use std::collections::HashSet;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use super::layout::DestinationLayout;
use super::sample::{hasher, signature, Label, RunStatistics, SampleOutcome, SampleRecord};
use super::sample::types::SampleError;

/// How far an intake call got
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntakeStatus {
    /// Source path does not exist or is not a directory
    SourceMissing,
    /// Source directory could not be listed
    SourceUnreadable { reason: String },
    /// Directory listed, but no file with the target extension
    NoCandidates,
    Processed { candidates: usize },
}

/// Result of one `FileIntake::intake` call
#[derive(Debug, Clone)]
pub struct IntakeReport {
    pub label: Label,
    pub source: PathBuf,
    pub status: IntakeStatus,
    /// Statistics passed in, updated with this call's outcomes
    pub stats: RunStatistics,
    pub samples: Vec<SampleRecord>,
}

impl IntakeReport {
    pub fn accepted(&self) -> impl Iterator<Item = &SampleRecord> {
        self.samples
            .iter()
            .filter(|s| matches!(s.outcome, SampleOutcome::Accepted { .. }))
    }
}

pub struct FileIntake<'a> {
    layout: &'a DestinationLayout,
    extension: &'a str,
}

impl<'a> FileIntake<'a> {
    pub fn new(layout: &'a DestinationLayout, extension: &'a str) -> Self {
        Self { layout, extension }
    }

    /// Organize every candidate in `source_dir` under `label`.
    /// `stats` is returned inside the report with this call's counts added.
    pub fn intake(&self, source_dir: &Path, label: Label, mut stats: RunStatistics) -> IntakeReport {
        let mut report = IntakeReport {
            label,
            source: source_dir.to_path_buf(),
            status: IntakeStatus::SourceMissing,
            stats,
            samples: Vec::new(),
        };

        if !source_dir.is_dir() {
            log::warn!("Source directory not found: {}", source_dir.display());
            return report;
        }

        log::info!("Organizing {} samples from: {}", label, source_dir.display());

        let candidates = match self.discover(source_dir) {
            Ok(c) => c,
            Err(e) => {
                log::error!("Cannot list {}: {}", source_dir.display(), e);
                report.status = IntakeStatus::SourceUnreadable { reason: e.to_string() };
                return report;
            }
        };

        if candidates.is_empty() {
            log::info!("  No .{} files found in {}", self.extension, source_dir.display());
            report.status = IntakeStatus::NoCandidates;
            return report;
        }

        let dest_dir = self.layout.original_dir(label);
        let total = candidates.len();
        let mut seen: HashSet<String> = HashSet::new();

        for (idx, path) in candidates.into_iter().enumerate() {
            let progress = format!("[{}/{}]", idx + 1, total);
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();

            let outcome = self
                .process(&path, label, &dest_dir, &mut seen)
                .unwrap_or_else(|e| SampleOutcome::Failed { reason: e.to_string() });

            match &outcome {
                SampleOutcome::Accepted { destination, .. } => {
                    stats.record_accepted(label);
                    log::info!("  {} ✓ {}", progress, display_name(destination));
                }
                SampleOutcome::Duplicate { .. } => {
                    stats.record_duplicate();
                    log::info!("  {} ⊙ Duplicate: {}", progress, file_name);
                }
                SampleOutcome::Rejected { reason } => {
                    stats.record_error();
                    log::warn!("  {} ✗ {}: {}", progress, reason, file_name);
                }
                SampleOutcome::Failed { reason } => {
                    stats.record_error();
                    log::warn!("  {} ✗ Error processing {}: {}", progress, file_name, reason);
                }
            }

            report.samples.push(SampleRecord { source: path, file_name, outcome });
        }

        report.status = IntakeStatus::Processed { candidates: total };
        report.stats = stats;
        report
    }

    /// Regular files with the target extension directly inside `dir`,
    /// sorted by name so the surviving duplicate is the same everywhere.
    fn discover(&self, dir: &Path) -> std::io::Result<Vec<PathBuf>> {
        let entries = fs::read_dir(dir)?.map(|res| res.map(|e| e.path()));
        let mut paths: Vec<PathBuf> = readable_entries(dir, entries)
            .into_iter()
            .filter(|p| p.extension().map_or(false, |ext| ext == self.extension))
            .filter(|p| p.is_file())
            .collect();

        paths.sort();
        Ok(paths)
    }

    fn process(
        &self,
        path: &Path,
        label: Label,
        dest_dir: &Path,
        seen: &mut HashSet<String>,
    ) -> Result<SampleOutcome, SampleError> {
        let check = signature::check_file(path);
        if !check.is_valid() {
            return Ok(SampleOutcome::Rejected {
                reason: check.reason().unwrap_or_default(),
            });
        }

        let digest = hasher::hash_file(path).map_err(|source| SampleError::Hash {
            path: path.to_path_buf(),
            source,
        })?;

        if seen.contains(&digest) {
            return Ok(SampleOutcome::Duplicate { digest });
        }
        seen.insert(digest.clone());

        let destination = dest_dir.join(destination_name(label, &digest, path));
        copy::copy_sample(path, &destination).map_err(|source| SampleError::Copy {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(SampleOutcome::Accepted { digest, destination })
    }
}

/// `<label>_<digest16>_<original file name>`
pub fn destination_name(label: Label, digest: &str, source: &Path) -> OsString {
    let mut name = OsString::from(format!("{}_{}_", label, hasher::digest_prefix(digest)));
    if let Some(original) = source.file_name() {
        name.push(original);
    }
    name
}

/// Listing entries that could be read; the rest are logged and skipped
fn readable_entries<I>(dir: &Path, entries: I) -> Vec<PathBuf>
where
    I: Iterator<Item = std::io::Result<PathBuf>>,
{
    entries
        .filter_map(|res| match res {
            Ok(path) => Some(path),
            Err(e) => {
                log::warn!("Skipping unreadable entry in {}: {}", dir.display(), e);
                None
            }
        })
        .collect()
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
