use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};

use crate::logic::dataset::record::DatasetMetadataRecord;
use crate::logic::layout::DestinationLayout;
use crate::logic::sample::{Label, RunStatistics};

#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    #[error("IO Error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Serialization Error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to replace {}: {source}", .path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

fn io_at(path: &Path) -> impl FnOnce(io::Error) -> MetadataError + '_ {
    move |source| MetadataError::Io { path: path.to_path_buf(), source }
}

/// Recount `original/<label>`, build the record and atomically replace
/// `metadata/dataset_info.json` with it
pub fn write_metadata(
    layout: &DestinationLayout,
    stats: &RunStatistics,
    structure: &str,
    extension: &str,
) -> Result<DatasetMetadataRecord, MetadataError> {
    let malicious_dir = layout.original_dir(Label::Malicious);
    let benign_dir = layout.original_dir(Label::Benign);

    let record = DatasetMetadataRecord {
        created: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
        structure: structure.to_string(),
        statistics: *stats,
        malicious_count: count_samples(&malicious_dir, extension).map_err(io_at(&malicious_dir))?,
        benign_count: count_samples(&benign_dir, extension).map_err(io_at(&benign_dir))?,
    };

    for label in record.divergent_labels() {
        log::info!(
            "{} on disk: {} files, accepted this run: {}",
            label,
            record.on_disk_count(label),
            stats.accepted(label)
        );
    }

    let target = layout.metadata_file();
    persist_json(&record, &target)?;

    log::info!("Metadata saved to: {}", target.display());
    Ok(record)
}

/// Load a previously written record
#[cfg(test)]
pub fn read_metadata(path: &Path) -> Result<DatasetMetadataRecord, MetadataError> {
    let data = fs::read(path).map_err(io_at(path))?;
    Ok(serde_json::from_slice(&data)?)
}

/// Regular files carrying `extension` directly in `dir`; a missing dir is 0
fn count_samples(dir: &Path, extension: &str) -> io::Result<u64> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
        Err(e) => return Err(e),
    };

    let mut count = 0;
    for entry in entries {
        let path = entry?.path();
        if path.extension().map_or(false, |e| e == extension) && path.is_file() {
            count += 1;
        }
    }
    Ok(count)
}

/// Write to a temp file beside `target`, sync, then rename over it
fn persist_json(record: &DatasetMetadataRecord, target: &Path) -> Result<(), MetadataError> {
    let dir = target.parent().unwrap_or_else(|| Path::new("."));
    let json = serde_json::to_vec_pretty(record)?;

    let mut tmp = tempfile::Builder::new()
        .prefix(".dataset_info-")
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(io_at(dir))?;

    tmp.write_all(&json).map_err(io_at(dir))?;
    tmp.as_file().sync_all().map_err(io_at(target))?;

    tmp.persist(target).map_err(|e| MetadataError::Persist {
        path: target.to_path_buf(),
        source: e.error,
    })?;
    Ok(())
}
