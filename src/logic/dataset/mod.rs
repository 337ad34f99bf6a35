//! Dataset Module - Metadata record for the organized dataset
//!
//! One JSON record per run at `metadata/dataset_info.json`, replaced
//! atomically. Carries the run statistics next to a fresh count of what is
//! actually on disk under `original/<label>`.

pub mod record;
pub mod writer;


pub use record::DatasetMetadataRecord;
pub use writer::{write_metadata, MetadataError};

#[cfg(test)]
pub use writer::read_metadata;
