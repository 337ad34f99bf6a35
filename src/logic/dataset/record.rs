use serde::{Deserialize, Serialize};

use crate::logic::sample::{Label, RunStatistics};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DatasetMetadataRecord {
    /// ISO-8601 creation time
    pub created: String,

    /// Schema label
    pub structure: String,

    /// In-memory counters of the run that wrote this record
    pub statistics: RunStatistics,

    // Disk truth, recounted at write time
    pub malicious_count: u64,
    pub benign_count: u64,
}

impl DatasetMetadataRecord {
    pub fn on_disk_count(&self, label: Label) -> u64 {
        match label {
            Label::Malicious => self.malicious_count,
            Label::Benign => self.benign_count,
        }
    }

    /// Labels whose on-disk count differs from the accepted counter
    pub fn divergent_labels(&self) -> Vec<Label> {
        Label::ALL
            .into_iter()
            .filter(|l| self.on_disk_count(*l) != self.statistics.accepted(*l))
            .collect()
    }
}
