use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

// ============================================================================
// LABEL
// ============================================================================

/// Classification assigned to a whole source directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    Malicious,
    Benign,
}

impl Label {
    pub const ALL: [Label; 2] = [Label::Malicious, Label::Benign];

    /// Directory / file-name form
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Malicious => "malicious",
            Label::Benign => "benign",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// RUN STATISTICS
// ============================================================================

/// Counters for one pipeline invocation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStatistics {
    pub malicious: u64,
    pub benign: u64,
    pub duplicates: u64,
    pub errors: u64,
}

impl RunStatistics {
    pub fn accepted(&self, label: Label) -> u64 {
        match label {
            Label::Malicious => self.malicious,
            Label::Benign => self.benign,
        }
    }

    pub fn total_accepted(&self) -> u64 {
        self.malicious + self.benign
    }

    pub(crate) fn record_accepted(&mut self, label: Label) {
        match label {
            Label::Malicious => self.malicious += 1,
            Label::Benign => self.benign += 1,
        }
    }

    pub(crate) fn record_duplicate(&mut self) {
        self.duplicates += 1;
    }

    pub(crate) fn record_error(&mut self) {
        self.errors += 1;
    }
}

// ============================================================================
// PER-FILE OUTCOME
// ============================================================================

/// What happened to one candidate file. Exactly one per processed file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SampleOutcome {
    /// Copied into `original/<label>`
    Accepted { digest: String, destination: PathBuf },
    /// Same content already accepted earlier in this intake call
    Duplicate { digest: String },
    /// Failed the structural signature check
    Rejected { reason: String },
    /// Hashing or copying failed
    Failed { reason: String },
}

/// A processed candidate and its outcome
#[derive(Debug, Clone)]
pub struct SampleRecord {
    pub source: PathBuf,
    pub file_name: String,
    pub outcome: SampleOutcome,
}

// ============================================================================
// ERRORS
// ============================================================================

/// Per-file failure, folded into the error counter by the caller
#[derive(Debug, thiserror::Error)]
pub enum SampleError {
    #[error("failed to hash {}: {source}", .path.display())]
    Hash {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to copy {}: {source}", .path.display())]
    Copy {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
