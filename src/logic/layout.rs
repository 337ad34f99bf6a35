//! Destination Layout
//!
//! Fixed directory taxonomy under the dataset output root:
//!
//! ```text
//! <root>/original/{malicious,benign}/
//! <root>/packed/<variant>/{malicious,benign}/
//! <root>/labels/
//! <root>/metadata/
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::sample::Label;
use crate::constants::METADATA_FILE;

const ORIGINAL_DIR: &str = "original";
const PACKED_DIR: &str = "packed";
const LABELS_DIR: &str = "labels";
const METADATA_DIR: &str = "metadata";

/// A taxonomy directory could not be created
#[derive(Debug, thiserror::Error)]
#[error("failed to create directory {}: {source}", .path.display())]
pub struct LayoutError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

#[derive(Debug, Clone)]
pub struct DestinationLayout {
    root: PathBuf,
    packed_variants: Vec<String>,
}

impl DestinationLayout {
    pub fn new(root: impl Into<PathBuf>, packed_variants: Vec<String>) -> Self {
        Self {
            root: root.into(),
            packed_variants,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Accepted raw samples for `label`
    pub fn original_dir(&self, label: Label) -> PathBuf {
        self.root.join(ORIGINAL_DIR).join(label.as_str())
    }

    /// Reserved tree for a packed variant
    pub fn packed_dir(&self, variant: &str, label: Label) -> PathBuf {
        self.root.join(PACKED_DIR).join(variant).join(label.as_str())
    }

    pub fn labels_dir(&self) -> PathBuf {
        self.root.join(LABELS_DIR)
    }

    pub fn metadata_dir(&self) -> PathBuf {
        self.root.join(METADATA_DIR)
    }

    pub fn metadata_file(&self) -> PathBuf {
        self.metadata_dir().join(METADATA_FILE)
    }

    /// Every directory of the taxonomy, parents implied
    pub fn directories(&self) -> Vec<PathBuf> {
        let mut dirs: Vec<PathBuf> = Label::ALL.iter().map(|l| self.original_dir(*l)).collect();

        for variant in &self.packed_variants {
            for label in Label::ALL {
                dirs.push(self.packed_dir(variant, label));
            }
        }

        dirs.push(self.labels_dir());
        dirs.push(self.metadata_dir());
        dirs
    }

    /// Create the full taxonomy. Existing directories are left alone.
    /// Fails on the first directory that cannot be created.
    pub fn bootstrap(&self) -> Result<(), LayoutError> {
        log::info!("Creating directory structure under {}", self.root.display());

        for dir in self.directories() {
            fs::create_dir_all(&dir).map_err(|source| LayoutError { path: dir.clone(), source })?;
        }

        log::debug!("Directory structure ready");
        Ok(())
    }
}
