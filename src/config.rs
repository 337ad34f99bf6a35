//! Configuration module

use std::path::PathBuf;

use crate::constants;

/// Pipeline configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Dataset output root
    pub output_dir: PathBuf,

    /// Candidate file extension (no leading dot)
    pub extension: String,

    /// Reserved packed-variant directory names
    pub packed_variants: Vec<String>,

    /// Schema label stored in the metadata record
    pub structure: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            output_dir: PathBuf::from(constants::get_output_dir()),
            extension: constants::get_extension(),
            packed_variants: constants::get_packed_variants(),
            structure: constants::get_structure_label(),
        }
    }

    /// Defaults rooted at `output_dir`, ignoring the environment
    pub fn with_output(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            extension: constants::DEFAULT_EXTENSION.to_string(),
            packed_variants: constants::DEFAULT_PACKED_VARIANTS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            structure: constants::DEFAULT_STRUCTURE.to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::with_output(constants::DEFAULT_OUTPUT_DIR)
    }
}
