//! Central Configuration Constants
//!
//! Single source of truth for all configuration defaults.
//! Every default can be overridden from the environment (or a `.env` file).

/// Default dataset output root (relative to the working directory)
pub const DEFAULT_OUTPUT_DIR: &str = "packhero-dataset";

/// Target executable extension, without the dot
pub const DEFAULT_EXTENSION: &str = "exe";

/// Placeholder packed-variant trees reserved for later packing stages
pub const DEFAULT_PACKED_VARIANTS: &[&str] = &["v1", "v2", "v3"];

/// Schema label written into the metadata record
pub const DEFAULT_STRUCTURE: &str = "PackHero dataset";

/// DOS/PE header magic
pub const PE_MAGIC: [u8; 2] = *b"MZ";

/// Read block size for streamed hashing
pub const HASH_BLOCK_SIZE: usize = 8192;

/// Hex characters of the digest embedded in accepted file names
pub const DIGEST_PREFIX_LEN: usize = 16;

/// Metadata record file name inside `metadata/`
pub const METADATA_FILE: &str = "dataset_info.json";

/// Below this many accepted samples the summary warns about dataset size
pub const MIN_SAMPLES_WARNING: u64 = 10;

/// Below this many accepted samples the summary calls the dataset a start
pub const RECOMMENDED_SAMPLES: u64 = 50;

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "Sample Intake";

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Get output root from environment or use default
pub fn get_output_dir() -> String {
    std::env::var("SAMPLE_INTAKE_OUTPUT")
        .unwrap_or_else(|_| DEFAULT_OUTPUT_DIR.to_string())
}

/// Get target extension from environment or use default
pub fn get_extension() -> String {
    std::env::var("SAMPLE_INTAKE_EXTENSION")
        .map(|s| s.trim_start_matches('.').to_string())
        .ok()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_EXTENSION.to_string())
}

/// Get packed variant names (comma separated) from environment or use default
pub fn get_packed_variants() -> Vec<String> {
    std::env::var("SAMPLE_INTAKE_PACKED_VARIANTS")
        .ok()
        .map(|s| parse_variant_list(&s))
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_PACKED_VARIANTS.iter().map(|s| s.to_string()).collect())
}

/// Get metadata schema label from environment or use default
pub fn get_structure_label() -> String {
    std::env::var("SAMPLE_INTAKE_STRUCTURE")
        .unwrap_or_else(|_| DEFAULT_STRUCTURE.to_string())
}

fn parse_variant_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
