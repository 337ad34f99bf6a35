//! Sample Module - Per-file primitives
//!
//! Structural signature check and streamed content hashing, plus the
//! label / statistics types shared by the rest of the pipeline.

pub mod types;
pub mod hasher;
pub mod signature;

pub use types::{Label, RunStatistics, SampleOutcome, SampleRecord};
