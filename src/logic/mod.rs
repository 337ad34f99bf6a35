//! Logic Module - Sample Intake Pipeline
//!
//! ## Layout
//! - `sample/` - per-file primitives (signature check, content hashing, types)
//! - `layout` - destination directory taxonomy
//! - `intake/` - one labeled source directory into `original/<label>`
//! - `dataset/` - metadata record emission
//! - `pipeline` - run orchestration
//! - `summary` - end-of-run report

pub mod sample;
pub mod layout;
pub mod intake;
pub mod dataset;
pub mod pipeline;
pub mod summary;
