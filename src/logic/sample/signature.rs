//! Structural signature check - DOS/PE `MZ` header

use std::fs;
use std::io::Read;
use std::path::Path;

use crate::constants::PE_MAGIC;

/// Result of the leading-bytes check. Never an error: callers skip anything
/// that is not `Valid`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignatureCheck {
    Valid,
    /// Readable, but the header is short or not `MZ`
    Invalid,
    /// Open or read failed
    Unreadable(String),
}

impl SignatureCheck {
    pub fn is_valid(&self) -> bool {
        matches!(self, SignatureCheck::Valid)
    }

    /// Human-readable rejection reason
    pub fn reason(&self) -> Option<String> {
        match self {
            SignatureCheck::Valid => None,
            SignatureCheck::Invalid => Some("Not a valid PE file (no MZ header)".to_string()),
            SignatureCheck::Unreadable(e) => Some(format!("Unreadable: {}", e)),
        }
    }
}

/// Inspect at most the first two bytes of `reader`
pub fn check_reader<R: Read>(reader: R) -> SignatureCheck {
    let mut header = Vec::with_capacity(PE_MAGIC.len());

    match reader.take(PE_MAGIC.len() as u64).read_to_end(&mut header) {
        Ok(_) if header == PE_MAGIC => SignatureCheck::Valid,
        Ok(_) => SignatureCheck::Invalid,
        Err(e) => SignatureCheck::Unreadable(e.to_string()),
    }
}

/// Inspect the header of the file at `path`
pub fn check_file(path: &Path) -> SignatureCheck {
    match fs::File::open(path) {
        Ok(file) => check_reader(file),
        Err(e) => SignatureCheck::Unreadable(e.to_string()),
    }
}
