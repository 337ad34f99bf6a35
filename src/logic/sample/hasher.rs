//! Content hashing - SHA-256 over streamed fixed-size blocks

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use sha2::{Digest, Sha256};

use crate::constants::{DIGEST_PREFIX_LEN, HASH_BLOCK_SIZE};

/// Lowercase hex SHA-256 of everything `reader` yields
pub fn hash_reader<R: Read>(mut reader: R) -> io::Result<String> {
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; HASH_BLOCK_SIZE];

    loop {
        let bytes_read = match reader.read(&mut buffer) {
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };

        if bytes_read == 0 {
            break;
        }

        hasher.update(&buffer[..bytes_read]);
    }

    Ok(hex::encode(hasher.finalize()))
}

/// Lowercase hex SHA-256 of the file at `path`
pub fn hash_file(path: &Path) -> io::Result<String> {
    let file = fs::File::open(path)?;
    hash_reader(file)
}

/// First hex characters of a digest, as embedded in accepted file names
pub fn digest_prefix(digest: &str) -> &str {
    digest.get(..DIGEST_PREFIX_LEN).unwrap_or(digest)
}
