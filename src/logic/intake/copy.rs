//! Atomic sample copy
//!
//! Content is streamed into a temp file next to the destination, stamped with
//! the source permissions and timestamps, then renamed into place. A failure
//! at any step leaves nothing under the destination name.

use std::fs::{self, FileTimes};
use std::io;
use std::path::Path;

const PART_PREFIX: &str = ".intake-";
const PART_SUFFIX: &str = ".part";

/// Copy `source` to `dest` with permissions and accessed/modified times.
/// Returns the number of bytes copied.
pub fn copy_sample(source: &Path, dest: &Path) -> io::Result<u64> {
    let dest_dir = dest.parent().ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidInput, "destination has no parent directory")
    })?;

    let mut input = fs::File::open(source)?;
    let metadata = input.metadata()?;

    let mut part = tempfile::Builder::new()
        .prefix(PART_PREFIX)
        .suffix(PART_SUFFIX)
        .tempfile_in(dest_dir)?;

    let bytes = io::copy(&mut input, part.as_file_mut())?;

    // must precede set_permissions for read-only sources
    let mut times = FileTimes::new().set_modified(metadata.modified()?);
    if let Ok(accessed) = metadata.accessed() {
        times = times.set_accessed(accessed);
    }
    part.as_file().set_times(times)?;
    part.as_file().set_permissions(metadata.permissions())?;
    part.as_file().sync_all()?;

    part.persist(dest).map_err(|e| e.error)?;
    Ok(bytes)
}
