//! Destination handling.
//!
//! A header is staged in a temporary file beside its destination and moved
//! over it only after the writer reports success. Until then an existing
//! header stays exactly as it was.

use std::fs;
use std::io;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::GenerateError;

/// Stage `path`'s new contents through `write`, then persist them.
pub(crate) fn write_file<T>(
    path: &Path,
    write: impl FnOnce(&mut NamedTempFile) -> io::Result<T>,
) -> Result<T, GenerateError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(|err| GenerateError::output(dir, err))?;

    let mut staged = NamedTempFile::new_in(dir).map_err(|err| GenerateError::output(path, err))?;
    let value = write(&mut staged).map_err(|err| GenerateError::output(path, err))?;

    // Keep the permissions of a header being replaced.
    if let Ok(metadata) = fs::metadata(path) {
        staged
            .as_file()
            .set_permissions(metadata.permissions())
            .map_err(|err| GenerateError::output(path, err))?;
    }

    staged
        .persist(path)
        .map_err(|err| GenerateError::output(path, err.error))?;
    tracing::debug!(path = %path.display(), "output persisted");
    Ok(value)
}
