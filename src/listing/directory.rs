use std::fs;
use std::io;
use std::path::Path;

use tracing::{debug, info};

use crate::listing::Entry;

/// Reads the real children of `path`.
///
/// Symbolic links are reported as non-directories so that recursion never
/// follows them.
pub fn read_real_entries(path: &Path) -> io::Result<Vec<Entry>> {
    info!("Reading directory {}", path.display());

    let entries = fs::read_dir(path)?
        .map(|entry| {
            let entry = entry?;
            let directory = entry
                .file_type()
                .map(|file_type| file_type.is_dir())
                .unwrap_or(false);
            Ok(Entry::real(entry.file_name(), directory))
        })
        .collect::<io::Result<Vec<_>>>()?;

    debug!("Read {} entries from {}", entries.len(), path.display());
    Ok(entries)
}
