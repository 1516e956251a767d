//! Directory walking for Natural libraries.

use std::path::{Path, PathBuf};

use smol_str::SmolStr;
use tracing::warn;
use walkdir::WalkDir;

use crate::base::NaturalFileType;

/// Every Natural source file below `dir`, sorted by path.
///
/// Unreadable entries are logged and skipped.
pub fn collect_file_paths(dir: &Path) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                warn!("skipping unreadable entry below {}: {}", dir.display(), err);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| NaturalFileType::from_path(path).is_some())
        .collect();
    paths.sort();
    paths
}

/// Library directories directly below `libraries_dir`, as (upper-cased name, path)
pub fn discover_libraries(libraries_dir: &Path) -> Vec<(SmolStr, PathBuf)> {
    let Ok(entries) = std::fs::read_dir(libraries_dir) else {
        return Vec::new();
    };
    let mut libraries: Vec<_> = entries
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_ok_and(|t| t.is_dir()))
        .map(|entry| {
            let name = entry.file_name().to_string_lossy().to_ascii_uppercase();
            (SmolStr::new(name), entry.path())
        })
        .collect();
    libraries.sort();
    libraries
}

#[cfg(test)]
mod tests;
