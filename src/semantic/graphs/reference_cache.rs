//! Provisional call edges discovered by the reference scanner.
//!
//! Maps a called file to the positions that call it. Entries are only
//! authoritative until the calling file gets truly parsed, at which point
//! the caller evicts everything it contributed.
//!
//! The cache is an owned value shared through `Arc`; each project gets its own.

use std::path::{Path, PathBuf};

use parking_lot::{Mutex, RwLock};
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::trace;

use crate::base::FilePosition;

#[derive(Debug, Default)]
pub struct ReferenceCache {
    /// called file → positions calling it
    entries: RwLock<FxHashMap<PathBuf, FxHashSet<FilePosition>>>,
    /// Calling files whose entries were already evicted
    evicted: Mutex<FxHashSet<PathBuf>>,
}

impl ReferenceCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `calling_position` refers to `called_file`.
    ///
    /// Re-opens the eviction window for the calling file, so a rescan after an
    /// eviction is evicted again by the next real parse.
    pub fn add_entry(&self, called_file: &Path, calling_position: FilePosition) {
        trace!(
            "[REF_CACHE] add {}:{}:{} -> {}",
            calling_position.file.display(),
            calling_position.line,
            calling_position.column,
            called_file.display()
        );
        self.evicted.lock().remove(&calling_position.file);
        self.entries
            .write()
            .entry(called_file.to_path_buf())
            .or_default()
            .insert(calling_position);
    }

    /// Snapshot of the positions calling `called_file`. Empty if none.
    pub fn retrieve_cached_positions(&self, called_file: &Path) -> FxHashSet<FilePosition> {
        self.entries
            .read()
            .get(called_file)
            .cloned()
            .unwrap_or_default()
    }

    /// Drop every position contributed by `calling_file`.
    ///
    /// Returns `false` when the file was already evicted since its last
    /// contribution; the call is then a no-op.
    pub fn evict_my_references(&self, calling_file: &Path) -> bool {
        {
            let mut evicted = self.evicted.lock();
            if !evicted.insert(calling_file.to_path_buf()) {
                return false;
            }
        }

        let mut entries = self.entries.write();
        entries.retain(|_, positions| {
            positions.retain(|p| p.file != calling_file);
            !positions.is_empty()
        });
        trace!("[REF_CACHE] evicted references of {}", calling_file.display());
        true
    }

    /// Forget a file entirely, as target and as caller.
    pub fn remove_file(&self, path: &Path) {
        self.remove_called_file(path);
        self.evict_my_references(path);
        self.evicted.lock().remove(path);
    }

    /// Drop the entry keyed by `called_file` (the file no longer exists)
    pub fn remove_called_file(&self, called_file: &Path) {
        self.entries.write().remove(called_file);
    }

    /// Number of called files with at least one cached position
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}
