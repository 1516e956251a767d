//! Names each file refers to that did not resolve to any module.
//!
//! Lets a newly created module find the files that were already waiting for
//! it. Names are stored upper-cased, like referable names.

use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use rustc_hash::{FxHashMap, FxHashSet};
use smol_str::SmolStr;
use tracing::trace;

#[derive(Debug, Default)]
struct Inner {
    /// unresolved name → files referring to it
    by_name: FxHashMap<SmolStr, FxHashSet<PathBuf>>,
    /// file → its unresolved names
    by_file: FxHashMap<PathBuf, FxHashSet<SmolStr>>,
}

#[derive(Debug, Default)]
pub struct UnresolvedIndex {
    inner: Mutex<Inner>,
}

fn normalize(name: &str) -> SmolStr {
    SmolStr::new(name.to_ascii_uppercase())
}

impl UnresolvedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace everything recorded for `file` with `names`.
    pub fn replace<I>(&self, file: &Path, names: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let names: FxHashSet<SmolStr> = names.into_iter().map(|n| normalize(n.as_ref())).collect();
        let mut inner = self.inner.lock();
        inner.detach(file);
        for name in &names {
            inner
                .by_name
                .entry(name.clone())
                .or_default()
                .insert(file.to_path_buf());
        }
        if !names.is_empty() {
            inner.by_file.insert(file.to_path_buf(), names);
        }
    }

    /// Record one more unresolved name for `file`.
    pub fn add(&self, file: &Path, name: &str) {
        let name = normalize(name);
        let mut inner = self.inner.lock();
        inner
            .by_name
            .entry(name.clone())
            .or_default()
            .insert(file.to_path_buf());
        inner.by_file.entry(file.to_path_buf()).or_default().insert(name);
    }

    /// Remove and return the files waiting for `name`, sorted.
    pub fn take_waiting(&self, name: &str) -> Vec<PathBuf> {
        let name = normalize(name);
        let mut inner = self.inner.lock();
        let Some(files) = inner.by_name.remove(&name) else {
            return Vec::new();
        };
        for file in &files {
            if let Some(names) = inner.by_file.get_mut(file) {
                names.remove(&name);
                if names.is_empty() {
                    inner.by_file.remove(file);
                }
            }
        }
        trace!("[UNRESOLVED] {} files waiting for {}", files.len(), name);
        let mut files: Vec<_> = files.into_iter().collect();
        files.sort();
        files
    }

    /// Forget `file` entirely.
    pub fn remove_file(&self, file: &Path) {
        self.inner.lock().detach(file);
    }

    /// Files currently waiting for `name`, sorted.
    pub fn waiting(&self, name: &str) -> Vec<PathBuf> {
        let mut files: Vec<_> = self
            .inner
            .lock()
            .by_name
            .get(&normalize(name))
            .map(|files| files.iter().cloned().collect())
            .unwrap_or_default();
        files.sort();
        files
    }
}

impl Inner {
    fn detach(&mut self, file: &Path) {
        let Some(names) = self.by_file.remove(file) else {
            return;
        };
        for name in names {
            if let Some(files) = self.by_name.get_mut(&name) {
                files.remove(file);
                if files.is_empty() {
                    self.by_name.remove(&name);
                }
            }
        }
    }
}
