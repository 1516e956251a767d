//! Natural library: a directory of module files plus its steplib chain

use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use tracing::warn;

use super::file::ModuleFile;
use crate::base::constants::SYSTEM_LIBRARY;

#[derive(Debug)]
pub struct Library {
    name: SmolStr,
    source_path: PathBuf,
    /// Own name first, declared steplibs in order, `SYSTEM` last
    chain: Vec<SmolStr>,
    modules: RwLock<FxHashMap<SmolStr, Arc<ModuleFile>>>,
}

impl Library {
    pub fn new(name: &str, source_path: impl Into<PathBuf>, steplibs: &[SmolStr]) -> Self {
        let name = SmolStr::new(name.to_ascii_uppercase());
        let mut chain = vec![name.clone()];
        for steplib in steplibs
            .iter()
            .map(|s| SmolStr::new(s.to_ascii_uppercase()))
            .chain(std::iter::once(SmolStr::new(SYSTEM_LIBRARY)))
        {
            if !chain.contains(&steplib) {
                chain.push(steplib);
            }
        }

        Self {
            name,
            source_path: source_path.into(),
            chain,
            modules: RwLock::new(FxHashMap::default()),
        }
    }

    pub fn name(&self) -> &SmolStr {
        &self.name
    }

    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    /// Libraries searched when resolving a name from this one
    pub fn steplib_chain(&self) -> &[SmolStr] {
        &self.chain
    }

    /// Register `file` under `referable_name`.
    ///
    /// Returns `false` if another file already holds the name; that file
    /// keeps it.
    pub fn register(&self, referable_name: &SmolStr, file: &Arc<ModuleFile>) -> bool {
        let mut modules = self.modules.write();
        match modules.get(referable_name) {
            Some(existing) if existing.path() != file.path() => {
                warn!(
                    "duplicate referable name {} in library {}: keeping {}, ignoring {}",
                    referable_name,
                    self.name,
                    existing.path().display(),
                    file.path().display()
                );
                false
            }
            Some(_) => true,
            None => {
                modules.insert(referable_name.clone(), file.clone());
                true
            }
        }
    }

    /// Drop the name if it still points at `path`
    pub fn unregister(&self, referable_name: &SmolStr, path: &Path) {
        let mut modules = self.modules.write();
        if modules
            .get(referable_name)
            .is_some_and(|f| f.path() == path)
        {
            modules.remove(referable_name);
        }
    }

    pub fn module(&self, referable_name: &str) -> Option<Arc<ModuleFile>> {
        self.modules
            .read()
            .get(referable_name.to_ascii_uppercase().as_str())
            .cloned()
    }

    pub fn module_count(&self) -> usize {
        self.modules.read().len()
    }
}
