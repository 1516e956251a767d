use std::path::Path;
use std::sync::Arc;

use crate::semantic::workspace::{Library, ModuleFile, Workspace};

impl Workspace {
    /// Every live module file, ordered by path
    pub fn provide_all_files(&self) -> Vec<Arc<ModuleFile>> {
        let mut files: Vec<_> = self.files.read().values().cloned().collect();
        files.sort_by(|a, b| a.path().cmp(b.path()));
        files
    }

    pub fn find_file(&self, path: &Path) -> Option<Arc<ModuleFile>> {
        self.files.read().get(path).cloned()
    }

    /// First file holding `referable_name`, searching libraries in project order
    pub fn find_file_by_referable_name(&self, referable_name: &str) -> Option<Arc<ModuleFile>> {
        self.libraries
            .values()
            .find_map(|library| library.module(referable_name))
    }

    /// Resolve `referable_name` as seen from `library`, following its steplib chain.
    ///
    /// Unknown steplibs in the chain are skipped.
    pub fn resolve_module_file(
        &self,
        library: &str,
        referable_name: &str,
    ) -> Option<Arc<ModuleFile>> {
        let library = self.library(library)?;
        library
            .steplib_chain()
            .iter()
            .filter_map(|name| self.libraries.get(name))
            .find_map(|steplib| steplib.module(referable_name))
    }

    pub fn library(&self, name: &str) -> Option<&Library> {
        self.libraries.get(name.to_ascii_uppercase().as_str())
    }

    pub fn libraries(&self) -> impl Iterator<Item = &Library> {
        self.libraries.values()
    }

    /// Library whose directory contains `path`
    pub fn library_for_path(&self, path: &Path) -> Option<&Library> {
        self.libraries
            .values()
            .filter(|library| path.starts_with(library.source_path()))
            .max_by_key(|library| library.source_path().components().count())
    }

    pub fn file_count(&self) -> usize {
        self.files.read().len()
    }
}
