use std::path::{Path, PathBuf};
use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use super::file::ModuleFile;
use super::library::Library;
use crate::semantic::graphs::{ReferenceCache, UnresolvedIndex};
use crate::semantic::severity::SeverityOverrides;
use crate::syntax::{ModuleParser, NaturalParser};

/// A Natural project: libraries, their module files and the reference graph.
///
/// All operations take `&self`; the workspace is shared between the
/// background indexer and interactive requests through `Arc`.
pub struct Workspace {
    pub(super) root: PathBuf,
    pub(super) libraries: IndexMap<SmolStr, Library>,
    pub(super) files: RwLock<FxHashMap<PathBuf, Arc<ModuleFile>>>,
    pub(super) reference_cache: Arc<ReferenceCache>,
    /// Referenced names that resolved nowhere, per referring file
    pub(super) unresolved: UnresolvedIndex,
    pub(super) parser: Arc<dyn ModuleParser>,
    pub(super) severity: SeverityOverrides,
}

impl Workspace {
    /// Creates an empty workspace using the built-in parser and its own cache
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_parts(
            root,
            Arc::new(NaturalParser::new()),
            Arc::new(ReferenceCache::new()),
        )
    }

    /// Creates an empty workspace with an injected parser and reference cache
    pub fn with_parts(
        root: impl Into<PathBuf>,
        parser: Arc<dyn ModuleParser>,
        reference_cache: Arc<ReferenceCache>,
    ) -> Self {
        let root = root.into();
        Self {
            severity: SeverityOverrides::new(root.clone()),
            root,
            libraries: IndexMap::new(),
            files: RwLock::new(FxHashMap::default()),
            reference_cache,
            unresolved: UnresolvedIndex::new(),
            parser,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Adds a library. A library added twice keeps its first definition.
    pub fn add_library(
        &mut self,
        name: &str,
        source_path: impl Into<PathBuf>,
        steplibs: &[SmolStr],
    ) -> &Library {
        let library = Library::new(name, source_path, steplibs);
        self.libraries
            .entry(library.name().clone())
            .or_insert(library)
    }

    pub fn set_severity_overrides(&mut self, severity: SeverityOverrides) {
        self.severity = severity;
    }

    pub fn severity_overrides(&self) -> &SeverityOverrides {
        &self.severity
    }

    pub fn reference_cache(&self) -> &Arc<ReferenceCache> {
        &self.reference_cache
    }
}

impl std::fmt::Debug for Workspace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Workspace")
            .field("root", &self.root)
            .field("libraries", &self.libraries.keys().collect::<Vec<_>>())
            .field("files", &self.files.read().len())
            .finish()
    }
}
