//! Module file: one source file of a library and its parse state

use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard, RwLock};
use rustc_hash::FxHashSet;
use smol_str::SmolStr;

use crate::base::{Diagnostic, DiagnosticTool, NaturalFileType};
use crate::semantic::diagnostics::DiagnosticAggregator;
use crate::semantic::error::ModuleStateError;
use crate::syntax::{FileIdentity, NaturalModule};

/// Parse state of a module file.
#[derive(Debug, Clone, Default)]
pub enum ModuleState {
    /// Never parsed; only scanner edges exist
    #[default]
    Unparsed,
    /// Parsed and current
    Parsed(Arc<NaturalModule>),
    /// Source changed since the last parse; the old module stays readable
    Stale(Arc<NaturalModule>),
    /// Module released to bound memory
    Closed,
    /// Removed from the project
    Deleted,
}

impl ModuleState {
    pub fn is_parsed(&self) -> bool {
        matches!(self, ModuleState::Parsed(_))
    }

    pub fn is_deleted(&self) -> bool {
        matches!(self, ModuleState::Deleted)
    }

    /// The module a reader may see, current or stale
    pub fn snapshot(&self) -> Option<&Arc<NaturalModule>> {
        match self {
            ModuleState::Parsed(module) | ModuleState::Stale(module) => Some(module),
            ModuleState::Unparsed | ModuleState::Closed | ModuleState::Deleted => None,
        }
    }
}

#[derive(Debug, Default)]
struct Edges {
    incoming: FxHashSet<PathBuf>,
    outgoing: FxHashSet<PathBuf>,
}

/// A source file in a library.
///
/// Identity is fixed at creation except for the referable name of
/// subroutines and functions, which comes from their header once scanned.
#[derive(Debug)]
pub struct ModuleFile {
    path: PathBuf,
    library: SmolStr,
    file_type: NaturalFileType,
    referable_name: RwLock<SmolStr>,
    state: RwLock<ModuleState>,
    /// Serializes parses of this file
    parse_lock: Mutex<()>,
    diagnostics: Mutex<DiagnosticAggregator>,
    edges: Mutex<Edges>,
    /// Unsaved editor content
    overlay: Mutex<Option<String>>,
}

impl ModuleFile {
    pub fn new(
        path: PathBuf,
        library: SmolStr,
        file_type: NaturalFileType,
        referable_name: SmolStr,
    ) -> Self {
        Self {
            path,
            library,
            file_type,
            referable_name: RwLock::new(referable_name),
            state: RwLock::new(ModuleState::Unparsed),
            parse_lock: Mutex::new(()),
            diagnostics: Mutex::new(DiagnosticAggregator::new()),
            edges: Mutex::new(Edges::default()),
            overlay: Mutex::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn library(&self) -> &SmolStr {
        &self.library
    }

    pub fn file_type(&self) -> NaturalFileType {
        self.file_type
    }

    pub fn referable_name(&self) -> SmolStr {
        self.referable_name.read().clone()
    }

    pub fn identity(&self) -> FileIdentity {
        FileIdentity {
            path: self.path.clone(),
            library: self.library.clone(),
            referable_name: self.referable_name(),
            file_type: self.file_type,
        }
    }

    pub fn state(&self) -> ModuleState {
        self.state.read().clone()
    }

    pub fn is_deleted(&self) -> bool {
        self.state.read().is_deleted()
    }

    /// The current or stale module.
    pub fn module(&self) -> Result<Arc<NaturalModule>, ModuleStateError> {
        match &*self.state.read() {
            ModuleState::Parsed(module) | ModuleState::Stale(module) => Ok(module.clone()),
            ModuleState::Unparsed => Err(ModuleStateError::NotParsed(self.path.clone())),
            ModuleState::Closed => Err(ModuleStateError::Closed(self.path.clone())),
            ModuleState::Deleted => Err(ModuleStateError::Deleted(self.path.clone())),
        }
    }

    /// Files this one refers to. Empty once deleted.
    pub fn outgoing_references(&self) -> Vec<PathBuf> {
        let mut paths: Vec<_> = self.edges.lock().outgoing.iter().cloned().collect();
        paths.sort();
        paths
    }

    /// Files referring to this one. Empty once deleted.
    pub fn incoming_references(&self) -> Vec<PathBuf> {
        let mut paths: Vec<_> = self.edges.lock().incoming.iter().cloned().collect();
        paths.sort();
        paths
    }

    pub fn diagnostics_by_tool(&self, tool: DiagnosticTool) -> Vec<Diagnostic> {
        self.diagnostics.lock().diagnostics_by_tool(tool).to_vec()
    }

    /// All diagnostics as reported, before severity overrides
    pub fn raw_diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.lock().all_diagnostics()
    }

    pub fn has_overlay(&self) -> bool {
        self.overlay.lock().is_some()
    }

    // ==================== Crate-internal mutation ====================

    pub(crate) fn set_referable_name(&self, name: SmolStr) {
        *self.referable_name.write() = name;
    }

    pub(crate) fn lock_parse(&self) -> MutexGuard<'_, ()> {
        self.parse_lock.lock()
    }

    pub(crate) fn try_lock_parse(&self) -> Option<MutexGuard<'_, ()>> {
        self.parse_lock.try_lock()
    }

    /// Install a freshly parsed module. Refused once deleted.
    pub(crate) fn set_parsed(&self, module: Arc<NaturalModule>) -> bool {
        let mut state = self.state.write();
        if state.is_deleted() {
            return false;
        }
        *state = ModuleState::Parsed(module);
        true
    }

    /// Parsed → Stale. Returns whether the state changed.
    pub(crate) fn mark_stale(&self) -> bool {
        let mut state = self.state.write();
        if let ModuleState::Parsed(module) = &*state {
            *state = ModuleState::Stale(module.clone());
            true
        } else {
            false
        }
    }

    /// Parsed/Stale → Closed, dropping the module and parser diagnostics.
    pub(crate) fn close(&self) -> bool {
        {
            let mut state = self.state.write();
            if state.snapshot().is_none() {
                return false;
            }
            *state = ModuleState::Closed;
        }
        self.diagnostics
            .lock()
            .clear_diagnostics_by_tool(DiagnosticTool::Parser);
        self.overlay.lock().take();
        true
    }

    /// Enter the terminal state and hand back the edges to tear down
    pub(crate) fn mark_deleted(&self) -> (FxHashSet<PathBuf>, FxHashSet<PathBuf>) {
        *self.state.write() = ModuleState::Deleted;
        *self.diagnostics.lock() = DiagnosticAggregator::new();
        self.overlay.lock().take();
        let edges = std::mem::take(&mut *self.edges.lock());
        (edges.incoming, edges.outgoing)
    }

    pub(crate) fn set_overlay(&self, source: Option<String>) {
        *self.overlay.lock() = source;
    }

    /// Overlay if any, otherwise the file on disk
    pub(crate) fn read_source(&self) -> std::io::Result<String> {
        if let Some(source) = self.overlay.lock().as_ref() {
            return Ok(source.clone());
        }
        std::fs::read_to_string(&self.path)
    }

    pub(crate) fn replace_diagnostics(&self, tool: DiagnosticTool, diagnostics: Vec<Diagnostic>) {
        self.diagnostics
            .lock()
            .replace_diagnostics(tool, diagnostics);
    }

    /// Swap the outgoing set, returning the previous one
    pub(crate) fn replace_outgoing(&self, outgoing: FxHashSet<PathBuf>) -> FxHashSet<PathBuf> {
        std::mem::replace(&mut self.edges.lock().outgoing, outgoing)
    }

    pub(crate) fn add_incoming(&self, caller: &Path) {
        if !self.is_deleted() {
            self.edges.lock().incoming.insert(caller.to_path_buf());
        }
    }

    pub(crate) fn remove_incoming(&self, caller: &Path) {
        self.edges.lock().incoming.remove(caller);
    }

    pub(crate) fn remove_outgoing(&self, target: &Path) {
        self.edges.lock().outgoing.remove(target);
    }
}
