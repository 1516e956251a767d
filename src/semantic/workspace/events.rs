//! Lifecycle events on module files: open, change, save, close.
//!
//! Every event funnels into [`Workspace::parse_locked`], which runs the pure
//! [`reparse`] and then updates state, diagnostics, edges and the reference
//! cache, in that order.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::MutexGuard;
use rustc_hash::FxHashSet;
use smol_str::SmolStr;
use tracing::{debug, trace};

use super::provider::WorkspaceModuleProvider;
use super::reparse::{faulted, reparse};
use super::strategy::{ParseStrategy, ReparseReport, requires_caller_reparse};
use crate::base::{Diagnostic, DiagnosticTool};
use crate::semantic::workspace::{ModuleFile, ModuleState, Workspace};
use crate::syntax::NaturalModule;

impl Workspace {
    /// Parses the file if it has no current module and returns it.
    pub fn open(&self, path: &Path) -> Option<Arc<NaturalModule>> {
        let file = self.find_file(path)?;
        match file.state() {
            ModuleState::Parsed(module) => Some(module),
            ModuleState::Deleted => None,
            ModuleState::Unparsed | ModuleState::Stale(_) | ModuleState::Closed => {
                Some(self.parse_file(&file))
            }
        }
    }

    /// Lazy access: a stale module is good enough, a missing one gets parsed.
    pub fn module(&self, path: &Path) -> Option<Arc<NaturalModule>> {
        let file = self.find_file(path)?;
        match file.state() {
            ModuleState::Parsed(module) | ModuleState::Stale(module) => Some(module),
            ModuleState::Deleted => None,
            ModuleState::Unparsed | ModuleState::Closed => Some(self.parse_file(&file)),
        }
    }

    /// The editor content changed; reparse from the unsaved source.
    pub fn change(&self, path: &Path, source: String, strategy: ParseStrategy) -> ReparseReport {
        let Some(file) = self.find_file(path) else {
            return ReparseReport::default();
        };
        file.set_overlay(Some(source));
        self.reparse_with_strategy(&file, strategy)
    }

    /// The file was saved; drop the overlay and reparse from disk.
    pub fn save(&self, path: &Path, strategy: ParseStrategy) -> ReparseReport {
        let Some(file) = self.find_file(path) else {
            return ReparseReport::default();
        };
        file.set_overlay(None);
        self.reparse_with_strategy(&file, strategy)
    }

    /// Releases the module. Only parser diagnostics are dropped.
    pub fn close(&self, path: &Path) -> bool {
        self.find_file(path).is_some_and(|file| file.close())
    }

    /// The source changed outside the editor.
    pub fn mark_stale(&self, path: &Path) -> bool {
        self.find_file(path).is_some_and(|file| file.mark_stale())
    }

    /// Reparses every current direct caller of `path`, without propagating
    /// further. Whole-project operations call this up front.
    pub fn reparse_callers(&self, path: &Path) -> ReparseReport {
        let mut report = ReparseReport::default();
        let Some(file) = self.find_file(path) else {
            return report;
        };

        for caller_path in file.incoming_references() {
            let Some(caller) = self.find_file(&caller_path) else {
                continue;
            };
            if caller.is_deleted() {
                continue;
            }
            self.parse_file(&caller);
            report.reparsed.push(caller_path);
        }
        report
    }

    /// Diagnostics of a file after severity overrides
    pub fn diagnostics(&self, path: &Path) -> Vec<Diagnostic> {
        let Some(file) = self.find_file(path) else {
            return Vec::new();
        };
        file.raw_diagnostics()
            .iter()
            .filter_map(|d| self.severity.apply(d))
            .collect()
    }

    /// Replace one tool's partition, e.g. after a linter run
    pub fn publish_diagnostics(
        &self,
        path: &Path,
        tool: DiagnosticTool,
        diagnostics: Vec<Diagnostic>,
    ) -> bool {
        match self.find_file(path) {
            Some(file) if !file.is_deleted() => {
                file.replace_diagnostics(tool, diagnostics);
                true
            }
            _ => false,
        }
    }

    fn reparse_with_strategy(
        &self,
        file: &Arc<ModuleFile>,
        strategy: ParseStrategy,
    ) -> ReparseReport {
        let module = self.parse_file(file);
        let mut report = ReparseReport {
            reparsed: vec![file.path().to_path_buf()],
            ..Default::default()
        };

        if strategy == ParseStrategy::WithCallers
            && requires_caller_reparse(file.file_type(), &module)
        {
            report.merge(self.reparse_callers(file.path()));
        }
        report
    }

    pub(crate) fn parse_file(&self, file: &Arc<ModuleFile>) -> Arc<NaturalModule> {
        let guard = file.lock_parse();
        self.parse_locked(file, guard)
    }

    /// A real parse of `file`, with its parse lock held.
    pub(crate) fn parse_locked(
        &self,
        file: &Arc<ModuleFile>,
        _guard: MutexGuard<'_, ()>,
    ) -> Arc<NaturalModule> {
        let identity = file.identity();
        let provider = WorkspaceModuleProvider::new(self);
        let (module, diagnostics) = match file.read_source() {
            Ok(source) => reparse(&identity, &source, self.parser.as_ref(), &provider),
            Err(err) => faulted(&identity, format!("cannot read source: {}", err)),
        };
        let module = Arc::new(module);

        if !file.set_parsed(module.clone()) {
            return module;
        }
        file.replace_diagnostics(DiagnosticTool::Parser, diagnostics);
        let (targets, unresolved) = self.module_targets(file, &module);
        self.replace_outgoing_edges(file, targets);
        self.unresolved.replace(file.path(), unresolved);
        self.reference_cache.evict_my_references(file.path());

        debug!(
            "parsed {} ({} outgoing)",
            file.path().display(),
            file.outgoing_references().len()
        );
        module
    }

    /// Paths of the files `module` refers to, excluding itself, and the
    /// names that resolved nowhere
    fn module_targets<'m>(
        &self,
        file: &ModuleFile,
        module: &'m NaturalModule,
    ) -> (FxHashSet<PathBuf>, Vec<&'m SmolStr>) {
        let mut targets = FxHashSet::default();
        let mut unresolved = Vec::new();
        for name in module.referenced_modules() {
            match self.resolve_module_file(file.library(), name) {
                Some(target) if target.path() != file.path() => {
                    targets.insert(target.path().to_path_buf());
                }
                Some(_) => {}
                None => unresolved.push(name),
            }
        }
        (targets, unresolved)
    }

    /// Set `file`'s outgoing edges and fix up the incoming side of each target.
    pub(crate) fn replace_outgoing_edges(&self, file: &ModuleFile, targets: FxHashSet<PathBuf>) {
        let previous = file.replace_outgoing(targets.clone());

        for removed in previous.difference(&targets) {
            if let Some(target) = self.find_file(removed) {
                target.remove_incoming(file.path());
            }
        }
        for added in &targets {
            if let Some(target) = self.find_file(added) {
                trace!("edge {} -> {}", file.path().display(), added.display());
                target.add_incoming(file.path());
            }
        }
    }
}
