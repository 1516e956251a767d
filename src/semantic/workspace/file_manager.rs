use std::path::{Path, PathBuf};
use std::sync::Arc;

use smol_str::SmolStr;
use tracing::{debug, warn};

use crate::base::NaturalFileType;
use crate::semantic::workspace::{ModuleFile, ModuleState, ReparseReport, Workspace};

impl Workspace {
    /// Adds a file found on disk. Returns `None` for non-Natural files and
    /// files outside every library.
    ///
    /// Subroutines and functions only become resolvable once scanned, since
    /// their referable name comes from the header.
    pub fn add_file(&self, path: PathBuf) -> Option<Arc<ModuleFile>> {
        let file_type = NaturalFileType::from_path(&path)?;
        if let Some(existing) = self.find_file(&path) {
            return Some(existing);
        }
        let Some(library) = self.library_for_path(&path) else {
            warn!("{} is not inside a known library, ignoring", path.display());
            return None;
        };

        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_ascii_uppercase())
            .unwrap_or_default();
        let file = Arc::new(ModuleFile::new(
            path.clone(),
            library.name().clone(),
            file_type,
            SmolStr::new(stem),
        ));

        if !file_type.has_header_name() {
            library.register(&file.referable_name(), &file);
        }
        self.files.write().insert(path, file.clone());
        Some(file)
    }

    /// Registers a file created after indexing and scans it for references.
    ///
    /// Files that were already referring to the new module's name are brought
    /// up to date: parsed ones are reparsed, the others rescanned.
    pub fn file_created(&self, path: PathBuf) -> Option<Arc<ModuleFile>> {
        let file = self.add_file(path)?;
        self.index_file(&file);
        self.resolve_waiting_callers(&file);
        Some(file)
    }

    fn resolve_waiting_callers(&self, file: &ModuleFile) -> ReparseReport {
        let mut report = ReparseReport::default();
        for caller_path in self.unresolved.take_waiting(&file.referable_name()) {
            if caller_path == file.path() {
                continue;
            }
            let Some(caller) = self.find_file(&caller_path) else {
                continue;
            };
            match caller.state() {
                ModuleState::Parsed(_) | ModuleState::Stale(_) => {
                    self.parse_file(&caller);
                    report.reparsed.push(caller_path);
                }
                ModuleState::Unparsed | ModuleState::Closed => {
                    self.index_file(&caller);
                }
                ModuleState::Deleted => {}
            }
        }
        debug!(
            "{} created, {} waiting callers reparsed",
            file.path().display(),
            report.reparsed.len()
        );
        report
    }

    /// Makes `file` resolvable under `name` in its library
    pub(crate) fn register_referable_name(&self, file: &Arc<ModuleFile>, name: SmolStr) -> bool {
        let Some(library) = self.library(file.library()) else {
            return false;
        };
        let previous = file.referable_name();
        if previous != name {
            library.unregister(&previous, file.path());
            file.set_referable_name(name.clone());
        }
        library.register(&name, file)
    }

    /// Removes a file: tears down its edges on both sides, drops its cache
    /// entries and demotes parsed callers to stale.
    pub fn delete_file(&self, path: &Path) -> ReparseReport {
        let mut report = ReparseReport::default();
        let Some(file) = self.files.write().remove(path) else {
            return report;
        };

        if let Some(library) = self.library(file.library()) {
            library.unregister(&file.referable_name(), path);
        }

        let (incoming, outgoing) = file.mark_deleted();
        for target in outgoing.iter().filter_map(|p| self.find_file(p)) {
            target.remove_incoming(path);
        }
        let mut callers: Vec<_> = incoming.into_iter().collect();
        callers.sort();
        let name = file.referable_name();
        self.unresolved.remove_file(path);
        for caller in callers.iter().filter_map(|p| self.find_file(p)) {
            caller.remove_outgoing(path);
            self.unresolved.add(caller.path(), &name);
            if caller.mark_stale() {
                report.marked_stale.push(caller.path().to_path_buf());
            }
        }

        self.reference_cache.remove_file(path);
        debug!(
            "deleted {} ({} callers marked stale)",
            path.display(),
            report.marked_stale.len()
        );
        report
    }

    /// Delete `old` and create `new`
    pub fn rename_file(&self, old: &Path, new: PathBuf) -> ReparseReport {
        let mut report = self.delete_file(old);
        if let Some(file) = self.add_file(new) {
            self.index_file(&file);
            report.merge(self.resolve_waiting_callers(&file));
        }
        report
    }
}
