use std::sync::Arc;

use tracing::trace;

use crate::semantic::workspace::Workspace;
use crate::syntax::{ModuleProvider, NaturalModule};

/// Resolves modules for the parser from the workspace, parsing lazily.
///
/// Never blocks on another parse: if the target is being parsed right now
/// (a reference cycle, or another thread), the last known module is returned,
/// or a pending placeholder that only carries the target's identity. The
/// parser skips symbol checks against a pending import.
pub struct WorkspaceModuleProvider<'w> {
    workspace: &'w Workspace,
}

impl<'w> WorkspaceModuleProvider<'w> {
    pub fn new(workspace: &'w Workspace) -> Self {
        Self { workspace }
    }
}

impl ModuleProvider for WorkspaceModuleProvider<'_> {
    fn find_module(&self, referable_name: &str, library: &str) -> Option<Arc<NaturalModule>> {
        let target = self
            .workspace
            .resolve_module_file(library, referable_name)?;

        if let Some(module) = target.state().snapshot() {
            return Some(module.clone());
        }
        if target.is_deleted() {
            return None;
        }

        match target.try_lock_parse() {
            Some(guard) => {
                // Another thread may have finished the parse while we looked
                if let Some(module) = target.state().snapshot() {
                    return Some(module.clone());
                }
                trace!("nested parse of {}", target.path().display());
                Some(self.workspace.parse_locked(&target, guard))
            }
            None => {
                trace!(
                    "{} is being parsed, using placeholder",
                    target.path().display()
                );
                Some(Arc::new(NaturalModule::placeholder(&target.identity())))
            }
        }
    }
}
