//! Go to the module referenced under the cursor.

use std::path::{Path, PathBuf};

use smol_str::SmolStr;

use crate::base::Position;
use crate::semantic::Workspace;

/// The module a reference resolves to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GotoTarget {
    pub file: PathBuf,
    pub referable_name: SmolStr,
}

/// Resolve the module reference at `position` in `path` through the file's
/// steplib chain. Parses the file if needed.
pub fn goto_module(workspace: &Workspace, path: &Path, position: Position) -> Option<GotoTarget> {
    let file = workspace.find_file(path)?;
    let module = workspace.module(path)?;
    let name = module.module_reference_at(position)?;
    let target = workspace.resolve_module_file(file.library(), name)?;
    Some(GotoTarget {
        file: target.path().to_path_buf(),
        referable_name: target.referable_name(),
    })
}
