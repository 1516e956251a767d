//! Find references and rename preparation for modules.

use std::path::{Path, PathBuf};

use rustc_hash::FxHashSet;
use smol_str::SmolStr;

use crate::base::Span;
use crate::semantic::Workspace;

/// Result of a find-references request.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReferenceResult {
    /// All references found, ordered by file and position.
    pub references: Vec<Reference>,
}

impl ReferenceResult {
    /// Create an empty result.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Check if any references were found.
    pub fn is_empty(&self) -> bool {
        self.references.is_empty()
    }

    /// Get the number of references.
    pub fn len(&self) -> usize {
        self.references.len()
    }
}

/// A place in a calling file that refers to a module.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Reference {
    /// The calling file.
    pub file: PathBuf,
    /// The referencing statement. Empty for provisional references.
    pub span: Span,
    /// Only known from the scanner; the caller has not been parsed.
    pub provisional: bool,
}

/// Every known reference to the module in `path`.
///
/// Parsed callers contribute their statement spans. Callers that were only
/// scanned contribute their cached positions.
pub fn find_references(workspace: &Workspace, path: &Path) -> ReferenceResult {
    let Some(target) = workspace.find_file(path) else {
        return ReferenceResult::empty();
    };
    let name = target.referable_name();
    let mut references = Vec::new();
    let mut parsed_callers = FxHashSet::default();

    for caller_path in target.incoming_references() {
        let Some(caller) = workspace.find_file(&caller_path) else {
            continue;
        };
        let Ok(module) = caller.module() else {
            continue;
        };
        references.extend(module.references_to(&name).map(|span| Reference {
            file: caller_path.clone(),
            span,
            provisional: false,
        }));
        parsed_callers.insert(caller_path);
    }

    for position in workspace.reference_cache().retrieve_cached_positions(path) {
        if parsed_callers.contains(&position.file) {
            continue;
        }
        let start = position.position();
        references.push(Reference {
            file: position.file,
            span: Span::new(start, start),
            provisional: true,
        });
    }

    references.sort();
    references.dedup();
    ReferenceResult { references }
}

/// What a rename of a module would touch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenamePlan {
    pub referable_name: SmolStr,
    pub references: ReferenceResult,
}

/// Reparses every caller first, so the plan is built from current modules
/// rather than provisional scanner positions.
pub fn prepare_rename(workspace: &Workspace, path: &Path) -> Option<RenamePlan> {
    let target = workspace.find_file(path)?;
    workspace.reparse_callers(path);
    Some(RenamePlan {
        referable_name: target.referable_name(),
        references: find_references(workspace, path),
    })
}
