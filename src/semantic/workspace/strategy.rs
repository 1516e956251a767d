//! How far a reparse propagates.

use std::path::PathBuf;

use crate::base::NaturalFileType;
use crate::syntax::NaturalModule;

/// Whether a reparse also reparses the file's direct callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseStrategy {
    /// Reparse the file, then each current direct caller once (one level)
    #[default]
    WithCallers,
    /// Reparse only the file
    WithoutCallers,
}

/// Whether callers of `module` can observe a change to it.
///
/// Data areas, copycodes, DDMs and functions shape their callers' symbols.
/// Subprograms, subroutines and helproutines only do through parameters.
pub fn requires_caller_reparse(file_type: NaturalFileType, module: &NaturalModule) -> bool {
    match file_type {
        NaturalFileType::Lda
        | NaturalFileType::Pda
        | NaturalFileType::Gda
        | NaturalFileType::Copycode
        | NaturalFileType::Ddm
        | NaturalFileType::Function => true,
        NaturalFileType::Subprogram
        | NaturalFileType::Subroutine
        | NaturalFileType::Helproutine => module.has_parameter_data(),
        NaturalFileType::Program | NaturalFileType::Map => false,
    }
}

/// Files touched by a lifecycle operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReparseReport {
    /// Files actually reparsed, in order
    pub reparsed: Vec<PathBuf>,
    /// Parsed callers demoted to stale
    pub marked_stale: Vec<PathBuf>,
}

impl ReparseReport {
    pub fn merge(&mut self, other: ReparseReport) {
        self.reparsed.extend(other.reparsed);
        self.marked_stale.extend(other.marked_stale);
    }

    pub fn is_empty(&self) -> bool {
        self.reparsed.is_empty() && self.marked_stale.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{DataScope, FileIdentity, UsingClause};
    use crate::base::Span;
    use rstest::rstest;
    use smol_str::SmolStr;

    fn module(file_type: NaturalFileType, parameter_using: bool) -> NaturalModule {
        let mut module = NaturalModule::degraded(&FileIdentity {
            path: PathBuf::from("X"),
            library: SmolStr::new("LIB1"),
            referable_name: SmolStr::new("X"),
            file_type,
        });
        if parameter_using {
            module.usings.push(UsingClause {
                name: SmolStr::new("PDA1"),
                scope: DataScope::Parameter,
                span: Span::default(),
            });
        }
        module
    }

    #[rstest]
    #[case(NaturalFileType::Lda, false, true)]
    #[case(NaturalFileType::Pda, false, true)]
    #[case(NaturalFileType::Copycode, false, true)]
    #[case(NaturalFileType::Function, false, true)]
    #[case(NaturalFileType::Subprogram, false, false)]
    #[case(NaturalFileType::Subprogram, true, true)]
    #[case(NaturalFileType::Subroutine, true, true)]
    #[case(NaturalFileType::Program, true, false)]
    #[case(NaturalFileType::Map, false, false)]
    fn test_requires_caller_reparse(
        #[case] file_type: NaturalFileType,
        #[case] parameter_using: bool,
        #[case] expected: bool,
    ) {
        let module = module(file_type, parameter_using);
        assert_eq!(requires_caller_reparse(file_type, &module), expected);
    }
}
