//! # Semantic Analysis
//!
//! Turns a set of Natural source files into a queryable module graph:
//! which file calls which, which module a name resolves to from a given
//! library, and which diagnostics each file currently carries.

pub mod diagnostics;
pub mod error;
pub mod graphs;
pub mod scanner;
pub mod severity;
pub mod workspace;

pub use diagnostics::DiagnosticAggregator;
pub use error::ModuleStateError;
pub use graphs::{ReferenceCache, UnresolvedIndex};
pub use scanner::{ReferenceCandidate, ScanResult, scan_source, scan_tokens};
pub use severity::{SeverityOverride, SeverityOverrides};
pub use workspace::{
    IndexingSummary, Library, ModuleFile, ModuleState, ParseStrategy, ReparseReport, Workspace,
    WorkspaceModuleProvider,
};
