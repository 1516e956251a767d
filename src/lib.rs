//! # natls-base
//!
//! Core library of a language server for Natural 4GL projects: the source
//! module graph, incremental reparsing and reference resolution.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! ide       → Request boundary (goto, references, rename, indexing)
//!   ↓
//! project   → Build manifest, .editorconfig, workspace loading
//!   ↓
//! semantic  → Workspace, module graph, reference cache, diagnostics
//!   ↓
//! syntax    → Parsed module model, NaturalParser, parser seam traits
//!   ↓
//! parser    → Logos lexer, SyntaxKind
//!   ↓
//! base      → Primitives (Position, Span, file types, Diagnostic)
//! ```

// ============================================================================
// MODULES (dependency order: base → parser → syntax → semantic → project → ide)
// ============================================================================

/// Foundation types: positions, file types, diagnostics
pub mod base;

/// Parser: Logos lexer
pub mod parser;

/// Syntax: parsed modules and the parser seam
pub mod syntax;

/// Semantic model: workspace, module graph, reference cache
pub mod semantic;

/// Project management: manifest, severity overrides, workspace loading
pub mod project;

/// IDE features: goto-module, find-references, rename, indexing
pub mod ide;

// Re-export foundation types
pub use base::{
    Diagnostic, DiagnosticTool, FilePosition, NaturalFileType, Position, Severity, Span,
};

pub use ide::AnalysisHost;
pub use project::{ProjectError, WorkspaceLoader};
pub use semantic::{ModuleFile, ParseStrategy, Workspace};
pub use syntax::{ModuleParser, ModuleProvider, NaturalModule, NaturalParser};
