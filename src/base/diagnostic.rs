//! Diagnostic types shared by the lexer, the parser and the workspace.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::position::Span;

// ============================================================================
// DIAGNOSTIC TYPES
// ============================================================================

/// Severity level of a diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Error,
    Warning,
    Info,
    Hint,
}

impl Severity {
    /// Convert to LSP severity number.
    pub fn to_lsp(&self) -> u32 {
        match self {
            Severity::Error => 1,
            Severity::Warning => 2,
            Severity::Info => 3,
            Severity::Hint => 4,
        }
    }

    /// Parse a configuration value (`error`, `warning`, `info`, `hint`).
    pub fn from_config(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "error" => Some(Severity::Error),
            "warning" | "warn" => Some(Severity::Warning),
            "info" | "information" => Some(Severity::Info),
            "hint" => Some(Severity::Hint),
            _ => None,
        }
    }
}

/// The subsystem that produced a diagnostic.
///
/// Each tool owns its own partition on a module file, so a reparse only
/// replaces what the parser reported.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticTool {
    Parser,
    Linter,
    TestRunner,
    Catalog,
}

impl DiagnosticTool {
    pub const ALL: [DiagnosticTool; 4] = [
        DiagnosticTool::Parser,
        DiagnosticTool::Linter,
        DiagnosticTool::TestRunner,
        DiagnosticTool::Catalog,
    ];
}

/// Physical location of a diagnostic raised inside included source
/// (a copy-code) while it was reported on the including file.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct OriginalLocation {
    pub file: PathBuf,
    pub span: Span,
}

/// A diagnostic message with location.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Diagnostic {
    /// The file this diagnostic is reported on.
    pub file: PathBuf,
    /// Range in `file` (0-indexed).
    pub span: Span,
    /// Severity level.
    pub severity: Severity,
    /// Rule id (e.g., "E0001").
    pub code: Arc<str>,
    /// The diagnostic message.
    pub message: Arc<str>,
    /// Where the problem physically is, if that differs from `file`.
    pub original: Option<OriginalLocation>,
}

impl Diagnostic {
    pub fn new(
        file: impl Into<PathBuf>,
        span: Span,
        severity: Severity,
        code: &str,
        message: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            file: file.into(),
            span,
            severity,
            code: Arc::from(code),
            message: message.into(),
            original: None,
        }
    }

    /// Create a new error diagnostic.
    pub fn error(
        file: impl Into<PathBuf>,
        span: Span,
        code: &str,
        message: impl Into<Arc<str>>,
    ) -> Self {
        Self::new(file, span, Severity::Error, code, message)
    }

    /// Create a new warning diagnostic.
    pub fn warning(
        file: impl Into<PathBuf>,
        span: Span,
        code: &str,
        message: impl Into<Arc<str>>,
    ) -> Self {
        Self::new(file, span, Severity::Warning, code, message)
    }

    /// Mark this diagnostic as physically located in another file.
    pub fn with_original(mut self, file: impl Into<PathBuf>, span: Span) -> Self {
        self.original = Some(OriginalLocation {
            file: file.into(),
            span,
        });
        self
    }

    /// Override the severity.
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// The file whose path patterns govern this diagnostic's policy.
    pub fn physical_file(&self) -> &Path {
        self.original
            .as_ref()
            .map(|o| o.file.as_path())
            .unwrap_or(self.file.as_path())
    }
}

// ============================================================================
// DIAGNOSTIC CODES
// ============================================================================

/// Standard diagnostic codes.
///
/// ## Code Ranges
///
/// - **L0001-L0099**: Lexical errors
/// - **E0001-E0099**: Parse and resolution errors
#[allow(dead_code)]
pub mod codes {
    /// Character that starts no token.
    pub const UNRECOGNIZED_CHARACTER: &str = "L0001";
    /// String literal not closed before end of line.
    pub const UNTERMINATED_STRING: &str = "L0002";

    /// Variable reference with no declaration in scope.
    pub const UNRESOLVED_REFERENCE: &str = "E0001";
    /// `USING` of a data area that cannot be found.
    pub const UNRESOLVED_DATA_AREA: &str = "E0002";
    /// `CALLNAT`/`FETCH`/function target that cannot be found.
    pub const UNRESOLVED_MODULE: &str = "E0003";
    /// `PERFORM` of a subroutine defined neither locally nor externally.
    pub const UNRESOLVED_SUBROUTINE: &str = "E0004";
    /// `INCLUDE` of a copy-code that cannot be found.
    pub const UNRESOLVED_COPYCODE: &str = "E0005";
    /// `DEFINE DATA` without `END-DEFINE`.
    pub const MISSING_END_DEFINE: &str = "E0006";
    /// Data declaration level outside 1..=99.
    pub const INVALID_LEVEL: &str = "E0007";
    /// The parser failed internally.
    pub const PARSER_FAULT: &str = "E0099";
}
