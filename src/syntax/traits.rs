//! Seams between the module graph and the parser.

use std::sync::Arc;

use thiserror::Error;

use super::module::{FileIdentity, NaturalModule};
use crate::base::Diagnostic;
use crate::parser::Lexed;

/// Resolves other modules for the parser without exposing graph internals.
///
/// Implementations honour the steplib chain of `library` and may parse the
/// target lazily. A returned module is an immutable snapshot.
pub trait ModuleProvider {
    fn find_module(&self, referable_name: &str, library: &str) -> Option<Arc<NaturalModule>>;
}

/// Output of a successful parse.
#[derive(Debug, Clone)]
pub struct ParseOutcome {
    pub module: NaturalModule,
    pub diagnostics: Vec<Diagnostic>,
}

/// An internal parser failure. Never escapes the module file boundary.
#[derive(Debug, Clone, Error)]
#[error("parser fault: {message}")]
pub struct ParseFault {
    pub message: String,
}

impl ParseFault {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Turns tokens into a module, resolving cross-file names through `provider`.
pub trait ModuleParser: Send + Sync {
    fn parse(
        &self,
        identity: &FileIdentity,
        lexed: &Lexed,
        provider: &dyn ModuleProvider,
    ) -> Result<ParseOutcome, ParseFault>;
}

/// A provider that knows no modules. Useful for parsing a file in isolation.
pub struct NoModules;

impl ModuleProvider for NoModules {
    fn find_module(&self, _referable_name: &str, _library: &str) -> Option<Arc<NaturalModule>> {
        None
    }
}
