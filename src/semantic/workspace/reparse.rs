//! The single parse entry point behind every lifecycle event.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use tracing::warn;

use crate::base::{Diagnostic, Span, codes};
use crate::parser::tokenize;
use crate::syntax::{FileIdentity, ModuleParser, ModuleProvider, NaturalModule};

/// Lex and parse `source`, never failing.
///
/// Lexical diagnostics come first, followed by the parser's. A parser error
/// or panic yields an empty module that still carries the file's identity,
/// plus exactly one diagnostic at the start of the file.
pub fn reparse(
    identity: &FileIdentity,
    source: &str,
    parser: &dyn ModuleParser,
    provider: &dyn ModuleProvider,
) -> (NaturalModule, Vec<Diagnostic>) {
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        let lexed = tokenize(source, &identity.path);
        parser
            .parse(identity, &lexed, provider)
            .map(|outcome| (outcome, lexed.diagnostics))
    }));

    match result {
        Ok(Ok((outcome, mut diagnostics))) => {
            diagnostics.extend(outcome.diagnostics);
            (outcome.module, diagnostics)
        }
        Ok(Err(fault)) => faulted(identity, fault.to_string()),
        Err(payload) => faulted(identity, format!("parser panicked: {}", panic_message(&*payload))),
    }
}

/// A degraded module and its single fault diagnostic
pub fn faulted(identity: &FileIdentity, message: String) -> (NaturalModule, Vec<Diagnostic>) {
    warn!("{}: {}", identity.path.display(), message);
    let diagnostic = Diagnostic::error(
        &identity.path,
        Span::default(),
        codes::PARSER_FAULT,
        message,
    );
    (NaturalModule::degraded(identity), vec![diagnostic])
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown payload".to_string()
    }
}
