//! Reference parser for Natural modules.
//!
//! Covers the constructs that create cross-module dependencies (`DEFINE DATA`
//! with `USING`, `PERFORM`, `CALLNAT`, `FETCH`, `INCLUDE`, function calls) and
//! checks `#` variable references against declared and imported data. Any
//! other statement is skipped token by token.

use std::sync::Arc;

use rustc_hash::{FxHashMap, FxHashSet};
use smol_str::SmolStr;
use tracing::trace;

use super::module::{
    CallTarget, DataScope, FileIdentity, NaturalModule, Statement, SymbolTable, UsingClause,
    Variable,
};
use super::traits::{ModuleParser, ModuleProvider, ParseFault, ParseOutcome};
use crate::base::{Diagnostic, NaturalFileType, Span, codes};
use crate::parser::{Lexed, SyntaxKind, Token};

/// The built-in [`ModuleParser`].
#[derive(Debug, Clone, Copy, Default)]
pub struct NaturalParser;

impl NaturalParser {
    pub fn new() -> Self {
        Self
    }
}

impl ModuleParser for NaturalParser {
    fn parse(
        &self,
        identity: &FileIdentity,
        lexed: &Lexed,
        provider: &dyn ModuleProvider,
    ) -> Result<ParseOutcome, ParseFault> {
        let mut parser = Parser::new(identity, &lexed.tokens);
        parser.parse_tokens();
        Ok(parser.finish(provider))
    }
}

struct Parser<'a> {
    identity: &'a FileIdentity,
    tokens: &'a [Token],
    pos: usize,
    tree: Vec<Statement>,
    symbols: SymbolTable,
    usings: Vec<UsingClause>,
    local_subroutines: FxHashSet<SmolStr>,
    performs: Vec<usize>,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Parser<'a> {
    fn new(identity: &'a FileIdentity, tokens: &'a [Token]) -> Self {
        Self {
            identity,
            tokens,
            pos: 0,
            tree: Vec::new(),
            symbols: SymbolTable::new(),
            usings: Vec::new(),
            local_subroutines: FxHashSet::default(),
            performs: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    // ==================== Token cursor ====================

    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn nth(&self, n: usize) -> Option<&'a Token> {
        self.tokens.get(self.pos + n)
    }

    fn at(&self, kind: SyntaxKind) -> bool {
        self.peek().is_some_and(|t| t.kind == kind)
    }

    fn bump(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.pos);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, kind: SyntaxKind) -> Option<&'a Token> {
        if self.at(kind) { self.bump() } else { None }
    }

    fn starts_line(&self, pos: usize) -> bool {
        pos == 0 || self.tokens[pos - 1].line != self.tokens[pos].line
    }

    // ==================== Statements ====================

    fn parse_tokens(&mut self) {
        while let Some(token) = self.peek() {
            match token.kind {
                SyntaxKind::DEFINE_KW => self.parse_define(),
                SyntaxKind::PERFORM_KW => self.parse_perform(),
                SyntaxKind::CALLNAT_KW => {
                    self.parse_call(|target, span| Statement::Callnat { target, span })
                }
                SyntaxKind::FETCH_KW => {
                    self.parse_call(|target, span| Statement::Fetch { target, span })
                }
                SyntaxKind::INCLUDE_KW => self.parse_include(),
                SyntaxKind::IDENT => self.parse_identifier(),
                _ => {
                    self.bump();
                }
            }
        }
    }

    fn parse_define(&mut self) {
        let Some(define) = self.bump() else { return };
        match self.peek().map(|t| t.kind) {
            Some(SyntaxKind::DATA_KW) => self.parse_define_data(define),
            Some(SyntaxKind::SUBROUTINE_KW) => {
                self.bump();
                if let Some(name) = self.eat(SyntaxKind::IDENT) {
                    let name_text = name.normalized();
                    self.local_subroutines.insert(name_text.clone());
                    self.tree.push(Statement::DefineSubroutine {
                        name: name_text,
                        span: Span::new(define.span().start, name.span().end),
                    });
                }
            }
            Some(SyntaxKind::FUNCTION_KW) => {
                self.bump();
                self.eat(SyntaxKind::IDENT);
            }
            _ => {}
        }
    }

    fn parse_define_data(&mut self, define: &'a Token) {
        self.bump(); // DATA
        let mut scope = DataScope::Local;
        let mut groups: Vec<(u8, SmolStr)> = Vec::new();

        loop {
            let Some(token) = self.peek() else {
                self.diagnostics.push(Diagnostic::error(
                    &self.identity.path,
                    define.span(),
                    codes::MISSING_END_DEFINE,
                    "DEFINE DATA is missing END-DEFINE",
                ));
                break;
            };

            match token.kind {
                SyntaxKind::END_DEFINE_KW => {
                    self.bump();
                    break;
                }
                SyntaxKind::LOCAL_KW
                | SyntaxKind::PARAMETER_KW
                | SyntaxKind::GLOBAL_KW
                | SyntaxKind::INDEPENDENT_KW => {
                    scope = match token.kind {
                        SyntaxKind::PARAMETER_KW => DataScope::Parameter,
                        SyntaxKind::GLOBAL_KW => DataScope::Global,
                        SyntaxKind::INDEPENDENT_KW => DataScope::Independent,
                        _ => DataScope::Local,
                    };
                    groups.clear();
                    self.bump();
                }
                SyntaxKind::USING_KW => {
                    self.bump();
                    if let Some(name) = self.eat(SyntaxKind::IDENT) {
                        self.usings.push(UsingClause {
                            name: name.normalized(),
                            scope,
                            span: name.span(),
                        });
                    }
                }
                SyntaxKind::INTEGER
                    if self.starts_line(self.pos)
                        && self.nth(1).is_some_and(|t| t.kind == SyntaxKind::IDENT) =>
                {
                    let level = token.text.parse::<u8>().ok().filter(|l| (1..=99).contains(l));
                    self.bump();
                    let Some(name) = self.bump() else { break };
                    let Some(level) = level else {
                        self.diagnostics.push(Diagnostic::error(
                            &self.identity.path,
                            Span::new(token.span().start, name.span().end),
                            codes::INVALID_LEVEL,
                            format!("invalid level number '{}' for {}", token.text, name.text),
                        ));
                        continue;
                    };
                    while groups.last().is_some_and(|(l, _)| *l >= level) {
                        groups.pop();
                    }
                    let qualified_name = match groups.last() {
                        Some((_, group)) => SmolStr::new(format!("{}.{}", group, name.text)),
                        None => name.text.clone(),
                    };
                    self.symbols.insert(Variable {
                        name: name.text.clone(),
                        qualified_name,
                        level,
                        scope,
                        span: name.span(),
                    });
                    groups.push((level, name.text.clone()));
                }
                _ => {
                    self.bump();
                }
            }
        }

        self.tree.push(Statement::DefineData {
            span: define.span(),
        });
    }

    fn parse_perform(&mut self) {
        let Some(perform) = self.bump() else { return };
        if let Some(name) = self.eat(SyntaxKind::IDENT) {
            // Classified once every DEFINE SUBROUTINE has been seen
            self.performs.push(self.tree.len());
            self.tree.push(Statement::Perform {
                name: name.normalized(),
                span: Span::new(perform.span().start, name.span().end),
                external: false,
            });
        }
    }

    fn parse_call(&mut self, make: impl FnOnce(CallTarget, Span) -> Statement) {
        let Some(keyword) = self.bump() else { return };
        if keyword.kind == SyntaxKind::FETCH_KW && self.eat(SyntaxKind::RETURN_KW).is_none() {
            self.eat(SyntaxKind::REPEAT_KW);
        }
        let Some(target) = self.peek() else { return };
        let call_target = match target.kind {
            SyntaxKind::STRING => match target.string_value() {
                Some(name) => CallTarget::Literal(SmolStr::new(name.to_ascii_uppercase())),
                None => return,
            },
            SyntaxKind::IDENT => CallTarget::Variable(target.text.clone()),
            _ => return,
        };
        self.bump();
        self.tree
            .push(make(call_target, Span::new(keyword.span().start, target.span().end)));
    }

    fn parse_include(&mut self) {
        let Some(include) = self.bump() else { return };
        if let Some(name) = self.eat(SyntaxKind::IDENT) {
            self.tree.push(Statement::Include {
                name: name.normalized(),
                span: Span::new(include.span().start, name.span().end),
            });
        }
    }

    fn parse_identifier(&mut self) {
        let Some(ident) = self.bump() else { return };
        let is_function_call = !ident.text.starts_with('#')
            && matches!(
                (self.nth(0), self.nth(1)),
                (Some(lparen), Some(lt))
                    if lparen.kind == SyntaxKind::L_PAREN
                        && lt.kind == SyntaxKind::LT
                        && ident.is_adjacent_to(lparen)
                        && lparen.is_adjacent_to(lt)
            );

        if is_function_call {
            self.tree.push(Statement::FunctionCall {
                name: ident.normalized(),
                span: ident.span(),
            });
        } else if ident.text.starts_with('#') {
            self.tree.push(Statement::VariableReference {
                name: ident.text.clone(),
                span: ident.span(),
            });
        }
    }

    // ==================== Resolution ====================

    fn finish(mut self, provider: &dyn ModuleProvider) -> ParseOutcome {
        for &index in &self.performs {
            if let Some(Statement::Perform { name, external, .. }) = self.tree.get_mut(index) {
                *external = !self.local_subroutines.contains(name);
            }
        }

        let identity = self.identity;
        let mut resolver = Resolver {
            provider,
            library: &identity.library,
            resolved: FxHashMap::default(),
        };
        let path = &identity.path;

        let mut imported = Vec::new();
        let mut imports_complete = true;
        for using in &self.usings {
            match resolver.resolve(&using.name) {
                Some(module) if module.pending => imports_complete = false,
                Some(module) => imported.push(module),
                None => {
                    imports_complete = false;
                    self.diagnostics.push(Diagnostic::error(
                        path,
                        using.span,
                        codes::UNRESOLVED_DATA_AREA,
                        format!("unresolved data area: '{}'", using.name),
                    ));
                }
            }
        }

        let mut included = Vec::new();
        for statement in &self.tree {
            let (name, span, code, what) = match statement {
                Statement::Perform {
                    name,
                    span,
                    external: true,
                } => (name, *span, codes::UNRESOLVED_SUBROUTINE, "subroutine"),
                Statement::Callnat {
                    target: CallTarget::Literal(name),
                    span,
                }
                | Statement::Fetch {
                    target: CallTarget::Literal(name),
                    span,
                } => (name, *span, codes::UNRESOLVED_MODULE, "module"),
                Statement::FunctionCall { name, span } => {
                    (name, *span, codes::UNRESOLVED_MODULE, "function")
                }
                Statement::Include { name, span } => {
                    match resolver.resolve(name) {
                        Some(copycode) if copycode.pending => imports_complete = false,
                        Some(copycode) => included.push((copycode, *span)),
                        None => self.diagnostics.push(Diagnostic::error(
                            path,
                            *span,
                            codes::UNRESOLVED_COPYCODE,
                            format!("unresolved copycode: '{}'", name),
                        )),
                    }
                    continue;
                }
                _ => continue,
            };
            if resolver.resolve(name).is_none() {
                self.diagnostics.push(Diagnostic::error(
                    path,
                    span,
                    code,
                    format!("unresolved {}: '{}'", what, name),
                ));
            }
        }

        // Copycodes are checked in the context of each including module
        if identity.file_type != NaturalFileType::Copycode && imports_complete {
            let symbols = &self.symbols;
            let in_scope = |name: &str| {
                symbols.contains(name) || imported.iter().any(|m| m.symbols.contains(name))
            };

            for statement in &self.tree {
                if let Statement::VariableReference { name, span } = statement {
                    if !in_scope(name) {
                        self.diagnostics.push(Diagnostic::error(
                            path,
                            *span,
                            codes::UNRESOLVED_REFERENCE,
                            format!("unresolved reference: '{}'", name),
                        ));
                    }
                }
            }

            for (copycode, include_span) in &included {
                for (name, span) in copycode.variable_references() {
                    if !in_scope(name) {
                        self.diagnostics.push(
                            Diagnostic::error(
                                path,
                                *include_span,
                                codes::UNRESOLVED_REFERENCE,
                                format!("unresolved reference: '{}'", name),
                            )
                            .with_original(copycode.path(), span),
                        );
                    }
                }
            }
        }

        trace!(
            "parsed {}: {} statements, {} symbols, {} diagnostics",
            path.display(),
            self.tree.len(),
            self.symbols.len(),
            self.diagnostics.len()
        );

        ParseOutcome {
            module: NaturalModule {
                path: identity.path.clone(),
                file_type: identity.file_type,
                referable_name: identity.referable_name.clone(),
                tree: self.tree,
                symbols: self.symbols,
                usings: self.usings,
                pending: false,
            },
            diagnostics: self.diagnostics,
        }
    }
}

/// Memoizes provider lookups for the duration of one parse
struct Resolver<'p> {
    provider: &'p dyn ModuleProvider,
    library: &'p str,
    resolved: FxHashMap<SmolStr, Option<Arc<NaturalModule>>>,
}

impl Resolver<'_> {
    fn resolve(&mut self, name: &SmolStr) -> Option<Arc<NaturalModule>> {
        if let Some(hit) = self.resolved.get(name) {
            return hit.clone();
        }
        let module = self.provider.find_module(name, self.library);
        self.resolved.insert(name.clone(), module.clone());
        module
    }
}
