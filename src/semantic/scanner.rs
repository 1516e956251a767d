//! Lightweight reference scanner.
//!
//! A single forward pass over the token stream that finds the modules a file
//! refers to without building a tree. Used for the initial project-wide
//! indexing pass, where parsing every file would be too slow.

use std::path::Path;

use rustc_hash::FxHashSet;
use smol_str::SmolStr;

use crate::base::{NaturalFileType, Position};
use crate::parser::{SyntaxKind, Token, tokenize};

/// A module name referenced at a position.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReferenceCandidate {
    pub name: SmolStr,
    pub position: Position,
}

/// What the scanner learned about one file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanResult {
    /// Name from a `DEFINE SUBROUTINE`/`DEFINE FUNCTION` header, for file
    /// types whose referable name is not the file stem
    pub referable_name: Option<SmolStr>,
    /// Outgoing module references in discovery order
    pub candidates: Vec<ReferenceCandidate>,
}

/// Tokenize and scan a source text.
pub fn scan_source(source: &str, path: &Path, file_type: NaturalFileType) -> ScanResult {
    let lexed = tokenize(source, path);
    scan_tokens(&lexed.tokens, file_type)
}

/// Scan a token stream for outgoing module references.
pub fn scan_tokens(tokens: &[Token], file_type: NaturalFileType) -> ScanResult {
    let mut scanner = Scanner {
        tokens,
        pos: 0,
        file_type,
        referable_name: None,
        called_modules: Vec::new(),
        defined_subroutines: FxHashSet::default(),
        called_subroutines: Vec::new(),
    };
    scanner.scan();
    scanner.finish()
}

struct Scanner<'a> {
    tokens: &'a [Token],
    pos: usize,
    file_type: NaturalFileType,
    referable_name: Option<SmolStr>,
    called_modules: Vec<ReferenceCandidate>,
    defined_subroutines: FxHashSet<SmolStr>,
    called_subroutines: Vec<ReferenceCandidate>,
}

impl<'a> Scanner<'a> {
    fn peek_kind(&self, n: usize) -> Option<SyntaxKind> {
        self.tokens.get(self.pos + n).map(|t| t.kind)
    }

    fn token(&self, n: usize) -> Option<&'a Token> {
        self.tokens.get(self.pos + n)
    }

    fn scan(&mut self) {
        while let Some(token) = self.token(0) {
            let position = Position::new(token.line, token.column);
            match token.kind {
                SyntaxKind::DEFINE_KW => self.scan_define(),
                SyntaxKind::USING_KW => {
                    // `INPUT USING MAP 'NAME'` is not a data area import
                    if let Some(name) = self.token(1).filter(|t| t.kind == SyntaxKind::IDENT) {
                        self.called_modules.push(ReferenceCandidate {
                            name: name.normalized(),
                            position: Position::new(name.line, name.column),
                        });
                        self.pos += 1;
                    }
                }
                SyntaxKind::PERFORM_KW => {
                    if let Some(name) = self.token(1).filter(|t| t.kind == SyntaxKind::IDENT) {
                        self.called_subroutines.push(ReferenceCandidate {
                            name: name.normalized(),
                            position,
                        });
                        self.pos += 1;
                    }
                }
                SyntaxKind::CALLNAT_KW => self.scan_literal_target(1, position),
                SyntaxKind::FETCH_KW => {
                    let skip = match self.peek_kind(1) {
                        Some(SyntaxKind::RETURN_KW | SyntaxKind::REPEAT_KW) => 2,
                        _ => 1,
                    };
                    self.scan_literal_target(skip, position);
                }
                SyntaxKind::INCLUDE_KW => {
                    if let Some(name) = self.token(1).filter(|t| t.kind == SyntaxKind::IDENT) {
                        self.called_modules.push(ReferenceCandidate {
                            name: name.normalized(),
                            position,
                        });
                        self.pos += 1;
                    }
                }
                SyntaxKind::IDENT if self.at_function_call() => {
                    self.called_modules.push(ReferenceCandidate {
                        name: token.normalized(),
                        position,
                    });
                }
                _ => {}
            }
            self.pos += 1;
        }
    }

    fn scan_define(&mut self) {
        let (Some(kind), Some(name)) = (self.peek_kind(1), self.token(2)) else {
            return;
        };
        if name.kind != SyntaxKind::IDENT {
            return;
        }
        let name_text = name.normalized();
        match kind {
            SyntaxKind::SUBROUTINE_KW => {
                if self.file_type == NaturalFileType::Subroutine && self.referable_name.is_none()
                {
                    self.referable_name = Some(name_text.clone());
                }
                self.defined_subroutines.insert(name_text);
            }
            SyntaxKind::FUNCTION_KW => {
                if self.file_type == NaturalFileType::Function && self.referable_name.is_none() {
                    self.referable_name = Some(name_text);
                }
            }
            _ => return,
        }
        self.pos += 2;
    }

    /// `CALLNAT 'NAME'`; variable targets are not statically resolvable
    fn scan_literal_target(&mut self, offset: usize, position: Position) {
        let Some(target) = self.token(offset) else { return };
        if let Some(name) = target.string_value() {
            self.called_modules.push(ReferenceCandidate {
                name: SmolStr::new(name.to_ascii_uppercase()),
                position,
            });
            self.pos += offset;
        }
    }

    /// `NAME(<` with no blanks in between
    fn at_function_call(&self) -> bool {
        match (self.token(0), self.token(1), self.token(2)) {
            (Some(ident), Some(lparen), Some(lt)) => {
                !ident.text.starts_with('#')
                    && lparen.kind == SyntaxKind::L_PAREN
                    && lt.kind == SyntaxKind::LT
                    && ident.is_adjacent_to(lparen)
                    && lparen.is_adjacent_to(lt)
            }
            _ => false,
        }
    }

    fn finish(self) -> ScanResult {
        let Scanner {
            referable_name,
            mut called_modules,
            defined_subroutines,
            called_subroutines,
            ..
        } = self;

        // A PERFORM may precede its DEFINE SUBROUTINE, so classify only now
        called_modules.extend(
            called_subroutines
                .into_iter()
                .filter(|c| !defined_subroutines.contains(&c.name)),
        );

        ScanResult {
            referable_name,
            candidates: called_modules,
        }
    }
}
