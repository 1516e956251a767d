//! Logos-based lexer for Natural
//!
//! Produces positioned tokens plus lexical diagnostics. Trivia is consumed
//! for position tracking but not emitted. The lexer never aborts: anything
//! it does not recognise becomes an `ERROR` token with a diagnostic.

use std::path::Path;

use logos::Logos;
use smol_str::SmolStr;
use text_size::TextSize;

use super::syntax_kind::SyntaxKind;
use crate::base::{Diagnostic, Span, codes};

/// A token with its kind, text and 0-indexed position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: SyntaxKind,
    pub text: SmolStr,
    pub line: usize,
    pub column: usize,
    pub offset: TextSize,
}

impl Token {
    /// The range covered by this token (tokens never span lines)
    pub fn span(&self) -> Span {
        Span::on_line(self.line, self.column, self.text.chars().count())
    }

    /// Whether `next` starts exactly where this token ends
    pub fn is_adjacent_to(&self, next: &Token) -> bool {
        self.offset + TextSize::of(self.text.as_str()) == next.offset
    }

    /// Upper-cased text, the canonical form of Natural names
    pub fn normalized(&self) -> SmolStr {
        SmolStr::new(self.text.to_ascii_uppercase())
    }

    /// Content of a string literal without quotes, `''` unescaped
    pub fn string_value(&self) -> Option<SmolStr> {
        if self.kind != SyntaxKind::STRING || self.text.len() < 2 {
            return None;
        }
        let quote = self.text.chars().next()?;
        let inner = &self.text[1..self.text.len() - 1];
        let doubled: String = [quote, quote].iter().collect();
        Some(SmolStr::new(inner.replace(&doubled, &quote.to_string())))
    }
}

/// Result of tokenizing one file
#[derive(Debug, Clone, Default)]
pub struct Lexed {
    pub tokens: Vec<Token>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Tokenize an entire source file
pub fn tokenize(source: &str, path: &Path) -> Lexed {
    let mut lexer = LogosToken::lexer(source);
    let mut lexed = Lexed::default();
    let mut line = 0usize;
    let mut line_start = 0usize;
    let mut first_on_line = true;

    while let Some(result) = lexer.next() {
        let range = lexer.span();
        let text = lexer.slice();
        let column = source[line_start..range.start].chars().count();

        let kind = match result {
            Ok(LogosToken::Newline) => {
                line += 1;
                line_start = range.end;
                first_on_line = true;
                continue;
            }
            Ok(LogosToken::Whitespace) | Ok(LogosToken::LineComment) => continue,
            Ok(LogosToken::Star) if first_on_line && opens_star_comment(lexer.remainder()) => {
                let rest = lexer.remainder();
                let len = rest.find(['\r', '\n']).unwrap_or(rest.len());
                lexer.bump(len);
                continue;
            }
            Ok(LogosToken::UnterminatedString) => {
                lexed.diagnostics.push(Diagnostic::error(
                    path,
                    Span::on_line(line, column, text.chars().count()),
                    codes::UNTERMINATED_STRING,
                    "unterminated string literal",
                ));
                SyntaxKind::ERROR
            }
            Ok(LogosToken::Ident) => SyntaxKind::from_keyword(text).unwrap_or(SyntaxKind::IDENT),
            Ok(t) => t.into(),
            Err(()) => {
                lexed.diagnostics.push(Diagnostic::error(
                    path,
                    Span::on_line(line, column, text.chars().count()),
                    codes::UNRECOGNIZED_CHARACTER,
                    format!("unrecognized character '{}'", text),
                ));
                SyntaxKind::ERROR
            }
        };

        first_on_line = false;
        lexed.tokens.push(Token {
            kind,
            text: SmolStr::new(text),
            line,
            column,
            offset: TextSize::new(range.start as u32),
        });
    }

    lexed
}

/// A `*` that starts a line opens a comment when followed by blank, `*` or end of line
fn opens_star_comment(rest: &str) -> bool {
    matches!(
        rest.chars().next(),
        None | Some(' ') | Some('\t') | Some('*') | Some('\r') | Some('\n')
    )
}

/// Logos token enum - maps to SyntaxKind
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
enum LogosToken {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    #[regex(r"[ \t\f\r]+")]
    Whitespace,

    #[regex(r"\r?\n")]
    Newline,

    #[regex(r"/\*[^\n]*")]
    LineComment,

    // =========================================================================
    // LITERALS
    // =========================================================================
    #[regex(r"[A-Za-z#&][A-Za-z0-9_#@$&\-]*")]
    #[regex(r"\+[A-Za-z#][A-Za-z0-9_#@$&\-]*")]
    Ident,

    #[regex(r"[0-9]+")]
    Integer,

    #[regex(r"[0-9]*\.[0-9]+")]
    Decimal,

    #[regex(r"'([^'\n]|'')*'")]
    #[regex(r#""[^"\n]*""#)]
    String,

    #[regex(r"'([^'\n]|'')*")]
    #[regex(r#""[^"\n]*"#)]
    UnterminatedString,

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("=")]
    Eq,
    #[token(",")]
    Comma,
    #[token(":")]
    Colon,
    #[token(";")]
    Semicolon,
    #[token(".")]
    Dot,
    #[token("*")]
    Star,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("/")]
    Slash,
}

impl From<LogosToken> for SyntaxKind {
    fn from(token: LogosToken) -> Self {
        use LogosToken::*;
        match token {
            Whitespace => SyntaxKind::WHITESPACE,
            Newline => SyntaxKind::NEWLINE,
            LineComment => SyntaxKind::COMMENT,
            Ident => SyntaxKind::IDENT,
            Integer => SyntaxKind::INTEGER,
            Decimal => SyntaxKind::DECIMAL,
            String => SyntaxKind::STRING,
            UnterminatedString => SyntaxKind::ERROR,
            LParen => SyntaxKind::L_PAREN,
            RParen => SyntaxKind::R_PAREN,
            LBracket => SyntaxKind::L_BRACKET,
            RBracket => SyntaxKind::R_BRACKET,
            Lt => SyntaxKind::LT,
            Gt => SyntaxKind::GT,
            Eq => SyntaxKind::EQ,
            Comma => SyntaxKind::COMMA,
            Colon => SyntaxKind::COLON,
            Semicolon => SyntaxKind::SEMICOLON,
            Dot => SyntaxKind::DOT,
            Star => SyntaxKind::STAR,
            Plus => SyntaxKind::PLUS,
            Minus => SyntaxKind::MINUS,
            Slash => SyntaxKind::SLASH,
        }
    }
}
