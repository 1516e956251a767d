//! Logos-based lexer for Natural source
//!
//! ## Architecture
//!
//! ```text
//! Source Text
//!     ↓
//! Lexer (logos) → Tokens with SyntaxKind and 0-indexed positions
//!     ↓
//! Scanner (semantic) → referable name + reference candidates
//! Parser (syntax)    → NaturalModule + diagnostics
//! ```
//!
//! Both consumers share the same token stream, so a file is only
//! tokenized once per read.

mod lexer;
mod syntax_kind;

pub use lexer::{Lexed, Token, tokenize};
pub use syntax_kind::SyntaxKind;
