// Parsed module model and the parser seam
pub mod module;
pub mod parser;
pub mod traits;

pub use module::{
    CallTarget, DataScope, FileIdentity, NaturalModule, Statement, SymbolTable, UsingClause,
    Variable,
};
pub use parser::NaturalParser;
pub use traits::{ModuleParser, ModuleProvider, NoModules, ParseFault, ParseOutcome};

// Re-export Position and Span from base for convenience
pub use crate::base::{Position, Span};
