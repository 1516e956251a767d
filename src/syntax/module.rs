//! Parsed Natural module: statement tree and declared symbols.
//!
//! This is deliberately an AST-lite: only the statements that matter for
//! cross-module resolution are represented.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use smol_str::SmolStr;

use crate::base::{NaturalFileType, Position, Span};

/// Identity of a module file as seen by the parser.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileIdentity {
    pub path: PathBuf,
    pub library: SmolStr,
    pub referable_name: SmolStr,
    pub file_type: NaturalFileType,
}

/// Scope a variable or `USING` clause belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataScope {
    Local,
    Parameter,
    Global,
    Independent,
}

/// Target of a `CALLNAT` or `FETCH`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CallTarget {
    /// `CALLNAT 'NAME'` - statically resolvable
    Literal(SmolStr),
    /// `CALLNAT #VAR` - only known at runtime
    Variable(SmolStr),
}

impl CallTarget {
    pub fn literal(&self) -> Option<&SmolStr> {
        match self {
            CallTarget::Literal(name) => Some(name),
            CallTarget::Variable(_) => None,
        }
    }
}

/// Statements relevant to cross-module resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    DefineData {
        span: Span,
    },
    DefineSubroutine {
        name: SmolStr,
        span: Span,
    },
    Perform {
        name: SmolStr,
        span: Span,
        external: bool,
    },
    Callnat {
        target: CallTarget,
        span: Span,
    },
    Fetch {
        target: CallTarget,
        span: Span,
    },
    Include {
        name: SmolStr,
        span: Span,
    },
    FunctionCall {
        name: SmolStr,
        span: Span,
    },
    VariableReference {
        name: SmolStr,
        span: Span,
    },
}

impl Statement {
    pub fn span(&self) -> Span {
        match self {
            Statement::DefineData { span }
            | Statement::DefineSubroutine { span, .. }
            | Statement::Perform { span, .. }
            | Statement::Callnat { span, .. }
            | Statement::Fetch { span, .. }
            | Statement::Include { span, .. }
            | Statement::FunctionCall { span, .. }
            | Statement::VariableReference { span, .. } => *span,
        }
    }

    /// Name of the module this statement refers to, if it refers to one
    pub fn referenced_module(&self) -> Option<&SmolStr> {
        match self {
            Statement::Perform {
                name,
                external: true,
                ..
            } => Some(name),
            Statement::Callnat { target, .. } | Statement::Fetch { target, .. } => {
                target.literal()
            }
            Statement::Include { name, .. } | Statement::FunctionCall { name, .. } => Some(name),
            Statement::DefineData { .. }
            | Statement::DefineSubroutine { .. }
            | Statement::Perform { .. }
            | Statement::VariableReference { .. } => None,
        }
    }
}

/// A `LOCAL USING LDA` style import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsingClause {
    pub name: SmolStr,
    pub scope: DataScope,
    pub span: Span,
}

/// A declared variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    pub name: SmolStr,
    /// `#GROUP.#NAME` for grouped fields, same as `name` on level 1
    pub qualified_name: SmolStr,
    pub level: u8,
    pub scope: DataScope,
    pub span: Span,
}

/// Variables declared by a module, keyed by upper-cased simple name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolTable {
    variables: IndexMap<SmolStr, Variable>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a variable; the first declaration of a name wins
    pub fn insert(&mut self, variable: Variable) {
        let key = SmolStr::new(variable.name.to_ascii_uppercase());
        self.variables.entry(key).or_insert(variable);
    }

    pub fn lookup(&self, name: &str) -> Option<&Variable> {
        self.variables.get(name.to_ascii_uppercase().as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Variable> {
        self.variables.values()
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

/// A parsed Natural module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NaturalModule {
    pub path: PathBuf,
    pub file_type: NaturalFileType,
    pub referable_name: SmolStr,
    pub tree: Vec<Statement>,
    pub symbols: SymbolTable,
    pub usings: Vec<UsingClause>,
    /// Stands in for a module whose parse is still running; its content is unknown
    pub pending: bool,
}

impl NaturalModule {
    /// An empty module standing in for a file whose parse failed.
    ///
    /// Keeps the file resolvable by name so references to it do not cascade-fail.
    pub fn degraded(identity: &FileIdentity) -> Self {
        Self {
            path: identity.path.clone(),
            file_type: identity.file_type,
            referable_name: identity.referable_name.clone(),
            tree: Vec::new(),
            symbols: SymbolTable::new(),
            usings: Vec::new(),
            pending: false,
        }
    }

    /// A placeholder for a file that is being parsed right now.
    ///
    /// Resolvable by name, but nothing may be concluded from its symbols.
    pub fn placeholder(identity: &FileIdentity) -> Self {
        Self {
            pending: true,
            ..Self::degraded(identity)
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Names of every module this one depends on, including `USING` imports.
    pub fn referenced_modules(&self) -> impl Iterator<Item = &SmolStr> {
        self.usings
            .iter()
            .map(|u| &u.name)
            .chain(self.tree.iter().filter_map(Statement::referenced_module))
    }

    /// Statements referencing `referable_name` (case-insensitive)
    pub fn references_to<'a>(&'a self, referable_name: &'a str) -> impl Iterator<Item = Span> + 'a {
        let usings = self
            .usings
            .iter()
            .filter(move |u| u.name.eq_ignore_ascii_case(referable_name))
            .map(|u| u.span);
        let statements = self
            .tree
            .iter()
            .filter(move |s| {
                s.referenced_module()
                    .is_some_and(|n| n.eq_ignore_ascii_case(referable_name))
            })
            .map(Statement::span);
        usings.chain(statements)
    }

    /// The referenced module name under a cursor position
    pub fn module_reference_at(&self, position: Position) -> Option<&SmolStr> {
        self.usings
            .iter()
            .find(|u| u.span.contains(position))
            .map(|u| &u.name)
            .or_else(|| {
                self.tree
                    .iter()
                    .filter(|s| s.span().contains(position))
                    .find_map(Statement::referenced_module)
            })
    }

    /// Whether callers see parameters declared by this module
    pub fn has_parameter_data(&self) -> bool {
        self.symbols.iter().any(|v| v.scope == DataScope::Parameter)
            || self.usings.iter().any(|u| u.scope == DataScope::Parameter)
    }

    pub fn variable_references(&self) -> impl Iterator<Item = (&SmolStr, Span)> {
        self.tree.iter().filter_map(|s| match s {
            Statement::VariableReference { name, span } => Some((name, *span)),
            _ => None,
        })
    }
}
