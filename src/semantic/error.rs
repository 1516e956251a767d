//! Error types for module file access.

use std::path::PathBuf;

use thiserror::Error;

/// Reading a module from a file in a state that has none.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModuleStateError {
    /// The file has not been parsed yet.
    #[error("module not parsed: {0}")]
    NotParsed(PathBuf),

    /// The file was closed and its module released.
    #[error("module closed: {0}")]
    Closed(PathBuf),

    /// The file no longer exists in the project.
    #[error("module deleted: {0}")]
    Deleted(PathBuf),
}
