//! # Workspace
//!
//! The module graph of a Natural project: libraries with their steplib
//! chains, one [`ModuleFile`] per source file, and the call edges between
//! them.
//!
//! Edges come from two places. The reference scanner registers provisional
//! edges for every file during indexing; a real parse then replaces the
//! file's outgoing edges with what the parser resolved and evicts its
//! provisional cache entries. Edits reparse the file and, depending on the
//! [`ParseStrategy`], its direct callers.

mod accessors;
mod core;
mod events;
mod file;
mod file_manager;
mod library;
mod population;
mod provider;
mod reparse;
mod strategy;

pub use self::core::Workspace;
pub use file::{ModuleFile, ModuleState};
pub use library::Library;
pub use population::IndexingSummary;
pub use provider::WorkspaceModuleProvider;
pub use reparse::reparse;
pub use strategy::{ParseStrategy, ReparseReport, requires_caller_reparse};

#[cfg(test)]
mod tests;
