//! Foundation types for the natls toolchain.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`Position`], [`Span`], [`FilePosition`] - 0-indexed source locations
//! - [`NaturalFileType`] - Natural object kinds by extension
//! - [`Diagnostic`], [`Severity`], [`DiagnosticTool`] - reported problems
//! - Domain constants (library layout, manifest names)
//!
//! This module has NO dependencies on other natls modules.

pub mod constants;
mod diagnostic;
mod file_type;
mod position;

pub use diagnostic::{Diagnostic, DiagnosticTool, OriginalLocation, Severity, codes};
pub use file_type::NaturalFileType;
pub use position::{FilePosition, Position, Span};

// Re-export text-size types for convenience
pub use text_size::{TextRange, TextSize};
