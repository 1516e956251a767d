//! IDE request tests
//!
//! Tests for:
//! - Find references
//! - Rename preparation
//! - Go to module

pub mod tests_goto;
pub mod tests_references;
