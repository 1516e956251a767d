//! End-to-end tests over projects loaded from disk
//!
//! Tests for:
//! - Module graph maintenance across lifecycle events
//! - Steplib resolution
//! - Severity configuration

pub mod tests_graph;
pub mod tests_severity;
