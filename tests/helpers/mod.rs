//! Shared test helpers.

pub mod project_fixture;
