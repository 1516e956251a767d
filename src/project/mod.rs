//! Project loading: build manifest, severity configuration and the
//! directory walk that creates the workspace's module files.

pub mod editorconfig;
mod error;
pub mod file_loader;
pub mod manifest;
pub mod workspace_loader;

pub use editorconfig::{load_severity_overrides, parse_severity_overrides};
pub use error::{ManifestError, ProjectError};
pub use manifest::BuildManifest;
pub use workspace_loader::WorkspaceLoader;

#[cfg(test)]
mod tests;
