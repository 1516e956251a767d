//! Error types for project loading.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading a project.
#[derive(Debug, Error)]
pub enum ProjectError {
    /// The project root does not exist or is not a directory.
    #[error("project root not found: {}", .0.display())]
    RootNotFound(PathBuf),

    /// IO error while reading project configuration.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed build manifest.
    #[error("invalid build manifest {}: {source}", .path.display())]
    Manifest {
        path: PathBuf,
        #[source]
        source: ManifestError,
    },

    /// The indexing thread pool could not be created.
    #[error("thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl ProjectError {
    /// Create a manifest error.
    pub fn manifest(path: impl Into<PathBuf>, source: ManifestError) -> Self {
        Self::Manifest {
            path: path.into(),
            source,
        }
    }
}

/// Errors from reading the build manifest's XML.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// Ill-formed XML, or text that does not unescape.
    #[error("XML error at position {position}: {source}")]
    Xml {
        position: u64,
        #[source]
        source: quick_xml::Error,
    },
}
