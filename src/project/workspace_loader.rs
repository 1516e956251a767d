use std::path::PathBuf;
use std::sync::Arc;

use smol_str::SmolStr;
use tracing::{debug, warn};

use super::editorconfig::load_severity_overrides;
use super::error::ProjectError;
use super::file_loader::{collect_file_paths, discover_libraries};
use super::manifest::BuildManifest;
use crate::base::constants::{LIBRARIES_DIR, SYSTEM_LIBRARY};
use crate::semantic::{ReferenceCache, Workspace};
use crate::syntax::{ModuleParser, NaturalParser};

/// Builds a [`Workspace`] from a project directory.
///
/// Libraries come from the build manifest (in declaration order) and from
/// the directories below `Natural-Libraries`; libraries missing from the
/// manifest have no steplibs. `SYSTEM` always exists.
pub struct WorkspaceLoader {
    parser: Arc<dyn ModuleParser>,
    reference_cache: Arc<ReferenceCache>,
}

impl WorkspaceLoader {
    pub fn new() -> Self {
        Self {
            parser: Arc::new(NaturalParser::new()),
            reference_cache: Arc::new(ReferenceCache::new()),
        }
    }

    /// Use a different parser implementation
    pub fn with_parser(mut self, parser: Arc<dyn ModuleParser>) -> Self {
        self.parser = parser;
        self
    }

    /// Share an existing reference cache
    pub fn with_reference_cache(mut self, reference_cache: Arc<ReferenceCache>) -> Self {
        self.reference_cache = reference_cache;
        self
    }

    /// Loads the project layout and registers every source file.
    ///
    /// Files are not scanned or parsed here.
    pub fn load<P: Into<PathBuf>>(&self, root: P) -> Result<Workspace, ProjectError> {
        let root = root.into();
        if !root.is_dir() {
            return Err(ProjectError::RootNotFound(root));
        }

        let manifest = BuildManifest::load(&root)?;
        let libraries_dir = root.join(LIBRARIES_DIR);
        let on_disk = discover_libraries(&libraries_dir);

        let mut workspace = Workspace::with_parts(
            root.clone(),
            self.parser.clone(),
            self.reference_cache.clone(),
        );

        for name in manifest.libraries() {
            let path = on_disk
                .iter()
                .find(|(disk_name, _)| disk_name == name)
                .map(|(_, path)| path.clone())
                .unwrap_or_else(|| libraries_dir.join(name.as_str()));
            workspace.add_library(name, path, manifest.steplibs(name));
        }
        for (name, path) in &on_disk {
            if workspace.library(name).is_none() {
                workspace.add_library(name, path.clone(), manifest.steplibs(name));
            }
        }
        if workspace.library(SYSTEM_LIBRARY).is_none() {
            workspace.add_library(SYSTEM_LIBRARY, libraries_dir.join(SYSTEM_LIBRARY), &[]);
        }

        for library in workspace.libraries() {
            for steplib in library.steplib_chain() {
                if workspace.library(steplib).is_none() {
                    warn!("library {} declares unknown steplib {}", library.name(), steplib);
                }
            }
        }

        workspace.set_severity_overrides(load_severity_overrides(&root)?);

        let library_paths: Vec<(SmolStr, PathBuf)> = workspace
            .libraries()
            .map(|l| (l.name().clone(), l.source_path().to_path_buf()))
            .collect();
        for (name, path) in library_paths {
            let files = collect_file_paths(&path);
            debug!("library {}: {} files", name, files.len());
            for file in files {
                workspace.add_file(file);
            }
        }

        debug!(
            "loaded {} libraries, {} files from {}",
            workspace.libraries().count(),
            workspace.file_count(),
            root.display()
        );
        Ok(workspace)
    }
}

impl Default for WorkspaceLoader {
    fn default() -> Self {
        Self::new()
    }
}
