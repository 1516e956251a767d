#![allow(clippy::unwrap_used)]


use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use smol_str::SmolStr;
use tempfile::TempDir;

use crate::semantic::workspace::{ModuleFile, Workspace};

/// A workspace on a temporary directory with libraries `LIB1` and `SYSTEM`
pub(super) struct Fixture {
    pub dir: TempDir,
    pub workspace: Workspace,
}

impl Fixture {
    pub fn new() -> Self {
        Self::with_libraries(&[("LIB1", &[]), ("SYSTEM", &[])])
    }

    pub fn with_libraries(libraries: &[(&str, &[&str])]) -> Self {
        let dir = TempDir::new().unwrap();
        let mut workspace = Workspace::new(dir.path());
        for (name, steplibs) in libraries {
            let path = dir.path().join(name);
            fs::create_dir_all(&path).unwrap();
            let steplibs: Vec<SmolStr> = steplibs.iter().map(|s| SmolStr::new(*s)).collect();
            workspace.add_library(name, path, &steplibs);
        }
        Self { dir, workspace }
    }

    pub fn path(&self, library: &str, file: &str) -> PathBuf {
        self.dir.path().join(library).join(file)
    }

    /// Write a source file and add it to the workspace
    pub fn add(&self, library: &str, file: &str, source: &str) -> Arc<ModuleFile> {
        let path = self.path(library, file);
        fs::write(&path, source).unwrap();
        self.workspace.add_file(path).unwrap()
    }
}
