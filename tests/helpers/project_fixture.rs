//! A Natural project laid out on disk in a temporary directory.

#![allow(clippy::unwrap_used)]

use std::fs;
use std::path::{Path, PathBuf};

use natls::base::constants::{BUILD_MANIFEST, EDITORCONFIG, LIBRARIES_DIR};
use natls::{AnalysisHost, Workspace, WorkspaceLoader};
use tempfile::TempDir;

pub struct ProjectFixture {
    pub dir: TempDir,
}

impl ProjectFixture {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    /// Write `_naturalBuild` with `(library, steplibs)` pairs.
    pub fn with_steplibs(self, libraries: &[(&str, &[&str])]) -> Self {
        let mut xml = String::from("<BuildDescription><LibrarySteplibs>");
        for (library, steplibs) in libraries {
            xml.push_str("<LibrarySteplib><Library>");
            xml.push_str(library);
            xml.push_str("</Library><Steplibs>");
            for steplib in *steplibs {
                xml.push_str("<Steplib>");
                xml.push_str(steplib);
                xml.push_str("</Steplib>");
            }
            xml.push_str("</Steplibs></LibrarySteplib>");
        }
        xml.push_str("</LibrarySteplibs></BuildDescription>");
        fs::write(self.dir.path().join(BUILD_MANIFEST), xml).unwrap();
        self
    }

    pub fn with_editorconfig(self, content: &str) -> Self {
        fs::write(self.dir.path().join(EDITORCONFIG), content).unwrap();
        self
    }

    pub fn with_file(self, library: &str, name: &str, source: &str) -> Self {
        self.write(library, name, source);
        self
    }

    pub fn write(&self, library: &str, name: &str, source: &str) -> PathBuf {
        let path = self.path(library, name);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, source).unwrap();
        path
    }

    pub fn path(&self, library: &str, name: &str) -> PathBuf {
        self.dir.path().join(LIBRARIES_DIR).join(library).join(name)
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn load(&self) -> Workspace {
        WorkspaceLoader::new().load(self.root()).unwrap()
    }

    /// Loaded and fully indexed
    pub fn host(&self) -> AnalysisHost {
        let host = AnalysisHost::with_threads(self.load(), 2).unwrap();
        let summary = host.start_indexing().wait();
        assert!(!summary.cancelled);
        host
    }
}
