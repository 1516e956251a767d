use std::fs;
use std::path::Path;

use rstest::rstest;
use tempfile::TempDir;

use crate::base::constants::{BUILD_MANIFEST, LIBRARIES_DIR};
use crate::project::{ProjectError, WorkspaceLoader};

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn project() -> TempDir {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        BUILD_MANIFEST,
        "<BuildDescription><LibrarySteplibs>\
         <LibrarySteplib><Library>LIB1</Library>\
         <Steplibs><Steplib>LIB2</Steplib><Steplib>NOWHERE</Steplib></Steplibs></LibrarySteplib>\
         </LibrarySteplibs></BuildDescription>",
    );
    let libs = format!("{}/", LIBRARIES_DIR);
    write(dir.path(), &format!("{libs}LIB1/SUB.NSN"), "CALLNAT 'SUB2'\nEND");
    write(dir.path(), &format!("{libs}LIB2/SUB2.NSN"), "END");
    write(dir.path(), &format!("{libs}EXTRA/PROG.NSP"), "END");
    write(dir.path(), &format!("{libs}EXTRA/notes.txt"), "not natural");
    dir
}

#[test]
fn test_load_project_layout() {
    let dir = project();
    let workspace = WorkspaceLoader::new().load(dir.path()).unwrap();

    let names: Vec<_> = workspace.libraries().map(|l| l.name().as_str()).collect();
    assert_eq!(names, vec!["LIB1", "EXTRA", "LIB2", "SYSTEM"]);
    assert_eq!(
        workspace.library("LIB1").unwrap().steplib_chain(),
        &["LIB1", "LIB2", "NOWHERE", "SYSTEM"]
    );
    assert_eq!(
        workspace.library("EXTRA").unwrap().steplib_chain(),
        &["EXTRA", "SYSTEM"]
    );
    assert_eq!(workspace.file_count(), 3);
}

#[rstest]
#[case("LIB1", "SUB2", true)]
#[case("LIB2", "SUB", false)]
#[case("EXTRA", "SUB2", false)]
fn test_loaded_steplib_visibility(
    #[case] library: &str,
    #[case] name: &str,
    #[case] visible: bool,
) {
    let dir = project();
    let workspace = WorkspaceLoader::new().load(dir.path()).unwrap();
    assert_eq!(workspace.resolve_module_file(library, name).is_some(), visible);
}

#[test]
fn test_missing_root() {
    let dir = TempDir::new().unwrap();
    let err = WorkspaceLoader::new()
        .load(dir.path().join("missing"))
        .unwrap_err();
    assert!(matches!(err, ProjectError::RootNotFound(_)));
}

#[test]
fn test_project_without_manifest_uses_directories() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), &format!("{}/LIB1/PROG.NSP", LIBRARIES_DIR), "END");

    let workspace = WorkspaceLoader::new().load(dir.path()).unwrap();

    assert!(workspace.library("LIB1").is_some());
    assert!(workspace.library("SYSTEM").is_some());
    assert!(workspace.find_file_by_referable_name("PROG").is_some());
}
