use std::fs;

use tempfile::TempDir;

use super::super::*;

#[test]
fn test_collect_only_natural_files() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("nested")).unwrap();
    fs::write(dir.path().join("PROG.NSP"), "END").unwrap();
    fs::write(dir.path().join("nested/sub.nsn"), "END").unwrap();
    fs::write(dir.path().join("README.md"), "docs").unwrap();
    fs::write(dir.path().join(".natural"), "").unwrap();

    let paths = collect_file_paths(dir.path());

    assert_eq!(
        paths,
        vec![dir.path().join("PROG.NSP"), dir.path().join("nested/sub.nsn")]
    );
}

#[test]
fn test_collect_missing_dir_is_empty() {
    let dir = TempDir::new().unwrap();
    assert!(collect_file_paths(&dir.path().join("missing")).is_empty());
}

#[test]
fn test_discover_libraries_upper_cases_names() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("lib1")).unwrap();
    fs::create_dir_all(dir.path().join("SYSTEM")).unwrap();
    fs::write(dir.path().join("stray.txt"), "").unwrap();

    let libraries = discover_libraries(dir.path());

    let names: Vec<_> = libraries.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, vec!["LIB1", "SYSTEM"]);
    assert_eq!(libraries[0].1, dir.path().join("lib1"));
}
