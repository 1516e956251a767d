//! Go to module tests.

#![allow(clippy::unwrap_used)]

use rstest::rstest;

use crate::helpers::project_fixture::ProjectFixture;

fn project() -> ProjectFixture {
    ProjectFixture::new()
        .with_steplibs(&[("APP", &["BASE"])])
        .with_file(
            "APP",
            "PROG.NSP",
            "DEFINE DATA\nLOCAL USING MYLDA\nEND-DEFINE\nCALLNAT 'SUB'\nEND\n",
        )
        .with_file("APP", "MYLDA.NSL", "DEFINE DATA LOCAL\n1 #V (A1)\nEND-DEFINE\n")
        .with_file("BASE", "SUB.NSN", "END\n")
}

#[rstest]
#[case(1, 13, Some(("APP", "MYLDA.NSL")))]
#[case(3, 2, Some(("BASE", "SUB.NSN")))]
#[case(3, 10, Some(("BASE", "SUB.NSN")))]
#[case(0, 3, None)]
#[case(4, 0, None)]
fn test_goto_module(
    #[case] line: usize,
    #[case] column: usize,
    #[case] expected: Option<(&str, &str)>,
) {
    let project = project();
    let host = project.host();

    let target = host.goto_module(&project.path("APP", "PROG.NSP"), line, column);

    assert_eq!(
        target.map(|t| t.file),
        expected.map(|(library, name)| project.path(library, name))
    );
}

#[test]
fn test_goto_from_unknown_file() {
    let project = project();
    let host = project.host();
    assert!(host.goto_module(&project.path("APP", "MISSING.NSP"), 0, 0).is_none());
}
