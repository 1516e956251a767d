//! Find references and rename preparation.

#![allow(clippy::unwrap_used)]

use natls::base::{Position, Span};
use natls::ide::Reference;

use crate::helpers::project_fixture::ProjectFixture;

fn project() -> ProjectFixture {
    ProjectFixture::new()
        .with_file("LIB1", "SUB.NSN", "END\n")
        .with_file("LIB1", "A.NSP", "CALLNAT 'SUB'\nEND\n")
        .with_file("LIB1", "B.NSP", "WRITE 'X'\nCALLNAT 'SUB'\nEND\n")
}

// =============================================================================
// FIND REFERENCES
// =============================================================================

#[test]
fn test_references_after_indexing_are_provisional() {
    let project = project();
    let host = project.host();

    let result = host.find_references(&project.path("LIB1", "SUB.NSN"));

    let expected = vec![
        Reference {
            file: project.path("LIB1", "A.NSP"),
            span: Span::new(Position::new(0, 0), Position::new(0, 0)),
            provisional: true,
        },
        Reference {
            file: project.path("LIB1", "B.NSP"),
            span: Span::new(Position::new(1, 0), Position::new(1, 0)),
            provisional: true,
        },
    ];
    assert_eq!(result.references, expected);
}

#[test]
fn test_parsed_caller_contributes_statement_span() {
    let project = project();
    let host = project.host();
    let a = project.path("LIB1", "A.NSP");
    host.workspace().open(&a).unwrap();

    let result = host.find_references(&project.path("LIB1", "SUB.NSN"));

    assert_eq!(result.len(), 2);
    assert_eq!(result.references[0].file, a);
    assert!(!result.references[0].provisional);
    assert_eq!(
        result.references[0].span,
        Span::new(Position::new(0, 0), Position::new(0, 13))
    );
    assert!(result.references[1].provisional);
}

#[test]
fn test_deleted_caller_disappears_from_references() {
    let project = project();
    let host = project.host();
    host.workspace().delete_file(&project.path("LIB1", "B.NSP"));

    let result = host.find_references(&project.path("LIB1", "SUB.NSN"));

    assert_eq!(result.len(), 1);
    assert_eq!(result.references[0].file, project.path("LIB1", "A.NSP"));
}

// =============================================================================
// RENAME
// =============================================================================

#[test]
fn test_prepare_rename_reparses_every_caller() {
    let project = project();
    let host = project.host();

    let plan = host.prepare_rename(&project.path("LIB1", "SUB.NSN")).unwrap();

    assert_eq!(plan.referable_name, "SUB");
    assert_eq!(plan.references.len(), 2);
    assert!(plan.references.references.iter().all(|r| !r.provisional));
    for caller in ["A.NSP", "B.NSP"] {
        let file = host.workspace().find_file(&project.path("LIB1", caller)).unwrap();
        assert!(file.state().is_parsed());
    }
}
