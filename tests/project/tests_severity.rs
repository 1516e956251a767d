//! Severity configuration from `.editorconfig`.

#![allow(clippy::unwrap_used)]

use natls::base::codes;
use natls::{DiagnosticTool, Severity};

use crate::helpers::project_fixture::ProjectFixture;

#[test]
fn test_copycode_override_follows_physical_file() {
    let project = ProjectFixture::new()
        .with_editorconfig("root = true\n\n[*.NSC]\nnatls.E0001.severity = none\n")
        .with_file(
            "LIB1",
            "PROG.NSP",
            "DEFINE DATA LOCAL\n1 #DECLARED (A1)\nEND-DEFINE\nINCLUDE CC\nWRITE #MISSING\nEND\n",
        )
        .with_file("LIB1", "CC.NSC", "WRITE #FROMCC #DECLARED\n");
    let workspace = project.load();
    let prog = project.path("LIB1", "PROG.NSP");

    workspace.open(&prog).unwrap();
    let file = workspace.find_file(&prog).unwrap();
    assert_eq!(file.raw_diagnostics().len(), 2);

    let effective = workspace.diagnostics(&prog);
    assert_eq!(effective.len(), 1);
    assert!(effective[0].message.contains("#MISSING"));
    assert_eq!(effective[0].severity, Severity::Error);
}

#[test]
fn test_path_sections_and_last_match_wins() {
    let project = ProjectFixture::new()
        .with_editorconfig(
            "[*.NSP]\nnatls.E0003.severity = warning\n\n\
             [**/LIB1/QUIET.NSP]\nnatls.E0003.severity = none\n",
        )
        .with_file("LIB1", "LOUD.NSP", "CALLNAT 'NOWHERE'\nEND\n")
        .with_file("LIB1", "QUIET.NSP", "CALLNAT 'NOWHERE'\nEND\n");
    let workspace = project.load();
    let loud = project.path("LIB1", "LOUD.NSP");
    let quiet = project.path("LIB1", "QUIET.NSP");
    workspace.open(&loud).unwrap();
    workspace.open(&quiet).unwrap();

    let diagnostics = workspace.diagnostics(&loud);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(&*diagnostics[0].code, codes::UNRESOLVED_MODULE);
    assert_eq!(diagnostics[0].severity, Severity::Warning);
    assert!(workspace.diagnostics(&quiet).is_empty());
}

#[test]
fn test_close_keeps_published_linter_diagnostics() {
    let project = ProjectFixture::new().with_file("LIB1", "PROG.NSP", "CALLNAT 'NOWHERE'\nEND\n");
    let workspace = project.load();
    let prog = project.path("LIB1", "PROG.NSP");
    workspace.open(&prog).unwrap();

    let lint = natls::Diagnostic::warning(prog.clone(), Default::default(), "NL001", "style");
    assert!(workspace.publish_diagnostics(&prog, DiagnosticTool::Linter, vec![lint.clone()]));
    assert_eq!(workspace.diagnostics(&prog).len(), 2);

    workspace.close(&prog);
    assert_eq!(workspace.diagnostics(&prog), vec![lint]);
}
