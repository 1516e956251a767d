//! Module graph tests over projects loaded from disk.

#![allow(clippy::unwrap_used)]

use std::fs;

use natls::base::codes;
use natls::{ParseStrategy, Workspace};
use rstest::rstest;
use tokio_util::sync::CancellationToken;

use crate::helpers::project_fixture::ProjectFixture;

fn assert_edges_symmetric(workspace: &Workspace) {
    for file in workspace.provide_all_files() {
        for target in file.outgoing_references() {
            let target_file = workspace.find_file(&target).unwrap();
            assert!(
                target_file.incoming_references().contains(&file.path().to_path_buf()),
                "{} -> {} has no incoming side",
                file.path().display(),
                target.display()
            );
        }
        for caller in file.incoming_references() {
            let caller_file = workspace.find_file(&caller).unwrap();
            assert!(
                caller_file.outgoing_references().contains(&file.path().to_path_buf()),
                "{} <- {} has no outgoing side",
                file.path().display(),
                caller.display()
            );
        }
    }
}

#[test]
fn test_deleting_callee_removes_outgoing_edge() {
    let project = ProjectFixture::new()
        .with_file("LIB1", "SUB.NSN", "CALLNAT 'SUB2'\nEND\n")
        .with_file("LIB1", "SUB2.NSN", "END\n");
    let host = project.host();
    let workspace = host.workspace();
    let sub = project.path("LIB1", "SUB.NSN");
    let sub2 = project.path("LIB1", "SUB2.NSN");

    let file = workspace.find_file(&sub).unwrap();
    assert_eq!(file.outgoing_references(), vec![sub2.clone()]);

    fs::remove_file(&sub2).unwrap();
    workspace.delete_file(&sub2);

    assert!(file.outgoing_references().is_empty());
    assert!(workspace.find_file(&sub2).is_none());
    assert!(workspace.resolve_module_file("LIB1", "SUB2").is_none());
    assert!(workspace.reference_cache().retrieve_cached_positions(&sub2).is_empty());
    assert_edges_symmetric(workspace);
}

#[test]
fn test_data_area_change_reparses_caller() {
    let project = ProjectFixture::new()
        .with_file(
            "LIB1",
            "CALLER.NSN",
            "DEFINE DATA\nLOCAL USING MYLDA\nEND-DEFINE\nWRITE #VAR\nEND\n",
        )
        .with_file("LIB1", "MYLDA.NSL", "DEFINE DATA LOCAL\n1 #OTHER (A10)\nEND-DEFINE\n");
    let host = project.host();
    let workspace = host.workspace();
    let caller = project.path("LIB1", "CALLER.NSN");
    let lda = project.path("LIB1", "MYLDA.NSL");

    workspace.open(&caller).unwrap();
    let codes: Vec<_> = workspace
        .diagnostics(&caller)
        .iter()
        .map(|d| d.code.to_string())
        .collect();
    assert_eq!(codes, vec![codes::UNRESOLVED_REFERENCE.to_string()]);

    let report = workspace.change(
        &lda,
        "DEFINE DATA LOCAL\n1 #VAR (A10)\nEND-DEFINE\n".to_string(),
        ParseStrategy::WithCallers,
    );

    assert_eq!(report.reparsed, vec![lda.clone(), caller.clone()]);
    assert!(workspace.diagnostics(&caller).is_empty());
    assert_edges_symmetric(workspace);
}

#[test]
fn test_data_area_change_without_callers_leaves_caller_alone() {
    let project = ProjectFixture::new()
        .with_file(
            "LIB1",
            "CALLER.NSN",
            "DEFINE DATA\nLOCAL USING MYLDA\nEND-DEFINE\nWRITE #VAR\nEND\n",
        )
        .with_file("LIB1", "MYLDA.NSL", "DEFINE DATA LOCAL\n1 #OTHER (A10)\nEND-DEFINE\n");
    let host = project.host();
    let workspace = host.workspace();
    let caller = project.path("LIB1", "CALLER.NSN");
    let lda = project.path("LIB1", "MYLDA.NSL");

    workspace.open(&caller).unwrap();
    let report = workspace.change(
        &lda,
        "DEFINE DATA LOCAL\n1 #VAR (A10)\nEND-DEFINE\n".to_string(),
        ParseStrategy::WithoutCallers,
    );

    assert_eq!(report.reparsed, vec![lda]);
    assert_eq!(workspace.diagnostics(&caller).len(), 1);
}

#[rstest]
#[case("LIB1", Some("LIB2"))]
#[case("LIB2", Some("LIB2"))]
#[case("OTHER", Some("SYSTEM"))]
fn test_steplib_chain_picks_first_library(
    #[case] from: &str,
    #[case] expected: Option<&str>,
) {
    let project = ProjectFixture::new()
        .with_steplibs(&[("LIB1", &["LIB2"]), ("OTHER", &[])])
        .with_file("LIB1", "PROG.NSP", "CALLNAT 'SHARED'\nEND\n")
        .with_file("LIB2", "SHARED.NSN", "END\n")
        .with_file("OTHER", "PROG2.NSP", "END\n")
        .with_file("SYSTEM", "SHARED.NSN", "END\n");
    let workspace = project.load();

    let found = workspace
        .resolve_module_file(from, "SHARED")
        .map(|file| file.library().to_string());
    assert_eq!(found.as_deref(), expected);
}

#[test]
fn test_indexing_skips_unreadable_files() {
    let project = ProjectFixture::new()
        .with_file("LIB1", "PROG.NSP", "CALLNAT 'SUB'\nEND\n")
        .with_file("LIB1", "SUB.NSN", "END\n")
        .with_file("LIB1", "GONE.NSP", "CALLNAT 'SUB'\nEND\n");
    let workspace = project.load();
    fs::remove_file(project.path("LIB1", "GONE.NSP")).unwrap();

    let summary = workspace.index_all(&CancellationToken::new());

    assert_eq!(summary.scanned, 2);
    assert_eq!(summary.failed, 1);
    let sub = workspace.find_file(&project.path("LIB1", "SUB.NSN")).unwrap();
    assert_eq!(sub.incoming_references(), vec![project.path("LIB1", "PROG.NSP")]);
}

#[test]
fn test_created_file_joins_graph() {
    let project = ProjectFixture::new().with_file("LIB1", "SUB.NSN", "END\n");
    let host = project.host();
    let workspace = host.workspace();

    let path = project.write("LIB1", "NEW.NSP", "CALLNAT 'SUB'\nEND\n");
    workspace.file_created(path.clone()).unwrap();

    let sub = workspace.find_file(&project.path("LIB1", "SUB.NSN")).unwrap();
    assert_eq!(sub.incoming_references(), vec![path]);
    assert_edges_symmetric(workspace);
}

#[test]
fn test_created_data_area_connects_waiting_caller() {
    let project = ProjectFixture::new().with_file(
        "LIB1",
        "CALLER.NSN",
        "DEFINE DATA\nLOCAL USING MYLDA\nEND-DEFINE\nWRITE #VAR\nEND\n",
    );
    let host = project.host();
    let workspace = host.workspace();
    let caller = project.path("LIB1", "CALLER.NSN");

    workspace.open(&caller).unwrap();
    let codes: Vec<_> = workspace
        .diagnostics(&caller)
        .iter()
        .map(|d| d.code.to_string())
        .collect();
    assert_eq!(codes, vec![codes::UNRESOLVED_DATA_AREA.to_string()]);

    let lda = project.write("LIB1", "MYLDA.NSL", "DEFINE DATA LOCAL\n1 #VAR (A10)\nEND-DEFINE\n");
    workspace.file_created(lda.clone()).unwrap();

    let lda_file = workspace.find_file(&lda).unwrap();
    assert_eq!(lda_file.incoming_references(), vec![caller.clone()]);
    assert!(workspace.diagnostics(&caller).is_empty());

    let report = workspace.save(&lda, ParseStrategy::WithCallers);
    assert_eq!(report.reparsed, vec![lda, caller]);
    assert_edges_symmetric(workspace);
}

#[test]
fn test_created_module_connects_unparsed_caller() {
    let project = ProjectFixture::new().with_file("LIB1", "CALLER.NSP", "CALLNAT 'LATE'\nEND\n");
    let host = project.host();
    let workspace = host.workspace();
    let caller = project.path("LIB1", "CALLER.NSP");
    assert!(workspace.find_file(&caller).unwrap().outgoing_references().is_empty());

    let late = project.write("LIB1", "LATE.NSN", "END\n");
    workspace.file_created(late.clone()).unwrap();

    let late_file = workspace.find_file(&late).unwrap();
    assert_eq!(late_file.incoming_references(), vec![caller.clone()]);
    assert!(!workspace.find_file(&caller).unwrap().state().is_parsed());
    assert_edges_symmetric(workspace);
}

#[test]
fn test_renamed_back_module_reconnects_callers() {
    let project = ProjectFixture::new()
        .with_file("LIB1", "PROG.NSP", "CALLNAT 'SUB'\nEND\n")
        .with_file("LIB1", "SUB.NSN", "END\n");
    let host = project.host();
    let workspace = host.workspace();
    let prog = project.path("LIB1", "PROG.NSP");
    let sub = project.path("LIB1", "SUB.NSN");

    workspace.delete_file(&sub);
    assert!(workspace.find_file(&prog).unwrap().outgoing_references().is_empty());

    fs::write(&sub, "END\n").unwrap();
    workspace.file_created(sub.clone()).unwrap();

    assert_eq!(workspace.find_file(&prog).unwrap().outgoing_references(), vec![sub]);
    assert_edges_symmetric(workspace);
}

#[test]
fn test_subroutine_resolves_by_header_name_after_indexing() {
    let project = ProjectFixture::new()
        .with_file("LIB1", "PROG.NSP", "PERFORM DO-WORK\nEND\n")
        .with_file(
            "LIB1",
            "WORKSUB.NSS",
            "DEFINE SUBROUTINE DO-WORK\nIGNORE\nEND-SUBROUTINE\nEND\n",
        );
    let host = project.host();
    let workspace = host.workspace();

    let target = workspace.resolve_module_file("LIB1", "DO-WORK").unwrap();
    assert_eq!(target.path(), project.path("LIB1", "WORKSUB.NSS"));

    let prog = project.path("LIB1", "PROG.NSP");
    workspace.open(&prog).unwrap();
    assert!(workspace.diagnostics(&prog).is_empty());
    assert_eq!(
        workspace.find_file(&prog).unwrap().outgoing_references(),
        vec![project.path("LIB1", "WORKSUB.NSS")]
    );
}

#[test]
fn test_graph_stays_symmetric_through_edits() {
    let project = ProjectFixture::new()
        .with_file("LIB1", "A.NSP", "CALLNAT 'B'\nCALLNAT 'C'\nEND\n")
        .with_file("LIB1", "B.NSN", "CALLNAT 'C'\nEND\n")
        .with_file("LIB1", "C.NSN", "CALLNAT 'B'\nEND\n");
    let host = project.host();
    let workspace = host.workspace();
    assert_edges_symmetric(workspace);

    let a = project.path("LIB1", "A.NSP");
    workspace.change(&a, "CALLNAT 'C'\nEND\n".to_string(), ParseStrategy::WithCallers);
    assert_edges_symmetric(workspace);
    assert_eq!(
        workspace.find_file(&a).unwrap().outgoing_references(),
        vec![project.path("LIB1", "C.NSN")]
    );

    workspace.open(&project.path("LIB1", "B.NSN")).unwrap();
    workspace.delete_file(&project.path("LIB1", "C.NSN"));
    assert_edges_symmetric(workspace);
}
