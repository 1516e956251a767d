use std::path::Path;

use crate::base::{Severity, codes};
use crate::project::parse_severity_overrides;
use crate::semantic::SeverityOverride;

const EDITORCONFIG: &str = "\
root = true

[*]
indent_style = space
natls.E0001.severity = warning

# copycodes are checked where they are included
[*.NSC]
natls.E0001.severity = none

[Natural-Libraries/LEGACY/**]
natls.E0003.severity = hint
natls.E0004.severity = shout
";

#[test]
fn test_sections_become_rules() {
    let root = Path::new("/project");
    let overrides = parse_severity_overrides(EDITORCONFIG, root);

    assert_eq!(
        overrides.lookup(codes::UNRESOLVED_REFERENCE, &root.join("Natural-Libraries/LIB1/P.NSP")),
        Some(SeverityOverride::Severity(Severity::Warning))
    );
    assert_eq!(
        overrides.lookup(codes::UNRESOLVED_REFERENCE, &root.join("Natural-Libraries/LIB1/CC.NSC")),
        Some(SeverityOverride::Suppress)
    );
    assert_eq!(
        overrides.lookup(codes::UNRESOLVED_MODULE, &root.join("Natural-Libraries/LEGACY/old/P.NSP")),
        Some(SeverityOverride::Severity(Severity::Hint))
    );
    assert_eq!(
        overrides.lookup(codes::UNRESOLVED_MODULE, &root.join("Natural-Libraries/LIB1/P.NSP")),
        None
    );
}

#[test]
fn test_unknown_severity_is_skipped() {
    let root = Path::new("/project");
    let overrides = parse_severity_overrides(EDITORCONFIG, root);
    assert_eq!(
        overrides.lookup(codes::UNRESOLVED_SUBROUTINE, &root.join("Natural-Libraries/LEGACY/P.NSP")),
        None
    );
}

#[test]
fn test_keys_outside_sections_are_ignored() {
    let overrides = parse_severity_overrides("natls.E0001.severity = error\n", Path::new("/p"));
    assert!(overrides.is_empty());
}
