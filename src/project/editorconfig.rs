//! Severity overrides from the project's `.editorconfig`.
//!
//! ```ini
//! [*.NSC]
//! natls.E0001.severity = warning
//!
//! [Natural-Libraries/LEGACY/**]
//! natls.E0003.severity = none
//! ```

use std::path::Path;

use tracing::warn;

use super::error::ProjectError;
use crate::base::constants::{EDITORCONFIG, SEVERITY_KEY_PREFIX, SEVERITY_KEY_SUFFIX};
use crate::semantic::{SeverityOverride, SeverityOverrides};

/// Read `<root>/.editorconfig`; a missing file yields no overrides.
pub fn load_severity_overrides(root: &Path) -> Result<SeverityOverrides, ProjectError> {
    let path = root.join(EDITORCONFIG);
    if !path.is_file() {
        return Ok(SeverityOverrides::new(root));
    }
    let content = std::fs::read_to_string(&path)?;
    Ok(parse_severity_overrides(&content, root))
}

/// Collect `natls.<RULE>.severity` keys in file order. Malformed entries
/// are logged and skipped.
pub fn parse_severity_overrides(content: &str, root: &Path) -> SeverityOverrides {
    let mut overrides = SeverityOverrides::new(root);
    let mut section: Option<&str> = None;

    for (number, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }
        if let Some(glob) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            section = Some(glob.trim());
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let Some(code) = key
            .trim()
            .strip_prefix(SEVERITY_KEY_PREFIX)
            .and_then(|k| k.strip_suffix(SEVERITY_KEY_SUFFIX))
        else {
            continue;
        };
        let Some(glob) = section else {
            warn!(".editorconfig:{}: {} outside of a section", number + 1, key.trim());
            continue;
        };
        let Some(action) = SeverityOverride::from_config(value) else {
            warn!(".editorconfig:{}: unknown severity '{}'", number + 1, value.trim());
            continue;
        };
        if let Err(err) = overrides.add_rule(code, glob, action) {
            warn!(".editorconfig:{}: invalid section [{}]: {}", number + 1, glob, err);
        }
    }

    overrides
}
