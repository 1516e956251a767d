//! Domain constants: project layout, library names, rule prefixes.

/// The implicit library searched last by every steplib chain
pub const SYSTEM_LIBRARY: &str = "SYSTEM";

/// Directory below the project root holding one folder per library
pub const LIBRARIES_DIR: &str = "Natural-Libraries";

/// Build manifest file name at the project root
pub const BUILD_MANIFEST: &str = "_naturalBuild";

/// Severity configuration file at the project root
pub const EDITORCONFIG: &str = ".editorconfig";

/// Key prefix for severity overrides in `.editorconfig`
pub const SEVERITY_KEY_PREFIX: &str = "natls.";

/// Key suffix for severity overrides in `.editorconfig`
pub const SEVERITY_KEY_SUFFIX: &str = ".severity";
