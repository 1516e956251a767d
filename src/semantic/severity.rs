//! Project-level severity overrides keyed by rule id and file glob.

use std::path::{Path, PathBuf};

use regex::Regex;
use smol_str::SmolStr;

use crate::base::{Diagnostic, Severity};

/// What a matching rule does to a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeverityOverride {
    Severity(Severity),
    Suppress,
}

impl SeverityOverride {
    /// Parse a configuration value; `none` suppresses.
    pub fn from_config(value: &str) -> Option<Self> {
        if value.trim().eq_ignore_ascii_case("none") {
            return Some(SeverityOverride::Suppress);
        }
        Severity::from_config(value).map(SeverityOverride::Severity)
    }
}

#[derive(Debug, Clone)]
struct SeverityRule {
    code: SmolStr,
    /// Patterns without `/` match the file name only
    match_file_name: bool,
    matcher: Regex,
    action: SeverityOverride,
}

/// Ordered override rules. The last matching rule wins.
#[derive(Debug, Clone, Default)]
pub struct SeverityOverrides {
    root: PathBuf,
    rules: Vec<SeverityRule>,
}

impl SeverityOverrides {
    /// Overrides whose path patterns are relative to `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            rules: Vec::new(),
        }
    }

    pub fn add_rule(
        &mut self,
        code: &str,
        glob: &str,
        action: SeverityOverride,
    ) -> Result<(), regex::Error> {
        let glob = glob.trim_start_matches('/');
        let matcher = Regex::new(&glob_to_regex(glob))?;
        self.rules.push(SeverityRule {
            code: SmolStr::new(code),
            match_file_name: !glob.contains('/'),
            matcher,
            action,
        });
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// The override for `code` in `file`, if any rule matches
    pub fn lookup(&self, code: &str, file: &Path) -> Option<SeverityOverride> {
        let relative = file.strip_prefix(&self.root).unwrap_or(file);
        let relative_text = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        let file_name = file
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default();

        self.rules
            .iter()
            .rev()
            .find(|rule| {
                rule.code.eq_ignore_ascii_case(code)
                    && if rule.match_file_name {
                        rule.matcher.is_match(&file_name)
                    } else {
                        rule.matcher.is_match(&relative_text)
                    }
            })
            .map(|rule| rule.action)
    }

    /// Apply the overrides to a diagnostic; `None` if it is suppressed.
    ///
    /// Copy-code diagnostics are matched against the copy-code's own path.
    pub fn apply(&self, diagnostic: &Diagnostic) -> Option<Diagnostic> {
        match self.lookup(&diagnostic.code, diagnostic.physical_file()) {
            Some(SeverityOverride::Suppress) => None,
            Some(SeverityOverride::Severity(severity)) => {
                Some(diagnostic.clone().with_severity(severity))
            }
            None => Some(diagnostic.clone()),
        }
    }
}

/// Translate an editorconfig glob (`*`, `**`, `?`, `{a,b}`) to an anchored,
/// case-insensitive regex
fn glob_to_regex(glob: &str) -> String {
    let mut regex = String::from("(?i)^");
    let mut chars = glob.chars().peekable();
    let mut in_braces = false;

    while let Some(c) = chars.next() {
        match c {
            '*' if chars.peek() == Some(&'*') => {
                chars.next();
                if chars.peek() == Some(&'/') {
                    chars.next();
                    regex.push_str("(?:.*/)?");
                } else {
                    regex.push_str(".*");
                }
            }
            '*' => regex.push_str("[^/]*"),
            '?' => regex.push_str("[^/]"),
            '{' => {
                in_braces = true;
                regex.push_str("(?:");
            }
            '}' if in_braces => {
                in_braces = false;
                regex.push(')');
            }
            ',' if in_braces => regex.push('|'),
            _ => regex.push_str(&regex::escape(&c.to_string())),
        }
    }

    if in_braces {
        regex.push(')');
    }
    regex.push('$');
    regex
}
