//! Per-tool diagnostic partitions of one module file.

use indexmap::IndexMap;

use crate::base::{Diagnostic, DiagnosticTool};

/// Diagnostics of one file, partitioned by the tool that produced them.
///
/// Replacing one tool's partition never touches another's, so a reparse
/// leaves linter results alone until the linter runs again.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticAggregator {
    partitions: IndexMap<DiagnosticTool, Vec<Diagnostic>>,
}

impl DiagnosticAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_diagnostic(&mut self, tool: DiagnosticTool, diagnostic: Diagnostic) {
        self.partitions.entry(tool).or_default().push(diagnostic);
    }

    pub fn clear_diagnostics_by_tool(&mut self, tool: DiagnosticTool) {
        self.partitions.shift_remove(&tool);
    }

    pub fn replace_diagnostics(&mut self, tool: DiagnosticTool, diagnostics: Vec<Diagnostic>) {
        if diagnostics.is_empty() {
            self.clear_diagnostics_by_tool(tool);
        } else {
            self.partitions.insert(tool, diagnostics);
        }
    }

    pub fn diagnostics_by_tool(&self, tool: DiagnosticTool) -> &[Diagnostic] {
        self.partitions.get(&tool).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Union of all partitions, in [`DiagnosticTool::ALL`] order.
    pub fn all_diagnostics(&self) -> Vec<Diagnostic> {
        DiagnosticTool::ALL
            .iter()
            .flat_map(|tool| self.diagnostics_by_tool(*tool).iter().cloned())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.partitions.values().all(Vec::is_empty)
    }
}
