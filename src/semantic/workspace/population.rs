//! Project-wide indexing with the reference scanner.

use std::sync::Arc;

use rayon::prelude::*;
use rustc_hash::FxHashSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace, warn};

use crate::base::FilePosition;
use crate::semantic::scanner::{ScanResult, scan_source};
use crate::semantic::workspace::{ModuleFile, Workspace};

/// Counters of one indexing pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndexingSummary {
    pub scanned: usize,
    /// Files that could not be read
    pub failed: usize,
    /// Edges registered from scans
    pub edges: usize,
    pub cancelled: bool,
}

enum ScanOutcome {
    Scanned(ScanResult),
    Failed,
    Cancelled,
}

impl Workspace {
    /// Scans every file in parallel and registers the provisional graph.
    ///
    /// Runs on the current rayon pool. `cancel` is checked once per file.
    /// Files that already have a parsed module keep their parser edges.
    pub fn index_all(&self, cancel: &CancellationToken) -> IndexingSummary {
        let files = self.provide_all_files();
        debug!("indexing {} files", files.len());

        let scans: Vec<(Arc<ModuleFile>, ScanOutcome)> = files
            .into_par_iter()
            .map(|file| {
                let outcome = self.scan_file(&file, cancel);
                (file, outcome)
            })
            .collect();

        // Names first, so that every edge target is resolvable
        let mut summary = IndexingSummary::default();
        for (file, outcome) in &scans {
            match outcome {
                ScanOutcome::Scanned(result) => {
                    summary.scanned += 1;
                    self.register_scanned_name(file, result);
                }
                ScanOutcome::Failed => summary.failed += 1,
                ScanOutcome::Cancelled => summary.cancelled = true,
            }
        }

        summary.edges = scans
            .par_iter()
            .filter_map(|(file, outcome)| match outcome {
                ScanOutcome::Scanned(result) => Some((file, result)),
                _ => None,
            })
            .map(|(file, result)| {
                if cancel.is_cancelled() {
                    0
                } else {
                    self.register_scan(file, result)
                }
            })
            .sum();
        summary.cancelled |= cancel.is_cancelled();

        debug!(
            "indexed {} files ({} failed, {} edges{})",
            summary.scanned,
            summary.failed,
            summary.edges,
            if summary.cancelled { ", cancelled" } else { "" }
        );
        summary
    }

    /// Scan and register a single file
    pub fn index_file(&self, file: &Arc<ModuleFile>) -> usize {
        match self.scan_file(file, &CancellationToken::new()) {
            ScanOutcome::Scanned(result) => {
                self.register_scanned_name(file, &result);
                self.register_scan(file, &result)
            }
            ScanOutcome::Failed | ScanOutcome::Cancelled => 0,
        }
    }

    fn scan_file(&self, file: &ModuleFile, cancel: &CancellationToken) -> ScanOutcome {
        if cancel.is_cancelled() {
            return ScanOutcome::Cancelled;
        }
        match file.read_source() {
            Ok(source) => ScanOutcome::Scanned(scan_source(&source, file.path(), file.file_type())),
            Err(err) => {
                warn!("skipping {}: {}", file.path().display(), err);
                ScanOutcome::Failed
            }
        }
    }

    fn register_scanned_name(&self, file: &Arc<ModuleFile>, result: &ScanResult) {
        if file.file_type().has_header_name() {
            let name = result
                .referable_name
                .clone()
                .unwrap_or_else(|| file.referable_name());
            self.register_referable_name(file, name);
        }
    }

    /// Provisional edges and cache entries for a scanned file.
    ///
    /// Holds the file's parse lock throughout, so a parse cannot land between
    /// the state check and the registration. A file being parsed is skipped.
    fn register_scan(&self, file: &ModuleFile, result: &ScanResult) -> usize {
        let Some(_guard) = file.try_lock_parse() else {
            trace!("{} is being parsed, keeping its edges", file.path().display());
            return 0;
        };
        if file.state().snapshot().is_some() || file.is_deleted() {
            return 0;
        }

        let mut targets = FxHashSet::default();
        let mut unresolved = Vec::new();
        for candidate in &result.candidates {
            let Some(target) = self.resolve_module_file(file.library(), &candidate.name) else {
                unresolved.push(&candidate.name);
                continue;
            };
            if target.path() == file.path() {
                continue;
            }
            self.reference_cache.add_entry(
                target.path(),
                FilePosition::new(
                    file.path(),
                    candidate.position.line,
                    candidate.position.column,
                ),
            );
            targets.insert(target.path().to_path_buf());
        }

        let count = targets.len();
        self.replace_outgoing_edges(file, targets);
        self.unresolved.replace(file.path(), unresolved);
        count
    }
}
