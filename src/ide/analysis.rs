//! AnalysisHost: the request boundary of the language server core.
//!
//! The host owns the [`Workspace`] and a rayon pool for background indexing.
//! Interactive requests run on the caller's thread against whatever the
//! workspace knows right now; indexing only ever adds provisional edges.
//!
//! ## Usage
//!
//! ```ignore
//! let workspace = WorkspaceLoader::new().load(root)?;
//! let host = AnalysisHost::new(workspace)?;
//!
//! let indexing = host.start_indexing();
//! let summary = indexing.wait();
//!
//! let refs = host.find_references(&path);
//! let target = host.goto_module(&path, line, col);
//! ```

use std::num::NonZeroUsize;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::{Condvar, Mutex};
use rayon::{ThreadPool, ThreadPoolBuilder};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::base::{Diagnostic, Position};
use crate::project::ProjectError;
use crate::semantic::{IndexingSummary, Workspace};

use super::{GotoTarget, ReferenceResult, RenamePlan};

/// Owns the workspace and the indexing pool.
pub struct AnalysisHost {
    workspace: Arc<Workspace>,
    pool: Arc<ThreadPool>,
}

impl AnalysisHost {
    /// Create a host with one indexing thread per available core.
    pub fn new(workspace: Workspace) -> Result<Self, ProjectError> {
        let threads = std::thread::available_parallelism()
            .map(NonZeroUsize::get)
            .unwrap_or(1);
        Self::with_threads(workspace, threads)
    }

    pub fn with_threads(workspace: Workspace, threads: usize) -> Result<Self, ProjectError> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads.max(1))
            .thread_name(|i| format!("natls-index-{i}"))
            .build()?;
        Ok(Self {
            workspace: Arc::new(workspace),
            pool: Arc::new(pool),
        })
    }

    pub fn workspace(&self) -> &Arc<Workspace> {
        &self.workspace
    }

    /// Index every file on the pool. Returns immediately.
    pub fn start_indexing(&self) -> IndexingHandle {
        let handle = IndexingHandle::new();
        let workspace = Arc::clone(&self.workspace);
        let token = handle.cancel.clone();
        let done = Arc::clone(&handle.done);

        self.pool.spawn(move || {
            info!("indexing {} files", workspace.file_count());
            let summary = match catch_unwind(AssertUnwindSafe(|| workspace.index_all(&token))) {
                Ok(summary) => summary,
                Err(_) => {
                    warn!("indexing panicked, provisional graph is incomplete");
                    IndexingSummary {
                        cancelled: true,
                        ..Default::default()
                    }
                }
            };
            let (lock, signal) = &*done;
            *lock.lock() = Some(summary);
            signal.notify_all();
        });
        handle
    }

    /// The module referenced at a 0-based cursor position.
    pub fn goto_module(&self, path: &Path, line: usize, column: usize) -> Option<GotoTarget> {
        guarded("goto", None, || {
            super::goto_module(&self.workspace, path, Position::new(line, column))
        })
    }

    pub fn find_references(&self, path: &Path) -> ReferenceResult {
        guarded("references", ReferenceResult::empty(), || {
            super::find_references(&self.workspace, path)
        })
    }

    pub fn prepare_rename(&self, path: &Path) -> Option<RenamePlan> {
        guarded("rename", None, || super::prepare_rename(&self.workspace, path))
    }

    /// Diagnostics of a file after severity overrides.
    pub fn diagnostics(&self, path: &Path) -> Vec<Diagnostic> {
        guarded("diagnostics", Vec::new(), || self.workspace.diagnostics(path))
    }
}

/// A panic inside a request yields an empty answer instead of taking the
/// server down.
fn guarded<T>(request: &str, fallback: T, f: impl FnOnce() -> T) -> T {
    match catch_unwind(AssertUnwindSafe(f)) {
        Ok(value) => value,
        Err(_) => {
            warn!("{} request panicked", request);
            fallback
        }
    }
}

/// Handle to a running indexing pass.
#[derive(Clone)]
pub struct IndexingHandle {
    cancel: CancellationToken,
    done: Arc<(Mutex<Option<IndexingSummary>>, Condvar)>,
}

impl IndexingHandle {
    fn new() -> Self {
        Self {
            cancel: CancellationToken::new(),
            done: Arc::new((Mutex::new(None), Condvar::new())),
        }
    }

    /// Ask the pass to stop. Files already scanned stay registered.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_finished(&self) -> bool {
        self.done.0.lock().is_some()
    }

    /// Block until the pass is over.
    pub fn wait(&self) -> IndexingSummary {
        let (lock, signal) = &*self.done;
        let mut summary = lock.lock();
        loop {
            if let Some(summary) = *summary {
                return summary;
            }
            signal.wait(&mut summary);
        }
    }

    /// Like [`wait`](Self::wait), giving up after `timeout`.
    pub fn wait_timeout(&self, timeout: Duration) -> Option<IndexingSummary> {
        let (lock, signal) = &*self.done;
        let mut summary = lock.lock();
        if summary.is_none() {
            signal.wait_for(&mut summary, timeout);
        }
        *summary
    }
}

impl std::fmt::Debug for IndexingHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndexingHandle")
            .field("cancelled", &self.cancel.is_cancelled())
            .field("finished", &self.is_finished())
            .finish()
    }
}
