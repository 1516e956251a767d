//! IDE features: high-level APIs for language server handlers.
//!
//! Each function corresponds to one request and works on the
//! [`Workspace`](crate::semantic::Workspace) as it is right now. No protocol
//! types appear here; they are converted at the server boundary.
//!
//! ## Usage
//!
//! The recommended way to use this module is through `AnalysisHost`:
//!
//! ```ignore
//! use natls::ide::AnalysisHost;
//!
//! let host = AnalysisHost::new(workspace)?;
//! host.start_indexing().wait();
//!
//! let refs = host.find_references(&path);
//! ```

mod analysis;
mod goto;
mod references;

pub use analysis::{AnalysisHost, IndexingHandle};
pub use goto::{GotoTarget, goto_module};
pub use references::{Reference, ReferenceResult, RenamePlan, find_references, prepare_rename};
