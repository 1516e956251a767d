mod reference_cache;
mod unresolved_index;

pub use reference_cache::ReferenceCache;
pub use unresolved_index::UnresolvedIndex;
