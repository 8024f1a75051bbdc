//! JSONL record store: enrichment, index rebuild and lookups.
//!
//! `update` runs [`RecordIndex::transform`] once per dataset; `lookup` builds a
//! fresh index with [`RecordIndex::open`] and queries it. Nothing is shared
//! between sessions.

pub mod index;
pub mod load;
mod lines;
pub mod transform;

pub use index::RecordIndex;
pub use load::LoadStats;
pub use transform::TransformStats;
