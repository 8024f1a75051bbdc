//! bug-index: stable identifiers and lookups for JSONL bug datasets
//!
//! `update` enriches every record of a line-delimited JSON file with a random
//! record id and group id; `lookup` rebuilds in-memory indices from the
//! enriched file and answers queries by id or by group.

pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod render;
pub mod store;
pub mod utils;

pub use domain::{Config, DisplayOptions, FieldNames, Record};
pub use error::StoreError;
pub use store::RecordIndex;
