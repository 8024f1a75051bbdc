//! Small shared helpers.

pub mod ids;
pub mod paths;

pub use ids::{is_identifier, new_identifier};
pub use paths::{ensure_parent_dir, snippet};
