//! Configuration loading
//!
//! Settings come from defaults, a config file, `BUG_INDEX_*` environment
//! variables and CLI flags, in increasing order of precedence.

pub mod loader;

pub use loader::{apply_env, load_config, resolve_config, ENV_PREFIX};
