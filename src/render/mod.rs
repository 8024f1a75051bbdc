//! Output rendering

pub mod display;

pub use display::{format_for_display, Selection};
