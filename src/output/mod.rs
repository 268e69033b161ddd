//! Output formatting for consolidated prefixes.
//!
//! This module handles rendering the consolidation result:
//! - [`terminal`] - human-readable summary with colors
//! - [`json`] - JSON array of canonical CIDR strings

mod json;
mod terminal;

pub use json::to_json;
pub use terminal::{merged_lines, print_summary};
