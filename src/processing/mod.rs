//! Prefix processing logic.
//!
//! - [`consolidate`] - merge prefixes into the minimal equivalent set

mod consolidate;

// Re-export public functions
pub use consolidate::consolidate;
