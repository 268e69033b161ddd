// cargo watch -x 'fmt' -x 'run'  // 'run -- --input ips.txt'

//! Consolidate IP prefixes (CIDR blocks) into the minimal equivalent set of
//! non-overlapping prefixes covering exactly the same address space.
//!
//! The core surface is two operations: [`parse`] (or `str::parse::<Prefix>`)
//! turns a textual address or CIDR into a canonical [`Prefix`], and
//! [`consolidate`] merges a collection of prefixes. The binary wires these
//! to a line-oriented input file and a text or JSON report.

pub mod error;
pub mod input;
pub mod models;
pub mod output;
pub mod processing;

use std::error::Error;
use std::path::Path;

pub use error::ParseError;
pub use models::{Family, Prefix};
pub use processing::consolidate;

/// Parse a textual address or CIDR prefix into canonical form.
///
/// Shorthand for `text.parse::<Prefix>()`. An address without an explicit
/// length is a host route; host bits beyond an explicit length are masked
/// with a warning (see [`Prefix`]).
pub fn parse(text: &str) -> Result<Prefix, ParseError> {
    text.parse()
}

/// Read a prefix list file and consolidate it.
///
/// Returns the number of prefixes read along with the consolidated set.
pub fn consolidate_file(
    path: &Path,
    skip_invalid: bool,
) -> Result<(usize, Vec<Prefix>), Box<dyn Error>> {
    let prefixes = input::read_prefix_file(path, skip_invalid)?;
    let input_count = prefixes.len();
    let consolidated = consolidate(&prefixes);
    Ok((input_count, consolidated))
}
