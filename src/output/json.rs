//! JSON output formatting.

use crate::models::Prefix;
use std::error::Error;

/// Render the consolidated list as a JSON array of canonical CIDR strings.
pub fn to_json(consolidated: &[Prefix]) -> Result<String, Box<dyn Error>> {
    Ok(serde_json::to_string_pretty(consolidated)?)
}
