//! Prefix list file reading.

use crate::models::Prefix;
use std::error::Error;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Read a prefix list from a text file, one address or CIDR prefix per line.
///
/// Blank lines and `#` comment lines are skipped. The default policy for a
/// malformed line is to abort with the file name and line number, since
/// silently dropping an entry from a security-relevant list is dangerous.
/// With `skip_invalid` the line is logged at warn level and dropped instead.
pub fn read_prefix_file(path: &Path, skip_invalid: bool) -> Result<Vec<Prefix>, Box<dyn Error>> {
    let file =
        File::open(path).map_err(|e| format!("Error opening {}: {}", path.display(), e))?;
    let mut prefixes = Vec::new();
    for (i, line) in BufReader::new(file).lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match line.parse::<Prefix>() {
            Ok(prefix) => prefixes.push(prefix),
            Err(e) if skip_invalid => {
                log::warn!("skipping line {}: {}", i + 1, e);
            }
            Err(e) => {
                return Err(format!("{}:{}: {}", path.display(), i + 1, e).into());
            }
        }
    }
    log::info!("read {} prefixes from {}", prefixes.len(), path.display());
    Ok(prefixes)
}
