use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

/// Load the set of nicks to exclude from all tallies.
///
/// One nick per line, case-insensitive, surrounding whitespace and empty lines
/// ignored. A missing file means "no ignore list" and yields an empty set;
/// every other read failure (permissions, invalid encoding) propagates, since
/// treating it as empty would silently disable filtering.
pub fn load(path: Option<&Path>) -> Result<HashSet<String>> {
    let Some(path) = path else {
        return Ok(HashSet::new());
    };

    match fs::read_to_string(path) {
        Ok(text) => Ok(text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_lowercase)
            .collect()),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("ignore list {} not found, nothing filtered", path.display());
            Ok(HashSet::new())
        }
        Err(e) => {
            Err(e).with_context(|| format!("failed to read ignore list {}", path.display()))
        }
    }
}
