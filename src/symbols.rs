//! Marker lookup over raw source lines.

use crate::error::{Error, Result};

/// A line containing a marker string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    /// The marker that was searched for
    pub marker: String,
    /// Zero-based line index
    pub line_number: usize,
    /// The full, unmodified line
    pub raw_line: String,
}

/// Returns every line of `lines` that contains `marker`, in order.
///
/// Matching is plain substring containment. An empty `lines` slice is reported
/// as [`Error::EmptyInput`]; a non-empty file without matches yields an empty
/// vector.
pub fn locate_symbols(lines: &[String], marker: &str) -> Result<Vec<Symbol>> {
    if lines.is_empty() {
        return Err(Error::EmptyInput);
    }

    Ok(lines
        .iter()
        .enumerate()
        .filter(|(_, line)| line.contains(marker))
        .map(|(line_number, line)| Symbol {
            marker: marker.to_string(),
            line_number,
            raw_line: line.clone(),
        })
        .collect())
}
