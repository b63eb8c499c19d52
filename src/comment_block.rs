//! Recovery of the contiguous comment block surrounding a marker line.
//!
//! This is a fixed-prefix scan: a line belongs to the block when it starts with the
//! configured single-line comment prefix (e.g. `"// "`). Block or doc-style comments
//! are not recognised.

/// A run of contiguous comment lines with their prefix stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentBlock {
    /// Comment bodies, in source order
    pub lines: Vec<String>,
    /// Zero-based index of the first line of the block
    pub start_line: usize,
    /// Zero-based index of the last line of the block (inclusive)
    pub end_line: usize,
}

impl CommentBlock {
    /// Index of the first line after the block, where the annotated declaration starts.
    pub fn next_line(&self) -> usize {
        self.end_line + 1
    }
}

fn is_comment_line(line: &str, prefix: &str) -> bool {
    !prefix.is_empty() && line.starts_with(prefix)
}

/// Returns the comment block containing `symbol_line`.
///
/// Walks upward while the preceding line carries `prefix`, then downward the same way.
/// The symbol line itself is always part of the block; if it lacks the prefix its text
/// is kept unstripped. `symbol_line` must be a valid index into `lines`.
pub fn extract_comment_block(lines: &[String], symbol_line: usize, prefix: &str) -> CommentBlock {
    let mut start_line = symbol_line;
    while start_line > 0 && is_comment_line(&lines[start_line - 1], prefix) {
        start_line -= 1;
    }

    let mut end_line = symbol_line;
    while end_line + 1 < lines.len() && is_comment_line(&lines[end_line + 1], prefix) {
        end_line += 1;
    }

    let body = lines[start_line..=end_line]
        .iter()
        .map(|line| line.strip_prefix(prefix).unwrap_or(line).to_string())
        .collect();

    CommentBlock {
        lines: body,
        start_line,
        end_line,
    }
}
