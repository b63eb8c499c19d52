use anyhow::{Context, Result};
use log::{debug, warn};
use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

/// A source file loaded as an ordered sequence of lines.
///
/// Lines are indexed from zero and never change once loaded. Line terminators
/// (`\n` or `\r\n`) are stripped.
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// Path to the source file
    pub path: PathBuf,
    /// The file's lines, without terminators
    pub lines: Vec<String>,
}

impl SourceFile {
    /// Builds a `SourceFile` from in-memory text.
    pub fn from_text(path: impl Into<PathBuf>, text: &str) -> Self {
        Self {
            path: path.into(),
            lines: text.lines().map(str::to_string).collect(),
        }
    }
}

/// Reads source files into [`SourceFile`] values.
pub struct SourceReader;

impl SourceReader {
    /// Reads a single file into lines.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read. Invalid UTF-8 is not an error: such
    /// bytes are replaced with `U+FFFD` and a warning is logged.
    pub fn read_file(path: &Path) -> Result<SourceFile> {
        debug!("Reading file: {}", path.display());

        let bytes =
            fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))?;

        let content = String::from_utf8_lossy(&bytes);
        if let Cow::Owned(_) = content {
            warn!("{} is not valid UTF-8; invalid bytes were replaced", path.display());
        }

        Ok(SourceFile::from_text(path, &content))
    }

    /// Reads every file in `paths`, preserving order.
    ///
    /// A file that was enumerated but cannot be read makes the whole result an
    /// error: a document built without it would be silently incomplete.
    pub fn read_files(paths: &[PathBuf]) -> Result<Vec<SourceFile>> {
        debug!("Reading {} files", paths.len());
        paths.iter().map(|path| Self::read_file(path)).collect()
    }
}
