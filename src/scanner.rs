use anyhow::{Context, Result};
use log::{debug, warn};
use std::path::PathBuf;
use walkdir::WalkDir;

/// Directory names never descended into.
const SKIPPED_DIRS: &[&str] = &["vendor", "target", "node_modules"];

/// File scanner for traversing source trees.
///
/// The `FileScanner` recursively walks a directory and collects every file whose extension
/// is in the configured set. Hidden directories (starting with `.`) and dependency or build
/// directories (`vendor`, `target`, `node_modules`) are skipped.
///
/// # Example
///
/// ```no_run
/// use swagger_from_comments::scanner::FileScanner;
/// use std::path::PathBuf;
///
/// let scanner = FileScanner::new(PathBuf::from("./my-service"), vec!["go".to_string()]);
/// let result = scanner.scan().unwrap();
/// println!("Found {} source files", result.source_files.len());
/// ```
pub struct FileScanner {
    root_path: PathBuf,
    extensions: Vec<String>,
}

/// Result of directory scanning operation.
pub struct ScanResult {
    /// Discovered source files, sorted lexicographically by path
    pub source_files: Vec<PathBuf>,
    /// Warning messages for entries that could not be accessed
    pub warnings: Vec<String>,
}

impl FileScanner {
    /// Creates a new `FileScanner` for `root_path`, accepting files with any of `extensions`
    /// (given without the leading dot).
    pub fn new(root_path: PathBuf, extensions: Vec<String>) -> Self {
        Self {
            root_path,
            extensions,
        }
    }

    /// Scans the directory tree and collects matching files.
    ///
    /// Entries that cannot be accessed are recorded as warnings and scanning continues.
    /// The returned list is sorted so that downstream last-write-wins merging does not
    /// depend on the platform's directory traversal order.
    ///
    /// # Errors
    ///
    /// Returns an error if the root directory itself cannot be read.
    pub fn scan(&self) -> Result<ScanResult> {
        std::fs::read_dir(&self.root_path).with_context(|| {
            format!("Failed to read source directory: {}", self.root_path.display())
        })?;

        let mut source_files = Vec::new();
        let mut warnings = Vec::new();

        for entry in WalkDir::new(&self.root_path)
            .into_iter()
            .filter_entry(|e| {
                if e.depth() == 0 || !e.file_type().is_dir() {
                    return true;
                }

                let file_name = e.file_name().to_string_lossy();
                let is_hidden = file_name.starts_with('.');
                let is_skipped = SKIPPED_DIRS.contains(&file_name.as_ref());

                !is_hidden && !is_skipped
            })
        {
            match entry {
                Ok(entry) => {
                    let path = entry.path();

                    if path.is_file() && self.has_wanted_extension(path) {
                        source_files.push(path.to_path_buf());
                    }
                }
                Err(e) => {
                    let warning = format!("Failed to access path: {}", e);
                    warn!("{}", warning);
                    warnings.push(warning);
                }
            }
        }

        source_files.sort();
        debug!(
            "Scanned {}: {} matching files",
            self.root_path.display(),
            source_files.len()
        );

        Ok(ScanResult {
            source_files,
            warnings,
        })
    }

    fn has_wanted_extension(&self, path: &std::path::Path) -> bool {
        path.extension()
            .and_then(|s| s.to_str())
            .map(|ext| self.extensions.iter().any(|wanted| wanted == ext))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn go_scanner(root: &std::path::Path) -> FileScanner {
        FileScanner::new(root.to_path_buf(), vec!["go".to_string()])
    }

    #[test]
    fn test_scan_normal_directory() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        fs::write(root.join("main.go"), "package main").unwrap();
        fs::write(root.join("routes.go"), "package main").unwrap();
        fs::write(root.join("readme.md"), "# README").unwrap();

        let result = go_scanner(root).scan().unwrap();

        assert_eq!(result.source_files.len(), 2);
        assert!(result.warnings.is_empty());

        let file_names: Vec<String> = result
            .source_files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();

        assert!(file_names.contains(&"main.go".to_string()));
        assert!(file_names.contains(&"routes.go".to_string()));
    }

    #[test]
    fn test_scan_empty_directory() {
        let temp_dir = TempDir::new().unwrap();

        let result = go_scanner(temp_dir.path()).scan().unwrap();

        assert_eq!(result.source_files.len(), 0);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_scan_missing_root_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nope");

        let result = go_scanner(&missing).scan();

        assert!(result.is_err());
        assert!(result
            .err()
            .unwrap()
            .to_string()
            .contains("Failed to read source directory"));
    }

    #[test]
    fn test_scan_nested_directories_sorted() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        fs::create_dir_all(root.join("api/routes")).unwrap();
        fs::create_dir_all(root.join("models")).unwrap();

        fs::write(root.join("main.go"), "package main").unwrap();
        fs::write(root.join("models/user.go"), "package models").unwrap();
        fs::write(root.join("api/routes/users.go"), "package routes").unwrap();
        fs::write(root.join("api/routes/tasks.go"), "package routes").unwrap();

        let result = go_scanner(root).scan().unwrap();

        let relative: Vec<String> = result
            .source_files
            .iter()
            .map(|p| p.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
            .collect();

        assert_eq!(
            relative,
            vec![
                "api/routes/tasks.go",
                "api/routes/users.go",
                "main.go",
                "models/user.go",
            ]
        );
    }

    #[test]
    fn test_scan_skips_vendor_and_hidden_directories() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        fs::create_dir(root.join("vendor")).unwrap();
        fs::write(root.join("vendor/lib.go"), "package lib").unwrap();
        fs::create_dir(root.join(".git")).unwrap();
        fs::write(root.join(".git/hook.go"), "package hook").unwrap();

        fs::write(root.join("main.go"), "package main").unwrap();

        let result = go_scanner(root).scan().unwrap();

        assert_eq!(result.source_files.len(), 1);
        assert_eq!(
            result.source_files[0].file_name().unwrap().to_string_lossy(),
            "main.go"
        );
    }

    #[test]
    fn test_scan_with_multiple_extensions() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        fs::write(root.join("a.go"), "").unwrap();
        fs::write(root.join("b.rs"), "").unwrap();
        fs::write(root.join("c.py"), "").unwrap();

        let scanner = FileScanner::new(
            root.to_path_buf(),
            vec!["go".to_string(), "rs".to_string()],
        );
        let result = scanner.scan().unwrap();

        assert_eq!(result.source_files.len(), 2);
    }
}
