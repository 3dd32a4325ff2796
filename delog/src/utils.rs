//! Utility functions: line indexing, path display and source collection.

use crate::constants::{get_default_exclude_folders, get_default_extensions};
use rustc_hash::FxHashSet;

/// A utility struct to convert byte offsets to line numbers.
///
/// The scanner and detector work with byte offsets, but findings are
/// reported with 1-based line numbers which are more human-readable.
#[derive(Debug, Clone)]
pub struct LineIndex {
    /// Stores the byte index of the start of each line.
    line_starts: Vec<usize>,
}

impl LineIndex {
    /// Creates a new `LineIndex` by scanning the source code for newlines.
    /// Uses byte iteration since '\n' is always a single byte in UTF-8.
    #[must_use]
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        for (i, byte) in source.as_bytes().iter().enumerate() {
            if *byte == b'\n' {
                line_starts.push(i + 1);
            }
        }
        Self { line_starts }
    }

    /// Converts a byte offset to a 1-indexed line number.
    #[must_use]
    pub fn line_of(&self, offset: usize) -> usize {
        match self.line_starts.binary_search(&offset) {
            Ok(line) => line + 1,
            Err(line) => line,
        }
    }
}

/// Normalizes a path for CLI display.
///
/// - Converts backslashes to forward slashes (for cross-platform consistency)
/// - Strips leading "./" or ".\" prefix (for cleaner output)
///
/// # Examples
/// ```
/// use std::path::Path;
/// use delog::utils::normalize_display_path;
///
/// assert_eq!(normalize_display_path(Path::new(".\\web\\app.tsx")), "web/app.tsx");
/// assert_eq!(normalize_display_path(Path::new("./src/index.ts")), "src/index.ts");
/// ```
#[must_use]
pub fn normalize_display_path(path: &std::path::Path) -> String {
    let s = path.to_string_lossy();
    let normalized = s.replace('\\', "/");
    normalized
        .strip_prefix("./")
        .unwrap_or(&normalized)
        .to_owned()
}

/// Checks if a name matches any exclusion pattern.
/// Supports exact matching and wildcard patterns starting with `*.`.
#[must_use]
pub fn is_excluded(name: &str, excludes: &[String]) -> bool {
    for exclude in excludes {
        if exclude.starts_with("*.") {
            if name.ends_with(&exclude[1..]) {
                return true;
            }
        } else if name == exclude {
            return true;
        }
    }
    false
}

/// Returns true when `path` has one of the given lowercase extensions.
#[must_use]
pub fn has_source_extension(path: &std::path::Path, extensions: &FxHashSet<String>) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.contains(&ext.to_ascii_lowercase()))
}

/// Builds the effective extension set from user input, falling back to the
/// defaults when no extensions are given. Leading dots are tolerated.
#[must_use]
pub fn resolve_extensions(user_extensions: &[String]) -> FxHashSet<String> {
    if user_extensions.is_empty() {
        get_default_extensions()
            .iter()
            .map(|&e| e.to_owned())
            .collect()
    } else {
        user_extensions
            .iter()
            .map(|e| e.trim_start_matches('.').to_ascii_lowercase())
            .collect()
    }
}

/// Collects source files from a directory with gitignore support.
///
/// Uses the `ignore` crate to respect .gitignore, .git/info/exclude, and
/// global gitignore IN ADDITION to the hardcoded default exclusions
/// (`node_modules`, .next, dist, etc.).
///
/// # Arguments
/// * `root` - Root directory to search
/// * `exclude` - Additional user-specified exclusion patterns
/// * `include` - Folders to force-include (overrides excludes)
/// * `extensions` - Lowercase file extensions to accept
/// * `verbose` - Whether to print walk errors to stderr
///
/// # Returns
/// Tuple of (Vector of `PathBuf` for all source files found, directory count)
#[must_use]
pub fn collect_source_files(
    root: &std::path::Path,
    exclude: &[String],
    include: &[String],
    extensions: &FxHashSet<String>,
    verbose: bool,
) -> (Vec<std::path::PathBuf>, usize) {
    use ignore::WalkBuilder;

    // Merge user excludes with default excludes
    let default_excludes: Vec<String> = get_default_exclude_folders()
        .iter()
        .map(|&s| s.to_owned())
        .collect();
    let mut all_excludes: Vec<String> = exclude.iter().cloned().chain(default_excludes).collect();

    // Remove force-included folders from exclusion list
    all_excludes.retain(|ex| !include.iter().any(|inc| ex == inc));

    let excludes_for_filter = all_excludes.clone();
    let root_for_filter = root.to_path_buf();

    // Add filter_entry to skip excluded directories at traversal time,
    // preventing descent into node_modules, .next, dist, etc.
    let walker = WalkBuilder::new(root)
        .hidden(false) // Don't skip hidden files (we handle that with defaults)
        .git_ignore(true)
        .git_global(true)
        .git_exclude(true)
        .filter_entry(move |entry| {
            // Always allow the root directory
            if entry.path() == root_for_filter {
                return true;
            }

            // Only filter directories - files are filtered by extension later
            if !entry.file_type().is_some_and(|ft| ft.is_dir()) {
                return true;
            }

            if let Some(name) = entry.file_name().to_str() {
                if is_excluded(name, &excludes_for_filter) {
                    return false;
                }
            }

            true
        })
        .build();

    let mut files = Vec::new();
    let mut dir_count = 0;

    for result in walker {
        if let Ok(entry) = result {
            let path = entry.path();

            // Count directories (excluded dirs won't appear here due to filter_entry)
            if entry.file_type().is_some_and(|ft| ft.is_dir()) {
                if path != root {
                    dir_count += 1;
                }
                continue;
            }

            if !has_source_extension(path, extensions) {
                continue;
            }

            files.push(path.to_path_buf());
        } else if verbose {
            if let Err(e) = result {
                eprintln!("Walk error: {e}");
            }
        }
    }

    (files, dir_count)
}
