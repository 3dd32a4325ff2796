//! Shared constants and default pattern sets.

use regex::Regex;
use rustc_hash::FxHashMap;
use rustc_hash::FxHashSet;
use std::sync::{Mutex, OnceLock};

/// Name of the configuration file searched for in the project tree.
pub const CONFIG_FILENAME: &str = ".delog.toml";

/// The neutral literal substituted for each excised call statement.
pub const DEFAULT_REPLACEMENT: &str = "void 0;";

/// Default excise patterns: the bare `console.` prefix catches every
/// console method in one pass.
pub const DEFAULT_STRIP_PATTERNS: &[&str] = &["console."];

/// Default audit patterns: the explicit console methods, checked one by
/// one so reports name the exact method that remains.
pub const DEFAULT_CHECK_PATTERNS: &[&str] = &[
    "console.log",
    "console.error",
    "console.warn",
    "console.info",
    "console.debug",
    "console.trace",
];

/// Set of folders to exclude from traversal by default.
pub fn get_default_exclude_folders() -> &'static FxHashSet<&'static str> {
    static SET: OnceLock<FxHashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| {
        let mut s = FxHashSet::default();
        s.insert(".git");
        s.insert("node_modules");
        s.insert(".next");
        s.insert(".turbo");
        s.insert("dist");
        s.insert("build");
        s.insert(".output");
        s.insert(".cache");
        s.insert(".vscode");
        s.insert(".idea");
        s
    })
}

/// Source file extensions processed by default (lowercase, no dot).
pub fn get_default_extensions() -> &'static FxHashSet<&'static str> {
    static SET: OnceLock<FxHashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| {
        let mut s = FxHashSet::default();
        s.insert("ts");
        s.insert("tsx");
        s.insert("js");
        s.insert("jsx");
        s.insert("mjs");
        s.insert("cjs");
        s
    })
}

/// Returns the compiled detection regex for `pattern`: the escaped pattern,
/// optional whitespace, then an opening parenthesis, case-insensitive.
///
/// Compiled regexes are cached process-wide since the same small pattern
/// set is applied to every file in a run.
///
/// # Panics
///
/// Never in practice: the pattern is regex-escaped before compilation.
#[must_use]
pub fn detection_regex(pattern: &str) -> Regex {
    static CACHE: OnceLock<Mutex<FxHashMap<String, Regex>>> = OnceLock::new();

    let build = |pattern: &str| {
        #[allow(clippy::expect_used)]
        Regex::new(&format!(r"(?i){}\s*\(", regex::escape(pattern)))
            .expect("escaped detection pattern must compile")
    };

    let cache = CACHE.get_or_init(|| Mutex::new(FxHashMap::default()));
    match cache.lock() {
        Ok(mut map) => map
            .entry(pattern.to_owned())
            .or_insert_with(|| build(pattern))
            .clone(),
        // Poisoned lock: fall back to an uncached build.
        Err(_) => build(pattern),
    }
}
