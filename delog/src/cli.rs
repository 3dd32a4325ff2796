use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Help text for configuration file options, shown at the bottom of --help.
const CONFIG_HELP: &str = "\
CONFIGURATION FILE (.delog.toml):
  Create this file in your project root to set defaults.

  [delog]
  patterns = [\"console.\"]            # Call prefixes to excise
  check_patterns = [\"console.log\"]   # Prefixes audited by `check` / --verify
  replacement = \"void 0;\"            # Literal substituted for each call
  strict = false                     # Skip matches inside string literals
  verify = false                     # Re-audit after --apply, fail if calls remain

  # Path filters
  extensions = [\"ts\", \"tsx\", \"js\"]  # Source extensions to process
  exclude_folders = [\"generated\"]
  include_folders = [\"dist\"]         # Force-include these
";

/// Shared path arguments (mutually exclusive paths/root).
#[derive(Args, Debug, Default, Clone)]
pub struct PathArgs {
    /// Paths to process (files or directories).
    /// Can be a single directory, multiple files, or a mix of both.
    /// When no paths are provided, defaults to the current directory.
    /// Cannot be used with --root.
    #[arg(conflicts_with = "root")]
    pub paths: Vec<PathBuf>,

    /// Project root to process.
    /// Use this instead of positional paths when running from a different
    /// directory. Cannot be used together with positional path arguments.
    #[arg(long, conflicts_with = "paths")]
    pub root: Option<PathBuf>,
}

/// Options for output formatting and verbosity.
#[derive(Args, Debug, Default, Clone)]
pub struct OutputOptions {
    /// Output raw JSON.
    #[arg(long)]
    pub json: bool,

    /// Enable verbose output for debugging (shows files being processed).
    #[arg(short, long)]
    pub verbose: bool,

    /// Quiet mode: show only the summary and gate result.
    #[arg(long)]
    pub quiet: bool,
}

/// Options for traversal filtering.
#[derive(Args, Debug, Default, Clone)]
pub struct FilterOptions {
    /// Folders to exclude from traversal.
    #[arg(long, alias = "exclude-folder")]
    pub exclude_folders: Vec<String>,

    /// Folders to force-include (overrides default exclusions).
    #[arg(long, alias = "include-folder")]
    pub include_folders: Vec<String>,

    /// Source file extensions to process (default: ts tsx js jsx mjs cjs).
    #[arg(long = "ext")]
    pub extensions: Vec<String>,
}

/// Command line interface configuration using `clap`.
/// This struct defines the arguments and flags accepted by the program.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "delog - Remove console/logging calls from source trees and audit what remains",
    long_about = None,
    after_help = CONFIG_HELP
)]
pub struct Cli {
    #[command(subcommand)]
    /// The subcommand to execute. Without one, delog strips calls
    /// (preview by default, --apply to write).
    pub command: Option<Commands>,

    /// Global path options (paths vs root).
    #[command(flatten)]
    pub paths: PathArgs,

    /// Output formatting options.
    #[command(flatten)]
    pub output: OutputOptions,

    /// Traversal filter options.
    #[command(flatten)]
    pub filter: FilterOptions,

    /// Call prefix to excise (repeatable; default: console.).
    #[arg(short = 'p', long = "pattern")]
    pub patterns: Vec<String>,

    /// Literal substituted for each excised call statement.
    #[arg(long)]
    pub replacement: Option<String>,

    /// Skip matches that begin inside a string literal on the same line.
    #[arg(long)]
    pub strict: bool,

    /// Apply the rewrites to files. Without this flag, delog only shows a
    /// preview of what would be changed.
    #[arg(short = 'a', long)]
    pub apply: bool,

    /// After --apply, re-audit the rewritten text and exit with code 1 if
    /// any call remains.
    #[arg(long)]
    pub verify: bool,
}

#[derive(Subcommand, Debug)]
/// Available subcommands.
pub enum Commands {
    /// Audit a tree for remaining calls without modifying anything.
    /// Exits with code 1 if any occurrence is found.
    Check {
        /// Path options (paths vs root).
        #[command(flatten)]
        paths: PathArgs,

        /// Output formatting options.
        #[command(flatten)]
        output: OutputOptions,

        /// Traversal filter options.
        #[command(flatten)]
        filter: FilterOptions,

        /// Call prefix to audit (repeatable; default: the console methods).
        #[arg(short = 'p', long = "pattern")]
        patterns: Vec<String>,
    },
}
