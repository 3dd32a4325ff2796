//! Shared entry point: argument parsing, config merging and dispatch.

use crate::cli::{Cli, Commands, FilterOptions, OutputOptions, PathArgs};
use crate::commands::{run_check, run_strip, CheckOptions, StripOptions};
use crate::config::{Config, DelogConfig};
use crate::constants::{DEFAULT_CHECK_PATTERNS, DEFAULT_REPLACEMENT, DEFAULT_STRIP_PATTERNS};

use anyhow::Result;
use clap::error::ErrorKind;
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;

/// Runs delog with the given arguments (without the program name).
///
/// # Errors
///
/// Returns an error if argument parsing fails, or if the command
/// execution fails.
pub fn run_with_args(args: Vec<String>) -> Result<i32> {
    run_with_args_to(args, &mut std::io::stdout())
}

/// Run delog with the given arguments, writing output to the specified
/// writer.
///
/// This is the testable version of `run_with_args` that allows output
/// capture.
///
/// # Errors
///
/// Returns an error if argument parsing fails, or if the command
/// execution fails.
pub fn run_with_args_to<W: Write>(args: Vec<String>, writer: &mut W) -> Result<i32> {
    let argv = std::iter::once("delog".to_owned()).chain(args);
    let mut cli = match Cli::try_parse_from(argv) {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            write!(writer, "{e}")?;
            return Ok(0);
        }
        Err(e) => return Err(e.into()),
    };

    match cli.command.take() {
        Some(Commands::Check {
            paths,
            output,
            filter,
            patterns,
        }) => {
            let targets = resolve_targets(&paths);
            let config = Config::load_from_path(&targets[0]);
            let options = build_check_options(patterns, &filter, output, &config.delog);
            run_check(&targets, &options, writer)
        }
        None => {
            let targets = resolve_targets(&cli.paths);
            let config = Config::load_from_path(&targets[0]);
            let options = build_strip_options(&cli, &config.delog);
            run_strip(&targets, &options, writer)
        }
    }
}

/// Resolves the target paths: `--root`, positional paths, or the current
/// directory.
fn resolve_targets(paths: &PathArgs) -> Vec<PathBuf> {
    if let Some(root) = &paths.root {
        vec![root.clone()]
    } else if paths.paths.is_empty() {
        vec![PathBuf::from(".")]
    } else {
        paths.paths.clone()
    }
}

fn owned(patterns: &[&str]) -> Vec<String> {
    patterns.iter().map(|&p| p.to_owned()).collect()
}

/// Merges CLI arguments over config file values over built-in defaults.
fn build_strip_options(cli: &Cli, config: &DelogConfig) -> StripOptions {
    let patterns = if cli.patterns.is_empty() {
        config
            .patterns
            .clone()
            .unwrap_or_else(|| owned(DEFAULT_STRIP_PATTERNS))
    } else {
        cli.patterns.clone()
    };

    let check_patterns = config
        .check_patterns
        .clone()
        .unwrap_or_else(|| owned(DEFAULT_CHECK_PATTERNS));

    let mut exclude = cli.filter.exclude_folders.clone();
    if let Some(config_exclude) = &config.exclude_folders {
        exclude.extend(config_exclude.iter().cloned());
    }
    let mut include = cli.filter.include_folders.clone();
    if let Some(config_include) = &config.include_folders {
        include.extend(config_include.iter().cloned());
    }

    let extensions = if cli.filter.extensions.is_empty() {
        config.extensions.clone().unwrap_or_default()
    } else {
        cli.filter.extensions.clone()
    };

    StripOptions {
        patterns,
        check_patterns,
        replacement: cli
            .replacement
            .clone()
            .or_else(|| config.replacement.clone())
            .unwrap_or_else(|| DEFAULT_REPLACEMENT.to_owned()),
        strict: cli.strict || config.strict.unwrap_or(false),
        apply: cli.apply,
        verify: cli.verify || config.verify.unwrap_or(false),
        exclude,
        include,
        extensions,
        output: cli.output.clone(),
    }
}

fn build_check_options(
    cli_patterns: Vec<String>,
    filter: &FilterOptions,
    output: OutputOptions,
    config: &DelogConfig,
) -> CheckOptions {
    let patterns = if cli_patterns.is_empty() {
        config
            .check_patterns
            .clone()
            .unwrap_or_else(|| owned(DEFAULT_CHECK_PATTERNS))
    } else {
        cli_patterns
    };

    let mut exclude = filter.exclude_folders.clone();
    if let Some(config_exclude) = &config.exclude_folders {
        exclude.extend(config_exclude.iter().cloned());
    }
    let mut include = filter.include_folders.clone();
    if let Some(config_include) = &config.include_folders {
        include.extend(config_include.iter().cloned());
    }

    let extensions = if filter.extensions.is_empty() {
        config.extensions.clone().unwrap_or_default()
    } else {
        filter.extensions.clone()
    };

    CheckOptions {
        patterns,
        exclude,
        include,
        extensions,
        output,
    }
}
