//! CLI command execution: the strip and check runs.
//!
//! These functions own the caller side of the core engines: file
//! collection, per-file reads and writes, parallel processing, report
//! aggregation and exit codes. Each file is processed wholly in memory;
//! per-file failures are reported as skips and never abort the run.

use crate::cli::OutputOptions;
use crate::constants::{DEFAULT_CHECK_PATTERNS, DEFAULT_STRIP_PATTERNS};
use crate::detect::{detect, Detection};
use crate::excise::{excise, ExciseOptions};
use crate::utils::{collect_source_files, has_source_extension, normalize_display_path, resolve_extensions};
use crate::output;

use anyhow::Result;
use rayon::prelude::*;
use rustc_hash::FxHashSet;
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Per-file failure while reading or writing source text.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// The file is not valid UTF-8 and cannot be given to the core.
    #[error("undecodable: not valid UTF-8")]
    Undecodable,
    /// Reading the file failed.
    #[error("read failed: {0}")]
    Read(std::io::Error),
    /// Writing the rewritten file failed.
    #[error("write failed: {0}")]
    Write(std::io::Error),
}

/// Outcome of processing one file.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileOutcome {
    /// The file was read and excised (written back only with `--apply`).
    Processed {
        /// Number of call statements replaced.
        replacements: usize,
        /// Occurrences still detected after excision (verify mode only).
        remaining: usize,
    },
    /// The file was skipped; the reason is reported, not hidden.
    Skipped {
        /// Human-readable skip reason.
        reason: String,
    },
}

/// Report for one file in a strip run.
#[derive(Debug, Serialize)]
pub struct FileReport {
    /// Display path of the file.
    pub file: String,
    /// What happened to it.
    #[serde(flatten)]
    pub outcome: FileOutcome,
}

/// Aggregated counters for a strip run.
#[derive(Debug, Default, Serialize)]
pub struct StripSummary {
    /// Files read and scanned.
    pub files_scanned: usize,
    /// Files with at least one replacement.
    pub files_modified: usize,
    /// Total call statements replaced.
    pub total_replacements: usize,
    /// Files skipped (undecodable or I/O failure).
    pub files_skipped: usize,
    /// Occurrences still detected after excision (verify mode only).
    pub remaining: usize,
    /// Whether rewrites were written to disk.
    pub applied: bool,
    /// Whether the post-excision audit ran.
    pub verified: bool,
}

/// Options for the strip command.
#[derive(Debug, Clone)]
pub struct StripOptions {
    /// Call prefixes to excise.
    pub patterns: Vec<String>,
    /// Patterns for the post-apply verification audit.
    pub check_patterns: Vec<String>,
    /// Literal substituted for each excised call.
    pub replacement: String,
    /// Skip matches that begin inside a string literal.
    pub strict: bool,
    /// Write rewritten files back to disk.
    pub apply: bool,
    /// Re-audit rewritten text and fail if occurrences remain.
    pub verify: bool,
    /// Extra folders to exclude.
    pub exclude: Vec<String>,
    /// Folders to force-include.
    pub include: Vec<String>,
    /// Source extensions to process (empty = defaults).
    pub extensions: Vec<String>,
    /// Output formatting flags.
    pub output: OutputOptions,
}

impl Default for StripOptions {
    fn default() -> Self {
        Self {
            patterns: DEFAULT_STRIP_PATTERNS.iter().map(|&p| p.to_owned()).collect(),
            check_patterns: DEFAULT_CHECK_PATTERNS.iter().map(|&p| p.to_owned()).collect(),
            replacement: crate::constants::DEFAULT_REPLACEMENT.to_owned(),
            strict: false,
            apply: false,
            verify: false,
            exclude: Vec::new(),
            include: Vec::new(),
            extensions: Vec::new(),
            output: OutputOptions::default(),
        }
    }
}

/// Report for one file in a check run.
#[derive(Debug, Serialize)]
pub struct CheckFileReport {
    /// Display path of the file.
    pub file: String,
    /// Remaining occurrences found in this file.
    pub findings: Vec<Detection>,
    /// Set when the file could not be read.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skipped: Option<String>,
}

/// Options for the check command.
#[derive(Debug, Clone)]
pub struct CheckOptions {
    /// Call prefixes to audit.
    pub patterns: Vec<String>,
    /// Extra folders to exclude.
    pub exclude: Vec<String>,
    /// Folders to force-include.
    pub include: Vec<String>,
    /// Source extensions to process (empty = defaults).
    pub extensions: Vec<String>,
    /// Output formatting flags.
    pub output: OutputOptions,
}

impl Default for CheckOptions {
    fn default() -> Self {
        Self {
            patterns: DEFAULT_CHECK_PATTERNS.iter().map(|&p| p.to_owned()).collect(),
            exclude: Vec::new(),
            include: Vec::new(),
            extensions: Vec::new(),
            output: OutputOptions::default(),
        }
    }
}

/// Gathers source files from a mix of file and directory targets.
fn gather_files(targets: &[PathBuf], exclude: &[String], include: &[String], extensions: &FxHashSet<String>, verbose: bool) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for target in targets {
        if target.is_file() {
            if has_source_extension(target, extensions) {
                files.push(target.clone());
            }
        } else {
            let (found, _) = collect_source_files(target, exclude, include, extensions, verbose);
            files.extend(found);
        }
    }
    files.sort();
    files.dedup();
    files
}

fn read_source(path: &Path) -> std::result::Result<String, ProcessError> {
    fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::InvalidData {
            ProcessError::Undecodable
        } else {
            ProcessError::Read(e)
        }
    })
}

/// Excises one file and optionally writes it back.
fn strip_file(path: &Path, options: &StripOptions) -> FileReport {
    let file = normalize_display_path(path);

    let text = match read_source(path) {
        Ok(text) => text,
        Err(err) => {
            return FileReport {
                file,
                outcome: FileOutcome::Skipped {
                    reason: err.to_string(),
                },
            }
        }
    };

    let excise_options = ExciseOptions {
        replacement: options.replacement.clone(),
        strict: options.strict,
    };
    let result = excise(&text, &options.patterns, &excise_options);

    if result.count > 0 && options.apply {
        if let Err(e) = fs::write(path, &result.text) {
            return FileReport {
                file,
                outcome: FileOutcome::Skipped {
                    reason: ProcessError::Write(e).to_string(),
                },
            };
        }
    }

    let remaining = if options.verify {
        detect(&result.text, &options.check_patterns).len()
    } else {
        0
    };

    FileReport {
        file,
        outcome: FileOutcome::Processed {
            replacements: result.count,
            remaining,
        },
    }
}

/// Runs the strip command over `targets`.
///
/// Returns the process exit code: 0 normally, 1 when verify mode still
/// detects occurrences after excision.
///
/// # Errors
///
/// Returns an error if writing the report to `writer` fails.
pub fn run_strip<W: Write>(targets: &[PathBuf], options: &StripOptions, writer: &mut W) -> Result<i32> {
    let extensions = resolve_extensions(&options.extensions);
    let files = gather_files(
        targets,
        &options.exclude,
        &options.include,
        &extensions,
        options.output.verbose,
    );

    let progress = output::create_progress_bar(files.len() as u64);
    let reports: Vec<FileReport> = files
        .par_iter()
        .map(|path| {
            let report = strip_file(path, options);
            progress.inc(1);
            report
        })
        .collect();
    progress.finish_and_clear();

    let mut summary = StripSummary {
        applied: options.apply,
        verified: options.verify,
        ..StripSummary::default()
    };
    for report in &reports {
        match &report.outcome {
            FileOutcome::Processed {
                replacements,
                remaining,
            } => {
                summary.files_scanned += 1;
                summary.total_replacements += replacements;
                summary.remaining += remaining;
                if *replacements > 0 {
                    summary.files_modified += 1;
                }
            }
            FileOutcome::Skipped { .. } => summary.files_skipped += 1,
        }
    }

    if options.output.json {
        let interesting: Vec<&FileReport> = reports
            .iter()
            .filter(|r| match &r.outcome {
                FileOutcome::Processed {
                    replacements,
                    remaining,
                } => *replacements > 0 || *remaining > 0,
                FileOutcome::Skipped { .. } => true,
            })
            .collect();
        let doc = serde_json::json!({
            "summary": &summary,
            "files": interesting,
        });
        writeln!(writer, "{}", serde_json::to_string_pretty(&doc)?)?;
    } else {
        output::print_strip_report(writer, &reports, &summary, &options.output)?;
    }

    let failed = options.verify && summary.remaining > 0;
    Ok(i32::from(failed))
}

/// Audits one file for remaining occurrences.
fn check_file(path: &Path, options: &CheckOptions) -> CheckFileReport {
    let file = normalize_display_path(path);
    match read_source(path) {
        Ok(text) => CheckFileReport {
            file,
            findings: detect(&text, &options.patterns),
            skipped: None,
        },
        Err(err) => CheckFileReport {
            file,
            findings: Vec::new(),
            skipped: Some(err.to_string()),
        },
    }
}

/// Runs the read-only check command over `targets`.
///
/// Returns the process exit code: 0 when the tree is clean, 1 when any
/// occurrence is found.
///
/// # Errors
///
/// Returns an error if writing the report to `writer` fails.
pub fn run_check<W: Write>(targets: &[PathBuf], options: &CheckOptions, writer: &mut W) -> Result<i32> {
    let extensions = resolve_extensions(&options.extensions);
    let files = gather_files(
        targets,
        &options.exclude,
        &options.include,
        &extensions,
        options.output.verbose,
    );

    let progress = output::create_progress_bar(files.len() as u64);
    let reports: Vec<CheckFileReport> = files
        .par_iter()
        .map(|path| {
            let report = check_file(path, options);
            progress.inc(1);
            report
        })
        .collect();
    progress.finish_and_clear();

    let total_findings: usize = reports.iter().map(|r| r.findings.len()).sum();
    let files_flagged = reports.iter().filter(|r| !r.findings.is_empty()).count();

    if options.output.json {
        let flagged: Vec<&CheckFileReport> = reports
            .iter()
            .filter(|r| !r.findings.is_empty() || r.skipped.is_some())
            .collect();
        let doc = serde_json::json!({
            "files_scanned": reports.len(),
            "files_flagged": files_flagged,
            "total_findings": total_findings,
            "files": flagged,
        });
        writeln!(writer, "{}", serde_json::to_string_pretty(&doc)?)?;
    } else {
        output::print_check_report(writer, &reports, total_findings, &options.output)?;
    }

    Ok(i32::from(total_findings > 0))
}
