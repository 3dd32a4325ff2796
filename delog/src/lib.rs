//! Core library for the `delog` console-call excision tool.
//!
//! This library finds call-expressions with a known prefix (for example
//! `console.log(...)`) in JavaScript/TypeScript source text, removes them
//! while keeping the surrounding code syntactically valid, and audits
//! source trees for calls that remain.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

/// Module containing the statement-boundary scanner and occurrence locator.
/// This is the lexical core that finds where a matched call statement ends.
pub mod scanner;

/// Module containing the excision engine.
/// This drives the scanner across a whole text and assembles the rewrite.
pub mod excise;

/// Module containing the read-only detection engine.
/// This reports remaining call occurrences with line numbers for audits.
pub mod detect;

/// Module containing shared constants and default pattern sets.
pub mod constants;

/// Module for loading configuration from `.delog.toml`.
pub mod config;

/// Module containing utility functions.
/// This includes line indexing, path display helpers and file collection.
pub mod utils;

/// Module for handling CLI commands and their execution logic.
pub mod commands;

/// Module for rich CLI output formatting with colored text and tables.
pub mod output;

/// Module defining the command-line interface arguments and structs.
pub mod cli;

/// Module defining the entry point logic shared by the binary and tests.
pub mod entry_point;
