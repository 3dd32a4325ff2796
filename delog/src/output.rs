//! Rich CLI output formatting: colored text, tables and progress bars.

use crate::cli::OutputOptions;
use crate::commands::{CheckFileReport, FileOutcome, FileReport, StripSummary};
use colored::Colorize;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, ContentArrangement, Table};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::io::Write;
use std::time::Duration;

/// Create a progress bar with file count.
///
/// In test mode, returns a hidden progress bar to avoid polluting test
/// output.
#[must_use]
pub fn create_progress_bar(total_files: u64) -> ProgressBar {
    if cfg!(test) {
        return ProgressBar::hidden();
    }

    let pb =
        ProgressBar::with_draw_target(Some(total_files), ProgressDrawTarget::stderr_with_hz(20));
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓░"),
    );
    pb.set_message("scanning...");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.tick();
    pb
}

/// Print the main header with box-drawing characters.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_header(writer: &mut impl Write, title: &str) -> std::io::Result<()> {
    writeln!(writer)?;
    writeln!(
        writer,
        "{}",
        "╔════════════════════════════════════════╗".cyan()
    )?;
    writeln!(writer, "{}", format!("║  {title:<38}║").cyan().bold())?;
    writeln!(
        writer,
        "{}",
        "╚════════════════════════════════════════╝".cyan()
    )?;
    writeln!(writer)?;
    Ok(())
}

fn pill(label: &str, count: usize) -> String {
    if count == 0 {
        format!("{}: {}", label, count.to_string().green())
    } else {
        format!("{}: {}", label, count.to_string().red().bold())
    }
}

/// Print the full strip report: header, per-file lines, summary pills and
/// the verify gate line.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_strip_report(
    writer: &mut impl Write,
    reports: &[FileReport],
    summary: &StripSummary,
    options: &OutputOptions,
) -> std::io::Result<()> {
    if !options.quiet {
        print_header(writer, "Console Call Excision")?;

        for report in reports {
            match &report.outcome {
                FileOutcome::Processed { replacements, .. } if *replacements > 0 => {
                    let verb = if summary.applied {
                        "removed"
                    } else {
                        "would remove"
                    };
                    writeln!(
                        writer,
                        "  {} {} {} {}",
                        report.file.cyan(),
                        verb,
                        replacements.to_string().yellow().bold(),
                        if *replacements == 1 { "call" } else { "calls" }
                    )?;
                }
                FileOutcome::Processed { .. } => {
                    if options.verbose {
                        writeln!(writer, "  {} clean", report.file.dimmed())?;
                    }
                }
                FileOutcome::Skipped { reason } => {
                    writeln!(
                        writer,
                        "  {} {} ({})",
                        report.file.cyan(),
                        "skipped".yellow(),
                        reason
                    )?;
                }
            }
        }
        writeln!(writer)?;
    }

    writeln!(
        writer,
        "Scanned: {}  {}  Replacements: {}  {}",
        summary.files_scanned.to_string().bold(),
        pill("Modified", summary.files_modified),
        summary.total_replacements.to_string().bold(),
        pill("Skipped", summary.files_skipped),
    )?;

    if !summary.applied && summary.total_replacements > 0 {
        writeln!(
            writer,
            "{}",
            "Preview only. Re-run with --apply to write changes.".yellow()
        )?;
    }

    if summary.verified {
        if summary.remaining > 0 {
            writeln!(
                writer,
                "{} {}",
                "[FAIL]".red().bold(),
                format!(
                    "{} occurrence(s) still detected after excision",
                    summary.remaining
                )
                .red()
            )?;
        } else {
            writeln!(writer, "{}", "[OK] No occurrences remain.".green())?;
        }
    }

    Ok(())
}

/// Print the check report: a findings table and the gate line.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_check_report(
    writer: &mut impl Write,
    reports: &[CheckFileReport],
    total_findings: usize,
    options: &OutputOptions,
) -> std::io::Result<()> {
    if !options.quiet {
        print_header(writer, "Console Call Audit")?;

        if total_findings > 0 {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec![
                    Cell::new("File").add_attribute(Attribute::Bold),
                    Cell::new("Line").add_attribute(Attribute::Bold),
                    Cell::new("Pattern").add_attribute(Attribute::Bold),
                    Cell::new("Match").add_attribute(Attribute::Bold),
                ]);

            for report in reports {
                for finding in &report.findings {
                    table.add_row(vec![
                        Cell::new(&report.file),
                        Cell::new(finding.line),
                        Cell::new(finding.pattern.as_str()),
                        Cell::new(finding.matched_text.as_str()),
                    ]);
                }
            }
            writeln!(writer, "{table}")?;
        }

        for report in reports {
            if let Some(reason) = &report.skipped {
                writeln!(
                    writer,
                    "  {} {} ({})",
                    report.file.cyan(),
                    "skipped".yellow(),
                    reason
                )?;
            }
        }
        writeln!(writer)?;
    }

    if total_findings == 0 {
        writeln!(writer, "{}", "[OK] No console calls found.".green().bold())?;
    } else {
        writeln!(
            writer,
            "{} {}",
            "[FAIL]".red().bold(),
            format!("{total_findings} occurrence(s) found").red()
        )?;
    }

    Ok(())
}
