//! The read-only detection engine.
//!
//! Reports remaining call occurrences (pattern immediately followed by an
//! opening parenthesis, whitespace permitted, case-insensitive) with
//! 1-based line numbers. This is intentionally a shallower check than the
//! boundary scanner: it does not skip quoted literals, so it over-reports
//! rather than under-reports. Use it as an audit gate, never as a mutation
//! driver.

use crate::constants::detection_regex;
use crate::utils::LineIndex;
use compact_str::CompactString;
use serde::Serialize;

/// One remaining occurrence of a call pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Detection {
    /// The pattern that matched.
    pub pattern: CompactString,
    /// 1-based line number of the match.
    pub line: usize,
    /// The matched text, including the opening parenthesis.
    pub matched_text: CompactString,
}

/// Enumerates every remaining occurrence of `patterns` in `text`.
///
/// Findings are grouped by pattern in the given order, each group in
/// document order. Empty patterns are ignored; empty text yields no
/// findings.
#[must_use]
pub fn detect(text: &str, patterns: &[String]) -> Vec<Detection> {
    if text.is_empty() {
        return Vec::new();
    }
    let line_index = LineIndex::new(text);
    let mut findings = Vec::new();

    for pattern in patterns {
        if pattern.is_empty() {
            continue;
        }
        let re = detection_regex(pattern);
        for m in re.find_iter(text) {
            findings.push(Detection {
                pattern: CompactString::from(pattern.as_str()),
                line: line_index.line_of(m.start()),
                matched_text: CompactString::from(m.as_str()),
            });
        }
    }

    findings
}
