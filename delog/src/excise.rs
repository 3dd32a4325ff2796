//! The excision engine.
//!
//! Drives the occurrence locator and the statement-boundary scanner across
//! a whole text buffer, replacing every matched call statement with a
//! neutral literal and counting the replacements.
//!
//! # Usage
//!
//! ```
//! use delog::excise::{excise, ExciseOptions};
//!
//! let source = "console.log('hello'); doWork();";
//! let result = excise(source, &["console.log".to_owned()], &ExciseOptions::default());
//! assert_eq!(result.text, "void 0; doWork();");
//! assert_eq!(result.count, 1);
//! ```

use crate::constants::DEFAULT_REPLACEMENT;
use crate::scanner;

/// Options controlling a single excision run.
#[derive(Debug, Clone)]
pub struct ExciseOptions {
    /// The literal substituted for each excised call statement.
    pub replacement: String,
    /// Re-validate each located match against the quote state of its own
    /// line, and skip matches that begin inside an open string literal.
    ///
    /// Off by default: the plain substring locator will excise a pattern
    /// occurring verbatim inside string data (e.g. `"console.log(x)"`),
    /// which mirrors the historical behavior of this tool.
    pub strict: bool,
}

impl Default for ExciseOptions {
    fn default() -> Self {
        Self {
            replacement: DEFAULT_REPLACEMENT.to_owned(),
            strict: false,
        }
    }
}

/// The outcome of one excision run over one text buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Excision {
    /// The rewritten text.
    pub text: String,
    /// Number of call statements replaced.
    pub count: usize,
}

/// Removes every call statement starting with any of `patterns` from `text`.
///
/// Patterns are applied in order, each pass running over the result of the
/// previous one; for non-overlapping patterns the final text and total
/// count are independent of the order. Empty patterns are ignored. The
/// replacement literal never matches any sensible pattern, so excision is
/// idempotent: a second run over the output reports count 0.
#[must_use]
pub fn excise(text: &str, patterns: &[String], options: &ExciseOptions) -> Excision {
    let mut current = text.to_owned();
    let mut total = 0;

    for pattern in patterns {
        if pattern.is_empty() {
            continue;
        }
        let pass = excise_one(&current, pattern, options);
        total += pass.count;
        current = pass.text;
    }

    Excision {
        text: current,
        count: total,
    }
}

/// One full pass for a single pattern.
fn excise_one(text: &str, pattern: &str, options: &ExciseOptions) -> Excision {
    // Cheap pre-check so untouched files cost one substring search.
    if !text.contains(pattern) {
        return Excision {
            text: text.to_owned(),
            count: 0,
        };
    }

    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    let mut count = 0;

    while let Some(idx) = scanner::locate(text, pattern, cursor) {
        if options.strict && inside_open_quote(text, idx) {
            // Keep the match verbatim and move on; later matches on the
            // same line are still considered.
            out.push_str(&text[cursor..idx + pattern.len()]);
            cursor = idx + pattern.len();
            continue;
        }
        let end = scanner::statement_end(text, idx);
        out.push_str(&text[cursor..idx]);
        out.push_str(&options.replacement);
        count += 1;
        cursor = end;
    }
    out.push_str(&text[cursor..]);

    Excision { text: out, count }
}

/// Returns true when `index` falls inside a string/template literal opened
/// earlier on the same line.
///
/// This is the strict-mode re-validation: a forward quote-tracking walk
/// from the start of the match's line up to the match itself. It shares the
/// scanner's quote rules (escape handling, three quote kinds) but tracks no
/// parentheses.
fn inside_open_quote(text: &str, index: usize) -> bool {
    let bytes = text.as_bytes();
    let line_start = bytes[..index]
        .iter()
        .rposition(|&b| b == b'\n')
        .map_or(0, |pos| pos + 1);

    let mut quote: Option<u8> = None;
    let mut escape = false;
    for &b in &bytes[line_start..index] {
        if let Some(open) = quote {
            if escape {
                escape = false;
            } else if b == b'\\' {
                escape = true;
            } else if b == open {
                quote = None;
            }
        } else if matches!(b, b'"' | b'\'' | b'`') {
            quote = Some(b);
        }
    }
    quote.is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patterns(list: &[&str]) -> Vec<String> {
        list.iter().map(|&p| p.to_owned()).collect()
    }

    fn run(text: &str, pats: &[&str]) -> Excision {
        excise(text, &patterns(pats), &ExciseOptions::default())
    }

    #[test]
    fn replaces_simple_call() {
        let result = run("console.log('hello'); doWork();", &["console.log"]);
        assert_eq!(result.text, "void 0; doWork();");
        assert_eq!(result.count, 1);
    }

    #[test]
    fn semicolon_inside_argument_string_does_not_truncate() {
        let result = run("console.log(a, (b+c), 'x;y'); next();", &["console.log"]);
        assert_eq!(result.text, "void 0; next();");
        assert_eq!(result.count, 1);
    }

    #[test]
    fn newline_after_unterminated_statement_is_kept() {
        let result = run("console.log(a)\nother();", &["console.log"]);
        assert_eq!(result.text, "void 0;\nother();");
        assert_eq!(result.count, 1);
    }

    #[test]
    fn no_match_leaves_text_unchanged() {
        let result = run("doWork();", &["console.log"]);
        assert_eq!(result.text, "doWork();");
        assert_eq!(result.count, 0);
    }

    #[test]
    fn empty_text_yields_zero() {
        let result = run("", &["console.log"]);
        assert_eq!(result.text, "");
        assert_eq!(result.count, 0);
    }

    #[test]
    fn empty_pattern_is_ignored() {
        let result = run("doWork();", &[""]);
        assert_eq!(result.text, "doWork();");
        assert_eq!(result.count, 0);
    }

    #[test]
    fn prefix_pattern_catches_every_method() {
        let text = "console.log(1);\nconsole.error('x');\nconsole.warn(f());\n";
        let result = run(text, &["console."]);
        assert_eq!(result.text, "void 0;\nvoid 0;\nvoid 0;\n");
        assert_eq!(result.count, 3);
    }

    #[test]
    fn multiple_patterns_match_sequential_application() {
        let text = "console.log(1); logger.debug('y'); work();";
        let combined = run(text, &["console.log", "logger.debug"]);

        let first = run(text, &["console.log"]);
        let second = run(&first.text, &["logger.debug"]);

        assert_eq!(combined.text, second.text);
        assert_eq!(combined.count, first.count + second.count);
        assert_eq!(combined.text, "void 0; void 0; work();");
        assert_eq!(combined.count, 2);
    }

    #[test]
    fn excision_is_idempotent() {
        let text = "console.log(a, 'b;c');\nconsole.warn(d)\nwork();";
        let pats = patterns(&["console."]);
        let opts = ExciseOptions::default();

        let first = excise(text, &pats, &opts);
        assert_eq!(first.count, 2);
        let second = excise(&first.text, &pats, &opts);
        assert_eq!(second.count, 0);
        assert_eq!(second.text, first.text);
    }

    #[test]
    fn custom_replacement_is_used() {
        let opts = ExciseOptions {
            replacement: "/* removed */".to_owned(),
            ..ExciseOptions::default()
        };
        let result = excise("console.log(1);", &patterns(&["console.log"]), &opts);
        assert_eq!(result.text, "/* removed */");
        assert_eq!(result.count, 1);
    }

    #[test]
    fn no_paren_fallback_absorbs_remainder() {
        let result = run("work(); console.log without a call", &["console.log"]);
        assert_eq!(result.text, "work(); void 0;");
        assert_eq!(result.count, 1);
    }

    #[test]
    fn match_inside_string_is_excised_by_default() {
        // Documented blind spot: the locator is a plain substring search.
        let result = run("const s = \"console.log(x)\"; work();", &["console.log"]);
        assert_eq!(result.count, 1);
        assert_ne!(result.text, "const s = \"console.log(x)\"; work();");
    }

    #[test]
    fn strict_mode_skips_match_inside_string() {
        let text = "const s = \"console.log(x)\"; work();";
        let opts = ExciseOptions {
            strict: true,
            ..ExciseOptions::default()
        };
        let result = excise(text, &patterns(&["console.log"]), &opts);
        assert_eq!(result.text, text);
        assert_eq!(result.count, 0);
    }

    #[test]
    fn strict_mode_still_excises_real_calls() {
        let text = "const s = 'console.log'; console.log(s);\nwork();";
        let opts = ExciseOptions {
            strict: true,
            ..ExciseOptions::default()
        };
        let result = excise(text, &patterns(&["console.log"]), &opts);
        assert_eq!(result.text, "const s = 'console.log'; void 0;\nwork();");
        assert_eq!(result.count, 1);
    }

    #[test]
    fn untouched_spans_are_preserved_verbatim() {
        let text = "before();\nconsole.log(a);\nafter();\n";
        let result = run(text, &["console.log"]);
        assert_eq!(result.text, "before();\nvoid 0;\nafter();\n");
    }

    #[test]
    fn strict_quote_walk_handles_escapes() {
        // The first quote is escaped content, the string closes before the
        // match, so the call is real and must be excised.
        let text = "const s = \"a\\\"b\"; console.log(s);";
        let opts = ExciseOptions {
            strict: true,
            ..ExciseOptions::default()
        };
        let result = excise(text, &patterns(&["console.log"]), &opts);
        assert_eq!(result.text, "const s = \"a\\\"b\"; void 0;");
        assert_eq!(result.count, 1);
    }
}
