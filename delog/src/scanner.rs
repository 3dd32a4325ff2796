//! Lexical statement-boundary scanning.
//!
//! Given the byte offset of a matched call prefix, [`statement_end`] walks
//! forward to the end of the whole call statement, skipping over nested
//! parentheses and quoted/template literals so that terminators inside
//! arguments never truncate the call. [`locate`] is the companion literal
//! substring search that feeds it.
//!
//! Scanning is byte-wise: every structurally significant character is
//! ASCII, so multi-byte UTF-8 sequences pass through as opaque content and
//! every returned index falls on a character boundary.

/// Mutable state for one boundary-scan invocation.
#[derive(Debug, Default)]
struct ScanState {
    /// Open parenthesis depth, never negative.
    depth: usize,
    /// True once the first `(` after the pattern has been consumed.
    started: bool,
    /// The active quote byte (`"`, `'` or backtick), if any.
    quote: Option<u8>,
    /// True when the previous byte inside a quote was a backslash.
    escape: bool,
}

/// Finds the next plain-text occurrence of `pattern` at or after `from`.
///
/// This is a literal, non-regex leftmost substring search. It does *not*
/// check whether the match sits inside a string or comment; see
/// [`crate::excise::ExciseOptions::strict`] for the opt-in re-validation.
///
/// Returns `None` when `pattern` does not occur, when `pattern` is empty,
/// or when `from` is out of bounds.
#[must_use]
pub fn locate(text: &str, pattern: &str, from: usize) -> Option<usize> {
    if pattern.is_empty() {
        return None;
    }
    text.get(from..)
        .and_then(|tail| tail.find(pattern))
        .map(|idx| from + idx)
}

/// Scans forward from `match_index` (the start of a matched pattern) to the
/// end of the call statement.
///
/// The returned index is exclusive: the excised span is
/// `[match_index, statement_end)`. A terminating `;` is consumed (included
/// in the span); a terminating newline or carriage return is not, so it
/// survives in the untouched remainder. If the pattern is never followed by
/// an opening parenthesis, or a quote or parenthesis is left open, the scan
/// falls back to end of text. It never fails and visits each byte at most
/// once.
#[must_use]
pub fn statement_end(text: &str, match_index: usize) -> usize {
    let bytes = text.as_bytes();
    let len = bytes.len();
    let mut state = ScanState::default();
    let mut i = match_index;

    while i < len {
        let b = bytes[i];

        // Inside a quoted/template literal everything is content.
        if let Some(quote) = state.quote {
            if state.escape {
                state.escape = false;
            } else if b == b'\\' {
                state.escape = true;
            } else if b == quote {
                state.quote = None;
            }
            i += 1;
            continue;
        }

        // Before the first `(` only an opening parenthesis matters; any
        // other byte between the pattern and the call is absorbed.
        if !state.started {
            if b == b'(' {
                state.started = true;
                state.depth = 1;
            }
            i += 1;
            continue;
        }

        match b {
            b'"' | b'\'' | b'`' => state.quote = Some(b),
            b'(' => state.depth += 1,
            b')' => state.depth = state.depth.saturating_sub(1),
            b';' if state.depth == 0 => return i + 1,
            b'\r' | b'\n' if state.depth == 0 => return i,
            _ => {}
        }
        i += 1;
    }

    len
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locate_finds_leftmost_match() {
        let text = "a console.log(1); console.log(2);";
        assert_eq!(locate(text, "console.log", 0), Some(2));
        assert_eq!(locate(text, "console.log", 3), Some(18));
        assert_eq!(locate(text, "console.log", 19), None);
    }

    #[test]
    fn locate_empty_pattern_is_none() {
        assert_eq!(locate("abc", "", 0), None);
    }

    #[test]
    fn locate_out_of_bounds_is_none() {
        assert_eq!(locate("abc", "a", 4), None);
        assert_eq!(locate("abc", "a", 3), None);
    }

    #[test]
    fn simple_call_consumes_semicolon() {
        let text = "console.log('hi'); rest";
        let end = statement_end(text, 0);
        assert_eq!(&text[end..], " rest");
    }

    #[test]
    fn newline_terminator_is_preserved() {
        let text = "console.log(a)\nother();";
        let end = statement_end(text, 0);
        assert_eq!(&text[end..], "\nother();");
    }

    #[test]
    fn carriage_return_terminator_is_preserved() {
        let text = "console.log(a)\r\nother();";
        let end = statement_end(text, 0);
        assert_eq!(&text[end..], "\r\nother();");
    }

    #[test]
    fn nested_parens_do_not_terminate_early() {
        let text = "console.log(f(a), (b + c)); next();";
        let end = statement_end(text, 0);
        assert_eq!(&text[end..], " next();");
    }

    #[test]
    fn semicolon_inside_string_is_content() {
        let text = "console.log('x;y'); next();";
        let end = statement_end(text, 0);
        assert_eq!(&text[end..], " next();");
    }

    #[test]
    fn parens_inside_template_literal_are_content() {
        let text = "console.log(`a ) ( ;`); next();";
        let end = statement_end(text, 0);
        assert_eq!(&text[end..], " next();");
    }

    #[test]
    fn escaped_quote_does_not_close_string() {
        let text = r#"console.log("a\");b"); next();"#;
        let end = statement_end(text, 0);
        assert_eq!(&text[end..], " next();");
    }

    #[test]
    fn no_open_paren_runs_to_end_of_text() {
        let text = "console.log followed by nothing";
        assert_eq!(statement_end(text, 0), text.len());
    }

    #[test]
    fn unterminated_quote_runs_to_end_of_text() {
        let text = "console.log('never closed";
        assert_eq!(statement_end(text, 0), text.len());
    }

    #[test]
    fn unbalanced_close_paren_never_underflows() {
        // The extra `)` after depth reaches zero is absorbed; the scan ends
        // at the semicolon.
        let text = "console.log(a)); next();";
        let end = statement_end(text, 0);
        assert_eq!(&text[end..], " next();");
    }

    #[test]
    fn whitespace_between_pattern_and_paren_is_absorbed() {
        let text = "console.log  (a); next();";
        let end = statement_end(text, 0);
        assert_eq!(&text[end..], " next();");
    }

    #[test]
    fn multibyte_content_keeps_char_boundaries() {
        let text = "console.log('héllo — ünïcode');\nrest";
        let end = statement_end(text, 0);
        assert_eq!(&text[end..], "\nrest");
    }

    #[test]
    fn multiline_arguments_span_newlines() {
        let text = "console.log(\n  a,\n  b\n); next();";
        let end = statement_end(text, 0);
        assert_eq!(&text[end..], " next();");
    }
}
