//! GraphQL string literal printing.

use std::fmt::Write;

/// Prints `value` as a quoted GraphQL string, escaping control characters.
pub(crate) fn print_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{8}' => out.push_str("\\b"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\u{c}' => out.push_str("\\f"),
            '\r' => out.push_str("\\r"),
            c if c <= '\u{1f}' || ('\u{7f}'..='\u{9f}').contains(&c) => {
                let _ = write!(out, "\\u{:04X}", u32::from(c));
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Whether `value` survives a round trip through a block string unchanged.
///
/// Block strings strip common indentation and leading/trailing blank lines
/// and normalize line endings, so values relying on any of those cannot be
/// printed as one.
pub(crate) fn is_printable_as_block_string(value: &str) -> bool {
    if value.is_empty() {
        return true;
    }

    let mut is_empty_line = true;
    let mut has_indent = false;
    let mut has_common_indent = true;
    let mut seen_non_empty_line = false;

    for c in value.chars() {
        match c {
            '\u{0}'..='\u{8}' | '\u{b}' | '\u{c}' | '\u{e}'..='\u{1f}' | '\r' => return false,
            '\n' => {
                if is_empty_line && !seen_non_empty_line {
                    // Leading blank line.
                    return false;
                }
                seen_non_empty_line = true;
                is_empty_line = true;
                has_indent = false;
            }
            '\t' | ' ' => has_indent |= is_empty_line,
            _ => {
                has_common_indent &= has_indent;
                is_empty_line = false;
            }
        }
    }

    if is_empty_line {
        // Trailing blank line.
        return false;
    }
    !(has_common_indent && seen_non_empty_line)
}

/// Prints `value` as a `"""` block string.
pub(crate) fn print_block_string(value: &str) -> String {
    let escaped = value.replace("\"\"\"", "\\\"\"\"");
    let lines: Vec<&str> = escaped.split('\n').collect();
    let is_single_line = lines.len() == 1;

    let force_leading_newline = lines.len() > 1
        && lines[1..]
            .iter()
            .all(|line| line.is_empty() || line.starts_with([' ', '\t']));

    let has_trailing_triple_quotes = escaped.ends_with("\\\"\"\"");
    let has_trailing_quote = value.ends_with('"') && !has_trailing_triple_quotes;
    let has_trailing_slash = value.ends_with('\\');
    let force_trailing_newline = has_trailing_quote || has_trailing_slash;

    let print_as_multiple_lines = !is_single_line
        || value.chars().count() > 70
        || force_trailing_newline
        || force_leading_newline
        || has_trailing_triple_quotes;

    let skip_leading_newline = is_single_line && value.starts_with([' ', '\t']);

    let mut out = String::from("\"\"\"");
    if (print_as_multiple_lines && !skip_leading_newline) || force_leading_newline {
        out.push('\n');
    }
    out.push_str(&escaped);
    if print_as_multiple_lines || force_trailing_newline {
        out.push('\n');
    }
    out.push_str("\"\"\"");
    out
}

/// Prints a description as the line(s) preceding a definition.
///
/// `indent` is prepended to every line. Members after the first in a block
/// get a blank line before their description.
pub(crate) fn print_description(
    description: Option<&str>,
    indent: &str,
    first_in_block: bool,
) -> String {
    let Some(description) = description else {
        return String::new();
    };

    let literal = if is_printable_as_block_string(description) {
        print_block_string(description)
    } else {
        print_string(description)
    };

    let prefix = if !indent.is_empty() && !first_in_block {
        format!("\n{indent}")
    } else {
        indent.to_string()
    };

    format!(
        "{prefix}{}\n",
        literal.replace('\n', &format!("\n{indent}"))
    )
}
