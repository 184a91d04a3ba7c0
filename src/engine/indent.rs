//! Indentation transfer and line-ending unification for replacements.
//!
//! When a span is replaced, the new text adopts the dominant line-ending
//! style of the whole document and the base indentation of the text it
//! replaces, while keeping its own deeper relative nesting intact.

use crate::engine::position;

/// Dominant line-ending style of `content`, in priority order:
/// any CRLF wins, then any lone CR, then LF.
pub(crate) fn detect_line_ending(content: &str) -> &'static str {
    if content.contains("\r\n") {
        "\r\n"
    } else if content.contains('\r') {
        "\r"
    } else {
        "\n"
    }
}

/// Rewrite every line ending in `text` to `line_ending`
/// (normalize to LF first, then re-expand).
pub(crate) fn convert_line_endings(text: &str, line_ending: &str) -> String {
    let normalized = position::normalize_line_endings(text);
    if line_ending == "\n" {
        normalized
    } else {
        normalized.replace('\n', line_ending)
    }
}

/// Leading whitespace run of a line.
fn leading_whitespace(line: &str) -> &str {
    &line[..line.len() - line.trim_start().len()]
}

/// Re-indent `new_content` so it sits where `matched` sat.
///
/// The base indent is taken from the first non-blank line of the *matched*
/// text; each non-blank line of `new_content` keeps whatever indentation it
/// carries beyond its own base indent (lines indented less than that base
/// are flattened onto it). Blank lines never carry indentation. If the
/// matched base indent contains a tab, runs of four spaces in the final
/// indent are converted to tabs unless the relative part already holds one.
/// Lines are joined with `line_ending`; `new_content` is expected to have
/// been through [`convert_line_endings`] already.
pub(crate) fn preserve_indentation(matched: &str, new_content: &str, line_ending: &str) -> String {
    let matched_lines = position::split_lines(matched);
    let new_lines = position::split_lines(new_content);

    let (original_base_indent, uses_tabs) = matched_lines
        .iter()
        .find(|line| !line.trim().is_empty())
        .map_or(("", false), |line| {
            let indent = leading_whitespace(line);
            (indent, indent.contains('\t'))
        });

    let new_base_indent = new_lines
        .iter()
        .find(|line| !line.trim().is_empty())
        .map_or("", |line| leading_whitespace(line));

    let reindented: Vec<String> = new_lines
        .iter()
        .map(|line| {
            if line.trim().is_empty() {
                return String::new();
            }

            let current_indent = leading_whitespace(line);
            let relative_indent = if new_base_indent.is_empty() {
                current_indent
            } else if let Some(deeper) = current_indent.strip_prefix(new_base_indent) {
                deeper
            } else {
                ""
            };

            let mut indent = format!("{original_base_indent}{relative_indent}");
            if uses_tabs && !relative_indent.contains('\t') {
                // 4 spaces -> 1 tab, a convention rather than real
                // tab-width inference.
                indent = indent.replace("    ", "\t");
            }

            format!("{indent}{}", line.trim())
        })
        .collect();

    reindented.join(line_ending)
}
