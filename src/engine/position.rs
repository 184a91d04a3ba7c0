//! Line-structure and offset arithmetic.
//!
//! Everything here works on byte offsets. Line endings are the only
//! multi-byte sequences involved (`\r\n`), so the walkers advance byte by
//! byte and only ever stop on ASCII newline characters — the returned
//! offsets always sit on UTF-8 char boundaries.

/// Collapse `\r\n` and lone `\r` to `\n`.
pub(crate) fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Split on `\r?\n`: each piece loses a trailing `\r` that preceded the
/// `\n`, but a lone `\r` stays embedded in its piece.
pub(crate) fn split_lines(text: &str) -> Vec<&str> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect()
}

/// Map an offset in the line-ending-normalized copy of `original` back to an
/// offset in `original` itself.
///
/// A single forward walk: a CRLF pair advances the original cursor by two
/// while the normalized cursor advances by one; every other byte advances
/// both by one. Must be called separately for the start and end offset of
/// each normalized-text hit — there is no index or cache to reuse.
pub(crate) fn map_normalized_offset_to_original(
    original: &str,
    normalized_offset: usize,
) -> usize {
    let bytes = original.as_bytes();
    let mut original_pos = 0;
    let mut normalized_pos = 0;

    while normalized_pos < normalized_offset && original_pos < bytes.len() {
        if bytes[original_pos] == b'\r'
            && original_pos + 1 < bytes.len()
            && bytes[original_pos + 1] == b'\n'
        {
            original_pos += 2;
        } else {
            original_pos += 1;
        }
        normalized_pos += 1;
    }

    original_pos
}

/// Byte offset at which line `line_number` begins.
///
/// Walks the text counting CRLF, lone CR, and LF as line breaks. Note this
/// counts a lone `\r` as a break while [`split_lines`] does not; the
/// mismatch is inherited behavior and callers guard the resulting spans.
pub(crate) fn line_start_offset(content: &str, line_number: usize) -> usize {
    if line_number == 0 {
        return 0;
    }

    let bytes = content.as_bytes();
    let mut index = 0;
    let mut current_line = 0;

    while current_line < line_number && index < bytes.len() {
        if bytes[index] == b'\r' && index + 1 < bytes.len() && bytes[index + 1] == b'\n' {
            index += 2;
            current_line += 1;
        } else if bytes[index] == b'\r' || bytes[index] == b'\n' {
            index += 1;
            current_line += 1;
        } else {
            index += 1;
        }
    }

    index
}

/// Byte offset just past the content of line `line_number`, excluding its
/// line terminator. Out-of-range line numbers yield the text length.
pub(crate) fn line_end_offset(content: &str, line_number: usize) -> usize {
    let lines = split_lines(content);
    if line_number >= lines.len() {
        return content.len();
    }

    let bytes = content.as_bytes();
    let mut index = 0;
    for (i, line) in lines.iter().enumerate().take(line_number + 1) {
        index += line.len();
        if i < line_number {
            if bytes[index..].starts_with(b"\r\n") {
                index += 2;
            } else if index < bytes.len() && (bytes[index] == b'\r' || bytes[index] == b'\n') {
                index += 1;
            }
        }
    }

    index
}
