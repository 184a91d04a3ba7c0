//! Unified-diff rendering for replacement previews.
//!
//! The engine itself only returns the patched text; tooling callers usually
//! want to show the user what changed. This renders the before/after pair
//! as a unified diff via the `similar` crate.

use similar::{Algorithm, TextDiff};

/// Generate a unified diff between the text before and after replacement,
/// with conventional `a/<name>`/`b/<name>` headers.
///
/// Uses the Patience diff algorithm which produces cleaner diffs for source
/// code by preserving structure.
#[must_use]
pub fn unified_diff(file_name: &str, old: &str, new: &str) -> String {
    let before_header = format!("a/{file_name}");
    let after_header = format!("b/{file_name}");

    TextDiff::configure()
        .algorithm(Algorithm::Patience)
        .diff_lines(old, new)
        .unified_diff()
        .header(&before_header, &after_header)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_change() {
        let result = unified_diff("file.txt", "hello\n", "hello\n");
        assert!(!result.contains('+') || !result.contains('-'));
    }

    #[test]
    fn test_replaced_line_shows_in_diff() {
        let old = "line1\nline2\nline3\n";
        let new = "line1\nmodified\nline3\n";
        let result = unified_diff("file.txt", old, new);
        assert!(result.contains("-line2"));
        assert!(result.contains("+modified"));
    }
}
