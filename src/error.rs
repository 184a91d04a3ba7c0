//! Error types for the content-patch crate.

/// Maximum fragment length shown verbatim in an error message.
///
/// Longer fragments are abbreviated to `head + "..." + tail` so the full
/// message stays well under typical log-line limits.
const ERROR_FRAGMENT_MAX: usize = 100;

/// Replacement failures reported to the caller.
///
/// Only [`ReplaceError::Conflict`] aborts a whole `apply_replacements` call;
/// the other variants are recorded for their entry and processing continues.
/// All three surface as plain strings in [`ReplaceResult::errors`] — they are
/// data, never panics or control-flow faults.
///
/// [`ReplaceResult::errors`]: crate::engine::ReplaceResult
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReplaceError {
    /// The same `oldContent` was requested with two different `newContent`
    /// values. The fragment is shown untruncated.
    #[error("Conflicting replacement values for: \"{fragment}\"")]
    Conflict { fragment: String },

    /// No strategy located the fragment in the current text.
    #[error("Content to replace not found: \"{fragment}\"")]
    NotFound { fragment: String },

    /// The fragment matched more than once and `multiple` was not set.
    #[error(
        "Multiple occurrences found for: \"{fragment}\". Set 'multiple' to true if multiple \
         occurrences of the oldContent are expected to be replaced at once."
    )]
    AmbiguousMultiple { fragment: String },
}

impl ReplaceError {
    pub(crate) fn conflict(fragment: &str) -> Self {
        Self::Conflict {
            fragment: fragment.to_owned(),
        }
    }

    pub(crate) fn not_found(fragment: &str) -> Self {
        Self::NotFound {
            fragment: truncate_fragment(fragment),
        }
    }

    pub(crate) fn ambiguous_multiple(fragment: &str) -> Self {
        Self::AmbiguousMultiple {
            fragment: truncate_fragment(fragment),
        }
    }
}

/// Abbreviate a fragment for inclusion in an error message.
///
/// Fragments of at most [`ERROR_FRAGMENT_MAX`] characters pass through
/// verbatim; longer ones keep `ERROR_FRAGMENT_MAX / 2 - 3` characters from
/// each end around a `...` marker. Char-based, so a multi-byte code point is
/// never split.
pub(crate) fn truncate_fragment(fragment: &str) -> String {
    let chars: Vec<char> = fragment.chars().collect();
    if chars.len() <= ERROR_FRAGMENT_MAX {
        return fragment.to_owned();
    }

    let half = ERROR_FRAGMENT_MAX / 2 - 3;
    let head: String = chars[..half].iter().collect();
    let tail: String = chars[chars.len() - half..].iter().collect();
    format!("{head}...{tail}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_fragment_untouched() {
        assert_eq!(truncate_fragment("hello"), "hello");
        assert_eq!(truncate_fragment(&"a".repeat(100)), "a".repeat(100));
    }

    #[test]
    fn test_long_fragment_abbreviated() {
        let truncated = truncate_fragment(&"a".repeat(200));
        assert_eq!(truncated.len(), 47 + 3 + 47);
        assert!(truncated.contains("..."));
    }

    #[test]
    fn test_truncation_respects_char_boundaries() {
        let fragment = "é".repeat(150);
        let truncated = truncate_fragment(&fragment);
        assert_eq!(truncated.chars().count(), 47 + 3 + 47);
    }

    #[test]
    fn test_conflict_message_untruncated() {
        let long = "x".repeat(200);
        let message = ReplaceError::conflict(&long).to_string();
        assert!(message.contains(&long));
    }

    #[test]
    fn test_not_found_message() {
        let message = ReplaceError::not_found("Nonexistent").to_string();
        assert_eq!(message, "Content to replace not found: \"Nonexistent\"");
    }

    #[test]
    fn test_ambiguous_multiple_message() {
        let message = ReplaceError::ambiguous_multiple("Repeat").to_string();
        assert!(message.starts_with("Multiple occurrences found for: \"Repeat\""));
        assert!(message.contains("Set 'multiple' to true"));
    }
}
