//! Fuzzy content-replacement engine.
//!
//! Given a block of text and a list of replacement requests, locates each
//! old fragment under an escalating cascade of matching strategies and
//! replaces it while preserving the surrounding indentation and the
//! document's line-ending style. Failures are reported as human-readable
//! strings, never as panics or `Err` returns.
//!
//! # Architecture
//!
//! ```text
//! apply_replacements
//!   ├─ plan           — conflict gate over the whole request list
//!   └─ per entry (fold over the current text):
//!        locate        — strategy chain, first non-empty result wins
//!        │               (strategy 2 remaps offsets via position::*)
//!        └─ splice     — indentation transfer + line-ending unification
//! ```
//!
//! # Strategies
//!
//! 1. [`strategies::exact_matches`] — literal substring scan
//! 2. [`strategies::normalized_line_ending_matches`] — CRLF/CR/LF-insensitive
//! 3. [`strategies::line_trimmed_matches`] — single trimmed line, first hit
//! 4. [`strategies::fuzzy_multiline_matches`] — trimmed-line skeleton walk
//!
//! Replacements are applied strictly in list order, each seeing the output
//! of the previous one, so a later entry can match text an earlier entry
//! inserted. The engine itself is stateless; nothing persists across calls.

pub mod diff;
pub mod indent;
pub mod position;
pub mod strategies;

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ReplaceError;

/// A single replacement request.
///
/// Wire names are camelCase because tooling callers hand these over JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Replacement {
    /// The fragment to locate. Empty means "prepend `new_content`".
    pub old_content: String,
    /// The text to put in its place.
    pub new_content: String,
    /// Replace every occurrence instead of erroring on ambiguity
    /// (default: false).
    #[serde(default)]
    pub multiple: bool,
}

/// A located occurrence in the current text.
///
/// `matched` always equals `text[start..end]` — under the non-exact
/// strategies that substring differs cosmetically from the search fragment,
/// and it is what the indentation transfer anchors on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchSpan {
    pub start: usize,
    pub end: usize,
    pub matched: String,
}

/// All spans produced by the winning strategy for one fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchSet {
    pub spans: Vec<MatchSpan>,
    pub strategy: MatchStrategy,
}

impl MatchSet {
    const fn empty() -> Self {
        Self {
            spans: Vec::new(),
            strategy: MatchStrategy::None,
        }
    }
}

/// Which strategy produced a [`MatchSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStrategy {
    Exact,
    NormalizedLineEndings,
    LineTrimmed,
    FuzzyMultiline,
    None,
}

impl MatchStrategy {
    /// Stable name for logging.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::NormalizedLineEndings => "normalized-line-endings",
            Self::LineTrimmed => "line-trimmed",
            Self::FuzzyMultiline => "fuzzy-multiline",
            Self::None => "none",
        }
    }
}

/// Outcome of an [`apply_replacements`] call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplaceResult {
    /// The text after all successful replacements.
    pub updated_content: String,
    /// One message per failed entry (or a single conflict message).
    pub errors: Vec<String>,
}

impl ReplaceResult {
    /// Render what the call changed as a unified diff against `original`,
    /// for callers that present edits to a user.
    #[must_use]
    pub fn unified_diff(&self, file_name: &str, original: &str) -> String {
        diff::unified_diff(file_name, original, &self.updated_content)
    }
}

/// A strategy function: `(content, fragment) -> spans found`.
type StrategyFn = fn(&str, &str) -> Vec<MatchSpan>;

/// The fixed strategy cascade. Non-combinable: the first strategy yielding
/// at least one span wins outright, even if its matches are undesirable.
const STRATEGY_CHAIN: &[(MatchStrategy, StrategyFn)] = &[
    (MatchStrategy::Exact, strategies::exact_matches),
    (
        MatchStrategy::NormalizedLineEndings,
        strategies::normalized_line_ending_matches,
    ),
    (MatchStrategy::LineTrimmed, strategies::line_trimmed_matches),
    (
        MatchStrategy::FuzzyMultiline,
        strategies::fuzzy_multiline_matches,
    ),
];

/// Locate `fragment` in `text` via the strategy cascade.
///
/// Deterministic and pure. An empty fragment yields an empty set — the
/// orchestrator handles empty fragments before ever locating them.
#[must_use]
pub fn locate(text: &str, fragment: &str) -> MatchSet {
    if fragment.is_empty() {
        return MatchSet::empty();
    }

    for &(strategy, strategy_fn) in STRATEGY_CHAIN {
        let spans = strategy_fn(text, fragment);
        if !spans.is_empty() {
            debug!(
                strategy = strategy.as_str(),
                matches = spans.len(),
                "strategy produced matches"
            );
            return MatchSet { spans, strategy };
        }
    }

    MatchSet::empty()
}

/// Conflict gate: the same `old_content` requested with two different
/// `new_content` values fails the whole call before any text mutation.
fn plan(replacements: &[Replacement]) -> Result<(), ReplaceError> {
    let mut seen: HashMap<&str, &str> = HashMap::new();

    for replacement in replacements {
        match seen.entry(&replacement.old_content) {
            Entry::Occupied(entry) if *entry.get() != replacement.new_content => {
                debug!(fragment = %replacement.old_content, "conflicting replacement values");
                return Err(ReplaceError::conflict(&replacement.old_content));
            }
            Entry::Occupied(_) => {}
            Entry::Vacant(entry) => {
                entry.insert(&replacement.new_content);
            }
        }
    }

    Ok(())
}

/// Apply `replacements` to `original_content` in list order.
///
/// Each entry operates on the output of the previous one, so a later
/// replacement can match text inserted by an earlier one. Entries that fail
/// to match (or match ambiguously without `multiple`) are no-ops recorded in
/// [`ReplaceResult::errors`]; a conflicting request list short-circuits and
/// returns the original text with a single error.
#[must_use]
pub fn apply_replacements(original_content: &str, replacements: &[Replacement]) -> ReplaceResult {
    if let Err(conflict) = plan(replacements) {
        return ReplaceResult {
            updated_content: original_content.to_owned(),
            errors: vec![conflict.to_string()],
        };
    }

    let mut updated_content = original_content.to_owned();
    let mut errors = Vec::new();

    for replacement in replacements {
        // Empty fragment: prepend, no matching involved.
        if replacement.old_content.is_empty() {
            updated_content = format!("{}{updated_content}", replacement.new_content);
            continue;
        }

        let match_set = locate(&updated_content, &replacement.old_content);

        match match_set.spans.as_slice() {
            [] => errors.push(ReplaceError::not_found(&replacement.old_content).to_string()),
            [span] => {
                updated_content = replace_single_match(&updated_content, span, &replacement.new_content);
            }
            spans if replacement.multiple => {
                updated_content = replace_all_matches(&updated_content, spans, &replacement.new_content);
            }
            spans => {
                debug!(
                    strategy = match_set.strategy.as_str(),
                    matches = spans.len(),
                    "ambiguous match without 'multiple', skipping"
                );
                errors.push(ReplaceError::ambiguous_multiple(&replacement.old_content).to_string());
            }
        }
    }

    ReplaceResult {
        updated_content,
        errors,
    }
}

/// Splice one span, transferring indentation and unifying line endings.
fn replace_single_match(content: &str, span: &MatchSpan, new_content: &str) -> String {
    let line_ending = indent::detect_line_ending(content);
    let converted = indent::convert_line_endings(new_content, line_ending);
    let replacement = indent::preserve_indentation(&span.matched, &converted, line_ending);

    let mut result = String::with_capacity(content.len() + replacement.len());
    result.push_str(&content[..span.start]);
    result.push_str(&replacement);
    result.push_str(&content[span.end..]);
    result
}

/// Splice every span, highest offset first so earlier (lower-offset) spans
/// keep valid coordinates in the single working copy.
///
/// The fuzzy strategy can emit overlapping spans when the skeleton's lines
/// repeat; once a splice shrinks the text, an overlapping span's offsets go
/// stale. Those offsets are clamped substring-style to the current text
/// instead of indexing past its end.
fn replace_all_matches(content: &str, spans: &[MatchSpan], new_content: &str) -> String {
    let line_ending = indent::detect_line_ending(content);
    let converted = indent::convert_line_endings(new_content, line_ending);

    let mut sorted: Vec<&MatchSpan> = spans.iter().collect();
    sorted.sort_by(|a, b| b.start.cmp(&a.start));

    let mut result = content.to_owned();
    for span in sorted {
        let replacement = indent::preserve_indentation(&span.matched, &converted, line_ending);
        let start = clamp_to_char_boundary(&result, span.start);
        let end = clamp_to_char_boundary(&result, span.end).max(start);
        let mut next = String::with_capacity(result.len() + replacement.len());
        next.push_str(&result[..start]);
        next.push_str(&replacement);
        next.push_str(&result[end..]);
        result = next;
    }

    result
}

/// Clamp `index` to the text length and snap it down to a char boundary.
fn clamp_to_char_boundary(text: &str, index: usize) -> usize {
    let mut index = index.min(text.len());
    while !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn replacement(old: &str, new: &str) -> Replacement {
        Replacement {
            old_content: old.to_owned(),
            new_content: new.to_owned(),
            multiple: false,
        }
    }

    // -- locate() dispatcher --
    #[test]
    fn test_locate_exact_wins_over_line_trimmed() {
        // "Line two" is a literal substring of the padded line, so the
        // exact strategy matches inside it and line-trimmed never runs.
        let set = locate("Line one\n   Line two   \nLine three", "Line two");
        assert_eq!(set.strategy, MatchStrategy::Exact);
        assert_eq!(set.spans[0].matched, "Line two");
    }

    #[test]
    fn test_locate_falls_through_to_fuzzy() {
        let set = locate("    if (c) {\n        d();\n    }", "if (c) {\n    d();\n}");
        assert_eq!(set.strategy, MatchStrategy::FuzzyMultiline);
        assert_eq!(set.spans.len(), 1);
    }

    #[test]
    fn test_locate_none() {
        let set = locate("abc", "zzz");
        assert_eq!(set.strategy, MatchStrategy::None);
        assert!(set.spans.is_empty());
    }

    #[test]
    fn test_locate_empty_fragment() {
        let set = locate("abc", "");
        assert_eq!(set.strategy, MatchStrategy::None);
    }

    // -- plan() conflict gate --
    #[test]
    fn test_plan_rejects_conflicting_values() {
        let replacements = [replacement("A", "B"), replacement("A", "C")];
        assert_eq!(plan(&replacements), Err(ReplaceError::conflict("A")));
    }

    #[test]
    fn test_plan_allows_identical_duplicates() {
        let replacements = [replacement("A", "B"), replacement("A", "B")];
        assert_eq!(plan(&replacements), Ok(()));
    }

    // -- apply_replacements() orchestration --
    #[test]
    fn test_conflict_short_circuits_whole_call() {
        let replacements = [
            replacement("ok", "fine"),
            replacement("A", "B"),
            replacement("A", "C"),
        ];
        let result = apply_replacements("ok A", &replacements);
        assert_eq!(result.updated_content, "ok A");
        assert_eq!(
            result.errors,
            vec!["Conflicting replacement values for: \"A\"".to_owned()]
        );
    }

    #[test]
    fn test_empty_fragment_prepends() {
        let result = apply_replacements("X", &[replacement("", "Y\n")]);
        assert_eq!(result.updated_content, "Y\nX");
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_later_entry_sees_earlier_output() {
        let replacements = [replacement("A", "B"), replacement("B", "C")];
        let result = apply_replacements("A", &replacements);
        assert_eq!(result.updated_content, "C");
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_not_found_is_local() {
        let replacements = [replacement("missing", "x"), replacement("b", "B")];
        let result = apply_replacements("a b c", &replacements);
        assert_eq!(result.updated_content, "a B c");
        assert_eq!(result.errors.len(), 1);
        assert_eq!(
            result.errors[0],
            "Content to replace not found: \"missing\""
        );
    }

    #[test]
    fn test_multiple_occurrences_without_flag() {
        let result = apply_replacements("Repeat Repeat Repeat", &[replacement("Repeat", "Once")]);
        assert_eq!(result.updated_content, "Repeat Repeat Repeat");
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].starts_with("Multiple occurrences found for: \"Repeat\""));
    }

    #[test]
    fn test_multiple_occurrences_with_flag() {
        let replacements = [Replacement {
            old_content: "Repeat".to_owned(),
            new_content: "Once".to_owned(),
            multiple: true,
        }];
        let result = apply_replacements("Repeat Repeat Repeat", &replacements);
        assert_eq!(result.updated_content, "Once Once Once");
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_descending_replacement_keeps_offsets_valid() {
        // Replacement text longer than the fragment: lower-offset spans
        // must still land correctly.
        let replacements = [Replacement {
            old_content: "ab".to_owned(),
            new_content: "longer".to_owned(),
            multiple: true,
        }];
        let result = apply_replacements("ab cd ab cd ab", &replacements);
        assert_eq!(result.updated_content, "longer cd longer cd longer");
    }

    #[test]
    fn test_overlapping_spans_clamped_after_shrink() {
        // A repeated two-line skeleton matches at two overlapping starts;
        // replacing the higher-offset span first shrinks the text, so the
        // lower span's stale end offset must clamp instead of panicking.
        let replacements = [Replacement {
            old_content: "x\nx".to_owned(),
            new_content: String::new(),
            multiple: true,
        }];
        let result = apply_replacements("  x\n  x\n  x", &replacements);
        assert_eq!(result.updated_content, "");
        assert!(result.errors.is_empty());
    }
}
