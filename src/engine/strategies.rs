//! The four matching strategies.
//!
//! Each strategy takes `(content, fragment)` and returns the [`MatchSpan`]s
//! it found — offsets into `content` plus the exact substring matched, which
//! under the non-exact strategies may differ cosmetically from the fragment.
//! The dispatcher in `mod.rs` tries them in fixed order and stops at the
//! first non-empty result; strategies are never combined.

use crate::engine::{MatchSpan, position};

// ---------------------------------------------------------------------------
// Strategy 1: Exact
// ---------------------------------------------------------------------------

/// All non-overlapping literal occurrences of `fragment`, left to right.
pub fn exact_matches(content: &str, fragment: &str) -> Vec<MatchSpan> {
    if fragment.is_empty() {
        return Vec::new();
    }

    let mut spans = Vec::new();
    let mut search_from = 0;

    while let Some(offset) = content[search_from..].find(fragment) {
        let start = search_from + offset;
        let end = start + fragment.len();
        spans.push(MatchSpan {
            start,
            end,
            matched: fragment.to_owned(),
        });
        search_from = end;
    }

    spans
}

// ---------------------------------------------------------------------------
// Strategy 2: Normalized line endings
// ---------------------------------------------------------------------------

/// Exact scan over line-ending-normalized copies of both inputs, with each
/// hit remapped back to original-text coordinates. Lets a fragment authored
/// with one line-ending convention match content using another.
pub fn normalized_line_ending_matches(content: &str, fragment: &str) -> Vec<MatchSpan> {
    if fragment.is_empty() {
        return Vec::new();
    }

    let normalized_content = position::normalize_line_endings(content);
    let normalized_fragment = position::normalize_line_endings(fragment);

    let mut spans = Vec::new();
    let mut search_from = 0;

    while let Some(offset) = normalized_content[search_from..].find(&normalized_fragment) {
        let normalized_start = search_from + offset;
        let normalized_end = normalized_start + normalized_fragment.len();

        let start = position::map_normalized_offset_to_original(content, normalized_start);
        let end = position::map_normalized_offset_to_original(content, normalized_end);

        spans.push(MatchSpan {
            start,
            end,
            matched: content[start..end].to_owned(),
        });
        search_from = normalized_end;
    }

    spans
}

// ---------------------------------------------------------------------------
// Strategy 3: Line-trimmed (single line, legacy)
// ---------------------------------------------------------------------------

/// First line whose trimmed form equals the trimmed fragment. At most one
/// span — this strategy deliberately never looks for further occurrences.
pub fn line_trimmed_matches(content: &str, fragment: &str) -> Vec<MatchSpan> {
    let trimmed_fragment = fragment.trim();

    for (line_number, line) in position::split_lines(content).iter().enumerate() {
        if line.trim() != trimmed_fragment {
            continue;
        }

        let start = position::line_start_offset(content, line_number);
        let end = start + line.len();
        // A lone CR inside an earlier line desyncs the offset walker from
        // the split; drop the candidate rather than slice mid-char.
        let Some(matched) = content.get(start..end) else {
            return Vec::new();
        };
        return vec![MatchSpan {
            start,
            end,
            matched: matched.to_owned(),
        }];
    }

    Vec::new()
}

// ---------------------------------------------------------------------------
// Strategy 4: Fuzzy multiline
// ---------------------------------------------------------------------------

/// Matches the fragment's non-blank trimmed lines (its *search skeleton*)
/// against consecutive non-blank content lines, skipping blank content lines
/// in between. Each successful starting line yields one span, running from
/// that line's start to the end of the last line actually matched — trailing
/// blank content lines after it are excluded from the span.
pub fn fuzzy_multiline_matches(content: &str, fragment: &str) -> Vec<MatchSpan> {
    let skeleton: Vec<&str> = position::split_lines(fragment)
        .into_iter()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    if skeleton.is_empty() {
        return Vec::new();
    }

    let content_lines = position::split_lines(content);
    let mut spans = Vec::new();

    for candidate_start in 0..content_lines.len() {
        let start_trimmed = content_lines[candidate_start].trim();
        if start_trimmed.is_empty() || start_trimmed != skeleton[0] {
            continue;
        }

        let mut skeleton_index = 1;
        let mut content_index = candidate_start + 1;
        let mut last_matched = candidate_start;

        while skeleton_index < skeleton.len() && content_index < content_lines.len() {
            let line_trimmed = content_lines[content_index].trim();

            if line_trimmed.is_empty() {
                content_index += 1;
            } else if line_trimmed == skeleton[skeleton_index] {
                last_matched = content_index;
                skeleton_index += 1;
                content_index += 1;
            } else {
                break;
            }
        }

        if skeleton_index == skeleton.len() {
            let start = position::line_start_offset(content, candidate_start);
            let end = position::line_end_offset(content, last_matched);
            if let Some(matched) = content.get(start..end) {
                spans.push(MatchSpan {
                    start,
                    end,
                    matched: matched.to_owned(),
                });
            }
        }
    }

    spans
}

// ===========================================================================
// Tests
// ===========================================================================
