//! `content-patch` — fuzzy content-replacement engine.
//!
//! Locates old fragments in a block of text under an escalating cascade of
//! matching strategies (exact, line-ending-normalized, single-line-trimmed,
//! multi-line-fuzzy), replaces them while preserving surrounding indentation
//! and the document's line-ending style, and reports precise errors when a
//! fragment cannot be located unambiguously.
//!
//! Purely functional and synchronous: no I/O, no shared state, no awareness
//! of programming-language syntax. Line boundaries are the engine's only
//! structural assumption.
//!
//! # Usage
//!
//! ```
//! use content_patch::{Replacement, apply_replacements};
//!
//! let result = apply_replacements(
//!     "    if (c) {\n        d();\n    }",
//!     &[Replacement {
//!         old_content: "if (c) {\n    d();\n}".to_owned(),
//!         new_content: "if (n) {\n    e();\n}".to_owned(),
//!         multiple: false,
//!     }],
//! );
//!
//! assert_eq!(result.updated_content, "    if (n) {\n        e();\n    }");
//! assert!(result.errors.is_empty());
//! ```
//!
//! Expected failures — conflicting requests, fragments that match nowhere,
//! ambiguous multiple matches — surface only as strings in
//! [`ReplaceResult::errors`]; the engine never panics on malformed input.

pub mod engine;
pub mod error;

pub use engine::{
    MatchSet, MatchSpan, MatchStrategy, ReplaceResult, Replacement, apply_replacements, locate,
};
pub use error::ReplaceError;
