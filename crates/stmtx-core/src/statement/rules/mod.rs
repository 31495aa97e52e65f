//! Rule-based field extractors for statement text.

pub mod amounts;
pub mod dates;
pub mod ids;
pub mod lines;
pub mod patterns;

pub use amounts::{AmountExtractor, AmountTriple, extract_amount_triple, normalize_amount, parse_amount};
pub use dates::{AnchorMatch, ValueDateExtractor, match_anchor, strip_leading_date, to_iso};
pub use ids::IdExtractor;
pub use lines::{LineClassifier, LineKind, classify, normalize_line};
pub use patterns::*;

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the first occurrence of the field.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all occurrences of the field, left to right.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// A value found in text together with where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionMatch<T> {
    /// Extracted (normalized) value.
    pub value: T,
    /// Position in source text.
    pub position: Option<(usize, usize)>,
    /// Source text that was matched, verbatim.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, source: impl Into<String>) -> Self {
        Self {
            value,
            position: None,
            source: source.into(),
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Byte spans of `needle` in `haystack` that sit on word boundaries at both ends.
pub(crate) fn word_spans(haystack: &str, needle: &str) -> Vec<(usize, usize)> {
    if needle.is_empty() {
        return Vec::new();
    }

    let first = needle.chars().next().map(is_word_char).unwrap_or(false);
    let last = needle.chars().next_back().map(is_word_char).unwrap_or(false);

    haystack
        .match_indices(needle)
        .map(|(start, m)| (start, start + m.len()))
        .filter(|&(start, end)| {
            let before = haystack[..start].chars().next_back();
            let after = haystack[end..].chars().next();
            let left_ok = !first || !before.map(is_word_char).unwrap_or(false);
            let right_ok = !last || !after.map(is_word_char).unwrap_or(false);
            left_ok && right_ok
        })
        .collect()
}

/// Remove every whole-word occurrence of `needle`.
pub(crate) fn remove_words(haystack: &str, needle: &str) -> String {
    let mut out = String::with_capacity(haystack.len());
    let mut cursor = 0;
    for (start, end) in word_spans(haystack, needle) {
        out.push_str(&haystack[cursor..start]);
        cursor = end;
    }
    out.push_str(&haystack[cursor..]);
    out
}
