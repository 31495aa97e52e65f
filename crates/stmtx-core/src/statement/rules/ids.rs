//! Transaction reference extraction.

use super::patterns::IDENTIFIER;
use super::{ExtractionMatch, FieldExtractor};

/// Extracts 8 to 18 digit references from description text.
pub struct IdExtractor;

impl IdExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for IdExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for IdExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        IDENTIFIER
            .captures_iter(text)
            .filter_map(|caps| caps.get(1))
            .map(|m| ExtractionMatch::new(m.as_str().to_string(), m.as_str()).with_position(m.start(), m.end()))
            .collect()
    }
}
