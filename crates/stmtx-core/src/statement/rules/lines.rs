//! Line classification: header/footer noise versus transaction content.

use lazy_static::lazy_static;

use super::patterns::NOISE_MARKERS;
use super::word_spans;
use crate::models::config::{NoiseMatch, ParserConfig};

/// What a single extracted line is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Nothing but whitespace.
    Blank,
    /// Column headings, page furniture, opening/closing balance lines.
    Header,
    /// Anything else.
    Content,
}

/// Collapse whitespace runs to a single space and trim both ends.
pub fn normalize_line(line: &str) -> String {
    line.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Decides whether a line is noise.
///
/// The default vocabulary is coarse: a description that merely contains one of
/// the markers (`UPDATE` contains `DATE`) is classified as a header and skipped.
/// [`NoiseMatch::WholeWord`] narrows this to whole-word occurrences.
#[derive(Debug, Clone)]
pub struct LineClassifier {
    markers: Vec<String>,
    mode: NoiseMatch,
}

impl LineClassifier {
    /// Create a classifier with the default vocabulary and substring matching.
    pub fn new() -> Self {
        Self {
            markers: NOISE_MARKERS.iter().map(|m| m.to_string()).collect(),
            mode: NoiseMatch::Substring,
        }
    }

    /// Create a classifier from parser configuration.
    pub fn from_config(config: &ParserConfig) -> Self {
        Self::new()
            .with_markers(config.noise_markers.iter().cloned())
            .with_match(config.noise_match)
    }

    /// Replace the noise vocabulary.
    pub fn with_markers<I, S>(mut self, markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.markers = markers
            .into_iter()
            .map(|m| normalize_line(&m.into()).to_uppercase())
            .filter(|m| !m.is_empty())
            .collect();
        self
    }

    /// Set the marker matching mode.
    pub fn with_match(mut self, mode: NoiseMatch) -> Self {
        self.mode = mode;
        self
    }

    /// Classify one raw line.
    pub fn classify(&self, line: &str) -> LineKind {
        let line = normalize_line(line);
        if line.is_empty() {
            return LineKind::Blank;
        }

        let upper = line.to_uppercase();
        let noisy = self.markers.iter().any(|marker| match self.mode {
            NoiseMatch::Substring => upper.contains(marker.as_str()),
            NoiseMatch::WholeWord => !word_spans(&upper, marker).is_empty(),
        });

        if noisy { LineKind::Header } else { LineKind::Content }
    }
}

impl Default for LineClassifier {
    fn default() -> Self {
        Self::new()
    }
}

lazy_static! {
    static ref DEFAULT_CLASSIFIER: LineClassifier = LineClassifier::new();
}

/// Classify a line with the default vocabulary.
pub fn classify(line: &str) -> LineKind {
    DEFAULT_CLASSIFIER.classify(line)
}
