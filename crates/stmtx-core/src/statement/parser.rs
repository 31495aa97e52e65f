//! Statement parser: pages of text lines in, ordered transaction records out.

use std::time::Instant;

use tracing::{debug, info};

use crate::error::Result;
use crate::models::config::ParserConfig;
use crate::models::record::TransactionRecord;
use crate::pdf::PageSource;

use super::extractor::extract_records;
use super::reconcile::check_balances;
use super::rules::lines::LineClassifier;
use super::segmenter::segment_pages;

/// Result of parsing one statement.
#[derive(Debug, Clone, Default)]
pub struct ParseResult {
    /// Records in document order.
    pub records: Vec<TransactionRecord>,
    /// Balance reconciliation warnings.
    pub warnings: Vec<String>,
    /// Pages read.
    pub pages: usize,
    /// Lines read across all pages.
    pub lines_seen: usize,
    /// Blank and header lines skipped.
    pub noise_lines: usize,
    /// Content lines discarded before the first transaction.
    pub orphan_lines: usize,
    /// Transaction blocks found.
    pub blocks: usize,
    /// Records dropped for having neither date nor description.
    pub dropped: usize,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Parses statement text into transaction records.
pub struct StatementParser {
    classifier: LineClassifier,
    reconcile: bool,
    max_pages: usize,
}

impl StatementParser {
    /// Create a parser with the default noise vocabulary.
    pub fn new() -> Self {
        Self {
            classifier: LineClassifier::new(),
            reconcile: true,
            max_pages: 0,
        }
    }

    /// Create a parser from configuration.
    pub fn from_config(config: &ParserConfig) -> Self {
        Self::new()
            .with_classifier(LineClassifier::from_config(config))
            .with_reconciliation(config.reconcile_balances)
    }

    /// Replace the line classifier.
    pub fn with_classifier(mut self, classifier: LineClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    /// Enable or disable the running-balance cross-check.
    pub fn with_reconciliation(mut self, reconcile: bool) -> Self {
        self.reconcile = reconcile;
        self
    }

    /// Limit how many pages are read from a source (0 = all).
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Parse pages of lines, strictly in the given order.
    pub fn parse_pages<P, L>(&self, pages: P) -> ParseResult
    where
        P: IntoIterator,
        P::Item: IntoIterator<Item = L>,
        L: AsRef<str>,
    {
        let start = Instant::now();

        let mut page_count = 0;
        let counted = pages.into_iter().inspect(|_| page_count += 1);
        let (blocks, stats) = segment_pages(counted, &self.classifier);

        let (records, dropped) = extract_records(&blocks);

        let warnings = if self.reconcile {
            check_balances(&records)
        } else {
            Vec::new()
        };

        debug!(
            "Parsed {} pages, {} lines ({} noise, {} orphan) into {} blocks, {} records",
            page_count,
            stats.lines,
            stats.noise,
            stats.orphans,
            stats.blocks,
            records.len()
        );

        ParseResult {
            records,
            warnings,
            pages: page_count,
            lines_seen: stats.lines,
            noise_lines: stats.noise,
            orphan_lines: stats.orphans,
            blocks: stats.blocks,
            dropped,
            processing_time_ms: start.elapsed().as_millis() as u64,
        }
    }

    /// Read every page from a source, then parse. A read failure aborts the parse.
    pub fn parse_source(&self, source: &dyn PageSource) -> Result<ParseResult> {
        let mut total = source.page_count();
        if self.max_pages > 0 && total as usize > self.max_pages {
            info!("Reading first {} of {} pages", self.max_pages, total);
            total = self.max_pages as u32;
        }

        let pages = (1..=total)
            .map(|page| source.page_lines(page))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(self.parse_pages(pages))
    }
}

impl Default for StatementParser {
    fn default() -> Self {
        Self::new()
    }
}
