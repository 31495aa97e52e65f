//! Groups classified lines into one block per transaction.
//!
//! A block opens on a line starting with a posting date and absorbs every
//! following content line until the next dated line or end of input. Noise
//! lines are invisible to the state machine, and page breaks do not close a
//! block.

use tracing::trace;

use super::rules::dates::match_anchor;
use super::rules::lines::{LineClassifier, LineKind, normalize_line};

/// Raw text of one transaction before field extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// Posting date as matched on the anchor line, e.g. `02 JUL 24`.
    pub date_text: String,
    /// Anchor line and continuation lines joined by single spaces.
    pub raw: String,
}

impl Block {
    fn open(date_text: String, line: String) -> Self {
        Self { date_text, raw: line }
    }

    fn append(&mut self, line: &str) {
        self.raw.push(' ');
        self.raw.push_str(line);
    }
}

#[derive(Debug, Default)]
enum State {
    #[default]
    Idle,
    Open(Block),
}

/// Line counters collected while segmenting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SegmentStats {
    /// Lines fed, including noise.
    pub lines: usize,
    /// Blank and header lines skipped.
    pub noise: usize,
    /// Content lines seen before the first dated line.
    pub orphans: usize,
    /// Blocks emitted.
    pub blocks: usize,
}

/// Two-state block segmenter: idle, or holding one open block.
pub struct Segmenter<'a> {
    classifier: &'a LineClassifier,
    state: State,
    stats: SegmentStats,
}

impl<'a> Segmenter<'a> {
    pub fn new(classifier: &'a LineClassifier) -> Self {
        Self {
            classifier,
            state: State::Idle,
            stats: SegmentStats::default(),
        }
    }

    /// Feed one raw line. Returns the block closed by this line, if any.
    pub fn feed(&mut self, line: &str) -> Option<Block> {
        self.stats.lines += 1;

        match self.classifier.classify(line) {
            LineKind::Blank | LineKind::Header => {
                self.stats.noise += 1;
                return None;
            }
            LineKind::Content => {}
        }

        let line = normalize_line(line);

        if let Some(anchor) = match_anchor(&line) {
            let opened = Block::open(anchor.date_text, line);
            return match std::mem::replace(&mut self.state, State::Open(opened)) {
                State::Open(closed) => self.emit(closed),
                State::Idle => None,
            };
        }

        match &mut self.state {
            State::Open(block) => block.append(&line),
            State::Idle => {
                trace!("Discarding line before first transaction: {}", line);
                self.stats.orphans += 1;
            }
        }
        None
    }

    /// End of input: close the open block, if any.
    pub fn finish(mut self) -> (Option<Block>, SegmentStats) {
        let last = match std::mem::take(&mut self.state) {
            State::Open(block) => self.emit(block),
            State::Idle => None,
        };
        (last, self.stats)
    }

    fn emit(&mut self, block: Block) -> Option<Block> {
        self.stats.blocks += 1;
        trace!("Closed block {}: {}", self.stats.blocks, block.raw);
        Some(block)
    }
}

/// Segment pages of lines, in page order, into blocks.
pub fn segment_pages<P, L>(pages: P, classifier: &LineClassifier) -> (Vec<Block>, SegmentStats)
where
    P: IntoIterator,
    P::Item: IntoIterator<Item = L>,
    L: AsRef<str>,
{
    let mut segmenter = Segmenter::new(classifier);
    let mut blocks = Vec::new();

    for page in pages {
        for line in page {
            if let Some(block) = segmenter.feed(line.as_ref()) {
                blocks.push(block);
            }
        }
    }

    let (last, stats) = segmenter.finish();
    blocks.extend(last);
    (blocks, stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn segment(pages: Vec<Vec<&str>>) -> (Vec<Block>, SegmentStats) {
        segment_pages(pages, &LineClassifier::new())
    }

    #[test]
    fn test_wrapped_lines_join_one_block() {
        let (blocks, stats) = segment(vec![vec![
            "02 JUL 24 ATM WITHDRAWAL",
            "BRANCH 5 100.00 0.00 49,900.00",
        ]]);

        assert_eq!(
            blocks,
            vec![Block {
                date_text: "02 JUL 24".to_string(),
                raw: "02 JUL 24 ATM WITHDRAWAL BRANCH 5 100.00 0.00 49,900.00".to_string(),
            }]
        );
        assert_eq!(stats.blocks, 1);
    }

    #[test]
    fn test_each_anchor_opens_a_block() {
        let (blocks, _) = segment(vec![vec![
            "02 JUL 24 A 1.00 0.00 1.00",
            "03 JUL 24 B 1.00 0.00 0.00",
            "04 jul 24 C",
        ]]);

        let dates: Vec<&str> = blocks.iter().map(|b| b.date_text.as_str()).collect();
        assert_eq!(dates, vec!["02 JUL 24", "03 JUL 24", "04 JUL 24"]);
        assert_eq!(blocks[2].raw, "04 jul 24 C");
    }

    #[test]
    fn test_noise_neither_opens_nor_extends() {
        let (blocks, stats) = segment(vec![vec![
            "ACCOUNT STATEMENT",
            "DATE DESCRIPTION VALUE DATE DEBIT CREDIT BALANCE",
            "02 JUL 24 TRANSFER",
            "",
            "Page 1 of 2",
            "TO SAVINGS 10.00 0.00 90.00",
        ]]);

        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].raw, "02 JUL 24 TRANSFER TO SAVINGS 10.00 0.00 90.00");
        assert_eq!(stats.noise, 4);
        assert_eq!(stats.lines, 6);
    }

    #[test]
    fn test_lines_before_first_anchor_are_dropped() {
        let (blocks, stats) = segment(vec![vec!["MR J SMITH", "12 HIGH ST", "02 JUL 24 FEE"]]);

        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].raw, "02 JUL 24 FEE");
        assert_eq!(stats.orphans, 2);
    }

    #[test]
    fn test_block_spans_page_boundary() {
        let (blocks, _) = segment(vec![
            vec!["02 JUL 24 CARD PAYMENT", "AMAZON"],
            vec!["Page 2 of 2", "MARKETPLACE 25.00 0.00 75.00", "03 JUL 24 FEE"],
        ]);

        assert_eq!(blocks.len(), 2);
        assert_eq!(
            blocks[0].raw,
            "02 JUL 24 CARD PAYMENT AMAZON MARKETPLACE 25.00 0.00 75.00"
        );
    }

    #[test]
    fn test_whitespace_is_normalized() {
        let (blocks, _) = segment(vec![vec!["  02   JUL 24\tATM  ", "   BRANCH    5  "]]);
        assert_eq!(blocks[0].date_text, "02 JUL 24");
        assert_eq!(blocks[0].raw, "02 JUL 24 ATM BRANCH 5");
    }

    #[test]
    fn test_empty_input() {
        let (blocks, stats) = segment(vec![]);
        assert!(blocks.is_empty());
        assert_eq!(stats, SegmentStats::default());
    }
}
