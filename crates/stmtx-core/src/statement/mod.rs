//! Statement transaction extraction module.

pub mod extractor;
pub mod parser;
pub mod reconcile;
pub mod rules;
pub mod segmenter;

pub use extractor::{extract_record, extract_records};
pub use parser::{ParseResult, StatementParser};
pub use reconcile::check_balances;
pub use segmenter::{Block, SegmentStats, Segmenter, segment_pages};
