//! Data models shared across the pipeline.

pub mod config;
pub mod record;

pub use config::{MergeStrategy, NoiseMatch, ParserConfig, PdfConfig, StmtxConfig, StoreConfig};
pub use record::{COLUMNS, TransactionRecord};
