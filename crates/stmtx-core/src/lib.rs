//! Core library for bank statement transaction extraction.
//!
//! This crate provides:
//! - Page text input (PDF via lopdf/pdf-extract, or pre-extracted text)
//! - Line classification and per-transaction block segmentation
//! - Field extraction (dates, value dates, debit/credit/balance, references)
//! - CSV persistence with incremental append
//! - Substring search and pagination over persisted records

pub mod error;
pub mod models;
pub mod pdf;
pub mod search;
pub mod statement;
pub mod store;

pub use error::{PdfError, Result, StmtxError, StoreError};
pub use models::config::{MergeStrategy, NoiseMatch, StmtxConfig};
pub use models::record::{COLUMNS, TransactionRecord};
pub use pdf::{PageSource, PdfExtractor, TextPages};
pub use statement::{ParseResult, StatementParser};
pub use store::{CsvStore, SyncOutcome};
