//! The persisted transaction record.

use serde::{Deserialize, Serialize};

/// Column order of the persisted record set.
pub const COLUMNS: [&str; 9] = [
    "date",
    "date_iso",
    "description",
    "id",
    "value_date",
    "debit",
    "credit",
    "balance",
    "raw",
];

/// One transaction recovered from a statement.
///
/// Every field is kept as text so that the persisted form matches what was
/// printed on the statement and stays searchable by substring. Amounts carry
/// no thousands separators.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct TransactionRecord {
    /// Posting date as printed, e.g. `02 JUL 24`.
    pub date: String,

    /// Posting date as `YYYY-MM-DD`, empty if the printed date is invalid.
    pub date_iso: String,

    /// Cleaned free text.
    pub description: String,

    /// Numeric reference of 8 to 18 digits found in the free text.
    pub id: String,

    /// Secondary date found in the free text.
    pub value_date: String,

    /// Debit amount, e.g. `-84695.00`.
    pub debit: String,

    /// Credit amount.
    pub credit: String,

    /// Running balance after this transaction.
    pub balance: String,

    /// Full block text before extraction.
    pub raw: String,
}

impl TransactionRecord {
    /// Field values in [`COLUMNS`] order.
    pub fn fields(&self) -> [&str; 9] {
        [
            self.date.as_str(),
            self.date_iso.as_str(),
            self.description.as_str(),
            self.id.as_str(),
            self.value_date.as_str(),
            self.debit.as_str(),
            self.credit.as_str(),
            self.balance.as_str(),
            self.raw.as_str(),
        ]
    }

    /// A record with neither a date nor a description carries nothing searchable.
    pub fn is_blank(&self) -> bool {
        self.date.is_empty() && self.description.is_empty()
    }
}
