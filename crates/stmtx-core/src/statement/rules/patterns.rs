//! Pattern table for statement line and field recognition.

use lazy_static::lazy_static;
use regex::Regex;

/// Header/footer vocabulary. Matched case-insensitively against whole lines.
pub const NOISE_MARKERS: [&str; 11] = [
    "DATE",
    "DESCRIPTION",
    "VALUE DATE",
    "DEBIT",
    "CREDIT",
    "BALANCE",
    "ACCOUNT",
    "STATEMENT",
    "PAGE",
    "OPENING BALANCE",
    "CLOSING BALANCE",
];

/// Month abbreviations in calendar order.
pub const MONTHS: [&str; 12] = [
    "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
];

lazy_static! {
    // Posting date at the start of a line: DD MMM YY
    pub static ref DATE_ANCHOR: Regex = Regex::new(
        r"^\s*(\d{2}\s+[A-Za-z]{3}\s+\d{2})\b"
    ).unwrap();

    // DD MMM YY anywhere in text; the month must be a real abbreviation
    pub static ref DATE_ANYWHERE: Regex = Regex::new(&format!(
        r"(?i)\b\d{{2}}\s+(?:{})\s+\d{{2}}\b",
        MONTHS.join("|")
    )).unwrap();

    // Signed amount with exactly two decimals, thousands grouping optional:
    // -84,695.00 / 0.00 / 50000.00 / 49,900.00CR / INR1,000.00
    // Group 1 is the amount. It may touch letters but not a digit, comma or
    // point on its left.
    pub static ref AMOUNT: Regex = Regex::new(
        r"(?:^|[^\d,.])(-?(?:\d{1,3}(?:,\d{3})+|\d+)\.\d{2})"
    ).unwrap();

    // Transaction reference: 8 to 18 digits standing alone
    pub static ref IDENTIFIER: Regex = Regex::new(
        r"\b(\d{8,18})\b"
    ).unwrap();
}
