//! Statement date handling: the leading posting-date anchor and value dates.

use chrono::NaiveDate;

use super::lines::normalize_line;
use super::patterns::{DATE_ANCHOR, DATE_ANYWHERE, MONTHS};
use super::{ExtractionMatch, FieldExtractor, remove_words};

/// A posting date recognized at the start of a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchorMatch {
    /// Matched date, whitespace-normalized and uppercased, e.g. `02 JUL 24`.
    pub date_text: String,
    /// Byte offset in the line where the text after the date begins.
    pub rest_offset: usize,
}

/// Recognize a `DD MMM YY` date at the start of a line.
///
/// The line itself is not altered; callers keep the full line.
pub fn match_anchor(line: &str) -> Option<AnchorMatch> {
    let caps = DATE_ANCHOR.captures(line)?;
    let date = caps.get(1)?;
    Some(AnchorMatch {
        date_text: normalize_line(date.as_str()).to_uppercase(),
        rest_offset: date.end(),
    })
}

/// Remove the leading posting date once, if present.
pub fn strip_leading_date(text: &str) -> String {
    DATE_ANCHOR.replace(text, "").into_owned()
}

/// Month number for a three-letter abbreviation, any case.
fn month_number(abbr: &str) -> Option<u32> {
    let upper = abbr.to_uppercase();
    MONTHS
        .iter()
        .position(|m| *m == upper)
        .map(|i| i as u32 + 1)
}

/// Parse `DD MMM YY` with the year taken as 20YY.
pub fn parse_statement_date(date_text: &str) -> Option<NaiveDate> {
    let parts: Vec<&str> = date_text.split_whitespace().collect();
    if parts.len() != 3 || parts[0].len() != 2 || parts[2].len() != 2 {
        return None;
    }

    let day: u32 = parts[0].parse().ok()?;
    let month = month_number(parts[1])?;
    let year: i32 = parts[2].parse().ok()?;

    NaiveDate::from_ymd_opt(2000 + year, month, day)
}

/// Convert `02 JUL 24` to `2024-07-02`; empty when the text is not a valid date.
pub fn to_iso(date_text: &str) -> String {
    parse_statement_date(date_text)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

/// Finds `DD MMM YY` dates anywhere in free text.
pub struct ValueDateExtractor;

impl ValueDateExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Take the last date in `text` as the value date and remove every
    /// whole-word occurrence of it. Returns the date (uppercased) and the
    /// remaining text.
    pub fn take_last(&self, text: &str) -> (Option<String>, String) {
        match self.extract_all(text).pop() {
            Some(found) => {
                let remaining = remove_words(text, &found.source);
                (Some(found.value), remaining)
            }
            None => (None, text.to_string()),
        }
    }
}

impl Default for ValueDateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for ValueDateExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        DATE_ANYWHERE
            .find_iter(text)
            .map(|m| {
                ExtractionMatch::new(normalize_line(m.as_str()).to_uppercase(), m.as_str())
                    .with_position(m.start(), m.end())
            })
            .collect()
    }
}
