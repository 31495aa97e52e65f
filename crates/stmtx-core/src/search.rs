//! Read-only queries over the persisted record set.
//!
//! All matching is case-insensitive substring containment on the stored
//! text, so `02 JUL` finds every posting on the second of July and `84695`
//! finds `-84695.00`.

use crate::models::record::TransactionRecord;

fn contains(field: &str, needle: &str) -> bool {
    field.to_lowercase().contains(needle)
}

fn filter_by<'a, F>(records: &'a [TransactionRecord], query: &str, matches: F) -> Vec<&'a TransactionRecord>
where
    F: Fn(&TransactionRecord, &str) -> bool,
{
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    records.iter().filter(|r| matches(r, &needle)).collect()
}

/// Records whose printed or ISO date contains `query`.
pub fn by_date<'a>(records: &'a [TransactionRecord], query: &str) -> Vec<&'a TransactionRecord> {
    filter_by(records, query, |r, q| contains(&r.date, q) || contains(&r.date_iso, q))
}

/// Records whose debit or credit contains `query`. Thousands separators in
/// the query are ignored.
pub fn by_amount<'a>(records: &'a [TransactionRecord], query: &str) -> Vec<&'a TransactionRecord> {
    let query = query.replace(',', "");
    filter_by(records, &query, |r, q| contains(&r.debit, q) || contains(&r.credit, q))
}

/// Records whose identifier contains `query`.
pub fn by_id<'a>(records: &'a [TransactionRecord], query: &str) -> Vec<&'a TransactionRecord> {
    filter_by(records, query, |r, q| contains(&r.id, q))
}

/// One page of records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<'a> {
    /// Requested page, 1-based.
    pub page: usize,
    pub per_page: usize,
    pub total_rows: usize,
    pub total_pages: usize,
    pub rows: &'a [TransactionRecord],
}

impl Page<'_> {
    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Slice out page `page` (1-based) of `per_page` records.
///
/// Page 0 is treated as page 1; a page past the end has no rows.
pub fn paginate(records: &[TransactionRecord], page: usize, per_page: usize) -> Page<'_> {
    let page = page.max(1);
    let per_page = per_page.max(1);
    let total_rows = records.len();
    let total_pages = total_rows.div_ceil(per_page);

    let start = ((page - 1) * per_page).min(total_rows);
    let end = (start + per_page).min(total_rows);

    Page {
        page,
        per_page,
        total_rows,
        total_pages,
        rows: &records[start..end],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(date: &str, date_iso: &str, id: &str, debit: &str, credit: &str) -> TransactionRecord {
        TransactionRecord {
            date: date.to_string(),
            date_iso: date_iso.to_string(),
            id: id.to_string(),
            debit: debit.to_string(),
            credit: credit.to_string(),
            description: "ROW".to_string(),
            ..Default::default()
        }
    }

    fn sample() -> Vec<TransactionRecord> {
        vec![
            rec("02 JUL 24", "2024-07-02", "19828166", "0.00", "50000.00"),
            rec("03 JUL 24", "2024-07-03", "", "-84695.00", "0.00"),
            rec("02 AUG 24", "2024-08-02", "200515912587008", "100.00", "0.00"),
        ]
    }

    #[test]
    fn test_by_date_matches_either_form() {
        let records = sample();
        assert_eq!(by_date(&records, " 02 jul ").len(), 1);
        assert_eq!(by_date(&records, "2024-07").len(), 2);
        assert_eq!(by_date(&records, "aug").len(), 1);
        assert!(by_date(&records, "2023").is_empty());
    }

    #[test]
    fn test_by_amount_ignores_commas() {
        let records = sample();
        assert_eq!(by_amount(&records, "84,695")[0].date, "03 JUL 24");
        assert_eq!(by_amount(&records, "50000.00").len(), 1);
        assert_eq!(by_amount(&records, "0.00").len(), 3);
    }

    #[test]
    fn test_by_id_partial() {
        let records = sample();
        assert_eq!(by_id(&records, "200515")[0].date, "02 AUG 24");
        assert!(by_id(&records, "999").is_empty());
    }

    #[test]
    fn test_empty_query_matches_nothing() {
        let records = sample();
        assert!(by_date(&records, "  ").is_empty());
        assert!(by_amount(&records, ",").is_empty());
        assert!(by_id(&records, "").is_empty());
    }

    #[test]
    fn test_paginate() {
        let records: Vec<TransactionRecord> = (0..5)
            .map(|i| rec(&format!("0{} JUL 24", i + 1), "", "", "", ""))
            .collect();

        let first = paginate(&records, 1, 2);
        assert_eq!(first.total_pages, 3);
        assert_eq!(first.rows.len(), 2);
        assert!(!first.has_prev());
        assert!(first.has_next());

        let last = paginate(&records, 3, 2);
        assert_eq!(last.rows.len(), 1);
        assert_eq!(last.rows[0].date, "05 JUL 24");
        assert!(!last.has_next());

        assert!(paginate(&records, 9, 2).rows.is_empty());
        assert_eq!(paginate(&records, 0, 2).page, 1);
        assert_eq!(paginate(&[], 1, 100).total_pages, 0);
    }
}
