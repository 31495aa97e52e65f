//! Deciding which freshly parsed records are new.

use std::collections::HashMap;

use crate::models::config::MergeStrategy;
use crate::models::record::TransactionRecord;

/// Records of `fresh` beyond the number already persisted.
///
/// Assumes the statement only ever grows at the end and is re-parsed from
/// the start on every run: the first `existing.len()` fresh records are taken
/// to be the persisted ones without comparing content.
pub fn merge_positional<'a>(
    existing: &[TransactionRecord],
    fresh: &'a [TransactionRecord],
) -> &'a [TransactionRecord] {
    fresh.get(existing.len()..).unwrap_or(&[])
}

/// Records of `fresh` not already persisted, compared on every field.
///
/// Each persisted record cancels out one identical fresh record, so genuine
/// repeats (two identical fees on one day) survive. Fresh order is kept.
pub fn merge_fingerprint(
    existing: &[TransactionRecord],
    fresh: &[TransactionRecord],
) -> Vec<TransactionRecord> {
    let mut seen: HashMap<&TransactionRecord, usize> = HashMap::new();
    for record in existing {
        *seen.entry(record).or_insert(0) += 1;
    }

    fresh
        .iter()
        .filter(|record| match seen.get_mut(record) {
            Some(count) if *count > 0 => {
                *count -= 1;
                false
            }
            _ => true,
        })
        .cloned()
        .collect()
}

/// New records under the given strategy.
pub fn merge(
    existing: &[TransactionRecord],
    fresh: &[TransactionRecord],
    strategy: MergeStrategy,
) -> Vec<TransactionRecord> {
    match strategy {
        MergeStrategy::Positional => merge_positional(existing, fresh).to_vec(),
        MergeStrategy::Fingerprint => merge_fingerprint(existing, fresh),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn rec(description: &str) -> TransactionRecord {
        TransactionRecord {
            date: "02 JUL 24".to_string(),
            description: description.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_positional_suffix() {
        let existing = vec![rec("A"), rec("B")];
        let fresh = vec![rec("A"), rec("B"), rec("C"), rec("D")];
        assert_eq!(merge_positional(&existing, &fresh), &[rec("C"), rec("D")]);
    }

    #[test]
    fn test_positional_is_idempotent() {
        let existing = vec![rec("A"), rec("B")];
        assert!(merge_positional(&existing, &existing).is_empty());
    }

    #[test]
    fn test_positional_ignores_content() {
        let existing = vec![rec("X")];
        let fresh = vec![rec("A"), rec("B")];
        assert_eq!(merge_positional(&existing, &fresh), &[rec("B")]);
    }

    #[test]
    fn test_positional_shorter_fresh_parse() {
        let existing = vec![rec("A"), rec("B"), rec("C")];
        let fresh = vec![rec("A")];
        assert!(merge_positional(&existing, &fresh).is_empty());
    }

    #[test]
    fn test_fingerprint_set_difference() {
        let existing = vec![rec("A"), rec("B")];
        let fresh = vec![rec("B"), rec("C"), rec("A")];
        assert_eq!(merge_fingerprint(&existing, &fresh), vec![rec("C")]);
    }

    #[test]
    fn test_fingerprint_keeps_repeats_beyond_persisted_count() {
        let existing = vec![rec("FEE")];
        let fresh = vec![rec("FEE"), rec("FEE")];
        assert_eq!(merge_fingerprint(&existing, &fresh), vec![rec("FEE")]);
    }

    #[test]
    fn test_merge_dispatch() {
        let existing = vec![rec("X")];
        let fresh = vec![rec("X"), rec("Y")];
        assert_eq!(merge(&existing, &fresh, MergeStrategy::Positional), vec![rec("Y")]);
        assert_eq!(merge(&existing, &fresh, MergeStrategy::Fingerprint), vec![rec("Y")]);
        assert!(merge(&fresh, &fresh, MergeStrategy::Fingerprint).is_empty());
    }
}
