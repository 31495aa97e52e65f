//! Turns one block of raw statement text into a transaction record.

use tracing::trace;

use crate::models::record::TransactionRecord;

use super::rules::amounts::extract_amount_triple;
use super::rules::dates::{ValueDateExtractor, strip_leading_date, to_iso};
use super::rules::ids::IdExtractor;
use super::rules::lines::normalize_line;
use super::rules::FieldExtractor;
use super::segmenter::Block;

/// Extract a record from a block.
///
/// Pure function of the block: missing patterns leave fields empty and never fail.
pub fn extract_record(block: &Block) -> TransactionRecord {
    let raw = block.raw.trim();
    let date = block.date_text.trim().to_string();
    let date_iso = to_iso(&date);

    // Trailing debit, credit, balance; removed from the working text only
    // when all three are present.
    let triple = extract_amount_triple(raw);
    let working = match &triple {
        Some(triple) => triple.strip_from(raw),
        None => raw.to_string(),
    };

    let working = strip_leading_date(working.trim());

    let (value_date, working) = ValueDateExtractor::new().take_last(&working);

    // The reference stays in the description.
    let id = IdExtractor::new()
        .extract(&working)
        .map(|m| m.value)
        .unwrap_or_default();

    let (debit, credit, balance) = match triple {
        Some(t) => (t.debit.value, t.credit.value, t.balance.value),
        None => Default::default(),
    };

    let record = TransactionRecord {
        date,
        date_iso,
        description: normalize_line(&working),
        id,
        value_date: value_date.unwrap_or_default(),
        debit,
        credit,
        balance,
        raw: raw.to_string(),
    };

    trace!("Extracted record: {:?}", record);
    record
}

/// Extract records from blocks, in order, dropping records with neither a
/// date nor a description.
pub fn extract_records(blocks: &[Block]) -> (Vec<TransactionRecord>, usize) {
    let extracted: Vec<TransactionRecord> = blocks.iter().map(extract_record).collect();
    let total = extracted.len();
    let kept: Vec<TransactionRecord> = extracted.into_iter().filter(|r| !r.is_blank()).collect();
    let dropped = total - kept.len();
    (kept, dropped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn block(date_text: &str, raw: &str) -> Block {
        Block {
            date_text: date_text.to_string(),
            raw: raw.to_string(),
        }
    }

    #[test]
    fn test_salary_row() {
        let record = extract_record(&block(
            "02 JUL 24",
            "02 JUL 24 SALARY PAYMENT 19828166 03 JUL 24 0.00 50,000.00 50,000.00",
        ));

        assert_eq!(
            record,
            TransactionRecord {
                date: "02 JUL 24".to_string(),
                date_iso: "2024-07-02".to_string(),
                description: "SALARY PAYMENT 19828166".to_string(),
                id: "19828166".to_string(),
                value_date: "03 JUL 24".to_string(),
                debit: "0.00".to_string(),
                credit: "50000.00".to_string(),
                balance: "50000.00".to_string(),
                raw: "02 JUL 24 SALARY PAYMENT 19828166 03 JUL 24 0.00 50,000.00 50,000.00"
                    .to_string(),
            }
        );
    }

    #[test]
    fn test_wrapped_row() {
        let record = extract_record(&block(
            "02 JUL 24",
            "02 JUL 24 ATM WITHDRAWAL BRANCH 5 100.00 0.00 49,900.00",
        ));

        assert_eq!(record.description, "ATM WITHDRAWAL BRANCH 5");
        assert_eq!(record.debit, "100.00");
        assert_eq!(record.credit, "0.00");
        assert_eq!(record.balance, "49900.00");
        assert_eq!(record.value_date, "");
        assert_eq!(record.id, "");
    }

    #[test]
    fn test_description_keeps_figure_equal_to_balance() {
        let record = extract_record(&block(
            "01 JAN 24",
            "01 JAN 24 REF 1,234.56 PAYMENT 100.00 50.00 1,234.56",
        ));

        assert_eq!(record.description, "REF 1,234.56 PAYMENT");
        assert_eq!(record.debit, "100.00");
        assert_eq!(record.credit, "50.00");
        assert_eq!(record.balance, "1234.56");
    }

    #[test]
    fn test_amounts_with_cr_dr_suffixes() {
        let record = extract_record(&block(
            "02 JUL 24",
            "02 JUL 24 ATM 100.00DR 0.00 49,900.00CR",
        ));

        assert_eq!(record.debit, "100.00");
        assert_eq!(record.credit, "0.00");
        assert_eq!(record.balance, "49900.00");
        assert_eq!(record.description, "ATM DR CR");
    }

    #[test]
    fn test_currency_prefixed_amounts() {
        let record = extract_record(&block(
            "03 JUL 24",
            "03 JUL 24 FX PURCHASE INR1,000.00 0.00 INR48,900.00",
        ));

        assert_eq!(record.debit, "1000.00");
        assert_eq!(record.credit, "0.00");
        assert_eq!(record.balance, "48900.00");
        assert_eq!(record.description, "FX PURCHASE INR INR");
    }

    #[test]
    fn test_lowercase_words_are_not_value_dates() {
        let record = extract_record(&block("04 JUL 24", "04 JUL 24 BUY 12 pcs 50 ITEMS 1.00 0.00 9.00"));

        assert_eq!(record.value_date, "");
        assert_eq!(record.description, "BUY 12 pcs 50 ITEMS");
    }

    #[test]
    fn test_fewer_than_three_amounts() {
        let record = extract_record(&block("05 AUG 24", "05 AUG 24 CHARGES 15.00 85.00"));

        assert_eq!(record.debit, "");
        assert_eq!(record.credit, "");
        assert_eq!(record.balance, "");
        assert_eq!(record.description, "CHARGES 15.00 85.00");
    }

    #[test]
    fn test_negative_amounts_keep_sign() {
        let record = extract_record(&block(
            "10 SEP 24",
            "10 SEP 24 REVERSAL -84,695.00 0.00 -1,000.00",
        ));

        assert_eq!(record.debit, "-84695.00");
        assert_eq!(record.credit, "0.00");
        assert_eq!(record.balance, "-1000.00");
        assert_eq!(record.description, "REVERSAL");
    }

    #[test]
    fn test_invalid_date_yields_empty_iso() {
        let record = extract_record(&block("31 FEB 24", "31 FEB 24 ODD 1.00 2.00 3.00"));
        assert_eq!(record.date, "31 FEB 24");
        assert_eq!(record.date_iso, "");
        assert_eq!(record.description, "ODD");
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let b = block("02 JUL 24", "02 JUL 24 NEFT 200515912587008 1.00 2.00 3.00");
        assert_eq!(extract_record(&b), extract_record(&b));
    }

    #[test]
    fn test_blank_records_dropped() {
        let blocks = vec![block("", ""), block("02 JUL 24", "02 JUL 24 FEE 1.00 0.00 9.00")];
        let (records, dropped) = extract_records(&blocks);
        assert_eq!(records.len(), 1);
        assert_eq!(dropped, 1);
        assert_eq!(records[0].description, "FEE");
    }
}
