//! Running-balance cross-check between consecutive records.

use rust_decimal::Decimal;
use tracing::warn;

use crate::models::record::TransactionRecord;

use super::rules::amounts::parse_amount;

/// Check that each balance follows from the previous one.
///
/// Debits are applied by magnitude, so statements printing debits either
/// signed or unsigned both reconcile. Records without a full amount triple
/// break the chain. Returns one warning per mismatch; records are untouched.
pub fn check_balances(records: &[TransactionRecord]) -> Vec<String> {
    let mut warnings = Vec::new();
    let mut previous: Option<Decimal> = None;

    for (index, record) in records.iter().enumerate() {
        let amounts = (
            parse_amount(&record.debit),
            parse_amount(&record.credit),
            parse_amount(&record.balance),
        );

        let (debit, credit, balance) = match amounts {
            (Some(d), Some(c), Some(b)) => (d, c, b),
            _ => {
                previous = None;
                continue;
            }
        };

        if let Some(prev) = previous {
            let expected = prev - debit.abs() + credit;
            if expected != balance {
                let message = format!(
                    "row {} ({} {}): balance {} does not follow from {} - {} + {} = {}",
                    index + 1,
                    record.date,
                    record.description,
                    balance,
                    prev,
                    debit.abs(),
                    credit,
                    expected
                );
                warn!("{}", message);
                warnings.push(message);
            }
        }

        previous = Some(balance);
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(debit: &str, credit: &str, balance: &str) -> TransactionRecord {
        TransactionRecord {
            date: "02 JUL 24".to_string(),
            description: "ROW".to_string(),
            debit: debit.to_string(),
            credit: credit.to_string(),
            balance: balance.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_consistent_chain() {
        let records = vec![
            row("0.00", "50000.00", "50000.00"),
            row("100.00", "0.00", "49900.00"),
            row("-900.00", "0.00", "49000.00"),
        ];
        assert!(check_balances(&records).is_empty());
    }

    #[test]
    fn test_mismatch_reported() {
        let records = vec![row("0.00", "100.00", "100.00"), row("10.00", "0.00", "80.00")];
        let warnings = check_balances(&records);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].starts_with("row 2"));
    }

    #[test]
    fn test_missing_amounts_break_chain() {
        let records = vec![
            row("0.00", "100.00", "100.00"),
            row("", "", ""),
            row("10.00", "0.00", "5.00"),
        ];
        assert!(check_balances(&records).is_empty());
    }
}
