//! Monetary amount extraction for statement rows.

use rust_decimal::Decimal;
use std::str::FromStr;

use super::patterns::AMOUNT;
use super::{ExtractionMatch, FieldExtractor};

/// Amount field extractor.
pub struct AmountExtractor;

impl AmountExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for AmountExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for AmountExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        AMOUNT
            .captures_iter(text)
            .filter_map(|caps| caps.get(1))
            .map(|m| {
                ExtractionMatch::new(normalize_amount(m.as_str()), m.as_str())
                    .with_position(m.start(), m.end())
            })
            .collect()
    }
}

/// The trailing debit/credit/balance columns of a statement row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmountTriple {
    pub debit: ExtractionMatch<String>,
    pub credit: ExtractionMatch<String>,
    pub balance: ExtractionMatch<String>,
}

impl AmountTriple {
    /// Remove the three amounts from `text`, balance first, each at its
    /// rightmost occurrence so an identical figure earlier in the
    /// description survives.
    pub fn strip_from(&self, text: &str) -> String {
        [&self.balance, &self.credit, &self.debit]
            .iter()
            .fold(text.to_string(), |acc, amount| remove_rightmost(&acc, &amount.source))
    }
}

/// Take the last three amounts in `text` as debit, credit and balance.
///
/// Returns `None` when fewer than three amounts are present.
pub fn extract_amount_triple(text: &str) -> Option<AmountTriple> {
    let mut amounts = AmountExtractor::new().extract_all(text);
    if amounts.len() < 3 {
        return None;
    }

    let balance = amounts.pop()?;
    let credit = amounts.pop()?;
    let debit = amounts.pop()?;
    Some(AmountTriple { debit, credit, balance })
}

/// Normalize a printed amount: drop thousands separators, keep sign and decimals.
pub fn normalize_amount(s: &str) -> String {
    s.trim().replace(',', "")
}

/// Parse a normalized (or printed) amount for arithmetic.
pub fn parse_amount(s: &str) -> Option<Decimal> {
    let normalized = normalize_amount(s);
    if normalized.is_empty() {
        return None;
    }
    Decimal::from_str(&normalized).ok()
}

fn remove_rightmost(text: &str, literal: &str) -> String {
    match text.rfind(literal) {
        Some(start) if !literal.is_empty() => {
            let mut out = String::with_capacity(text.len());
            out.push_str(&text[..start]);
            out.push_str(&text[start + literal.len()..]);
            out
        }
        _ => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_normalize_amount() {
        assert_eq!(normalize_amount("-84,695.00"), "-84695.00");
        assert_eq!(normalize_amount("1,234,567.89"), "1234567.89");
        assert_eq!(normalize_amount(" 0.00 "), "0.00");
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("-84,695.00"), Some(Decimal::from_str("-84695.00").unwrap()));
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("n/a"), None);
    }

    #[test]
    fn test_extract_all_amounts() {
        let extractor = AmountExtractor::new();
        let results = extractor.extract_all("REF 1,234.56 PAYMENT 100.00 50.00 1,234.56");

        let values: Vec<&str> = results.iter().map(|m| m.value.as_str()).collect();
        assert_eq!(values, vec!["1234.56", "100.00", "50.00", "1234.56"]);
        assert_eq!(results[0].source, "1,234.56");
        assert_eq!(results[0].position, Some((4, 12)));
    }

    #[test]
    fn test_triple_takes_last_three() {
        let triple = extract_amount_triple("X 9.99 100.00 -50.00 1,234.56").unwrap();
        assert_eq!(triple.debit.value, "100.00");
        assert_eq!(triple.credit.value, "-50.00");
        assert_eq!(triple.balance.value, "1234.56");
    }

    #[test]
    fn test_amounts_with_suffix_and_currency() {
        let results = AmountExtractor::new().extract_all("ATM INR1,000.00 100.00DR 49,900.00CR");

        let values: Vec<&str> = results.iter().map(|m| m.value.as_str()).collect();
        assert_eq!(values, vec!["1000.00", "100.00", "49900.00"]);
        assert_eq!(results[0].source, "1,000.00");
        assert_eq!(results[0].position, Some((7, 15)));
    }

    #[test]
    fn test_triple_needs_three() {
        assert!(extract_amount_triple("ATM 100.00 50.00").is_none());
        assert!(extract_amount_triple("ATM").is_none());
    }

    #[test]
    fn test_strip_keeps_earlier_identical_figure() {
        let text = "01 JAN 24 REF 1,234.56 PAYMENT 100.00 50.00 1,234.56";
        let triple = extract_amount_triple(text).unwrap();
        assert_eq!(triple.strip_from(text), "01 JAN 24 REF 1,234.56 PAYMENT   ");
    }

    #[test]
    fn test_strip_handles_repeated_trailing_figures() {
        let text = "SALARY 0.00 50,000.00 50,000.00";
        let triple = extract_amount_triple(text).unwrap();
        assert_eq!(triple.strip_from(text), "SALARY   ");
    }
}
