//! Total amount resolution by heuristic maximum.

use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::debug;

use super::FieldResolver;
use super::patterns::AMOUNT;
use crate::models::record::ReceiptText;

/// Total resolver.
///
/// Every line contributes one candidate: the first decimal amount on the line,
/// or zero. The total is the largest candidate, on the assumption that the
/// receipt total is the largest figure printed.
pub struct TotalResolver;

impl TotalResolver {
    pub fn new() -> Self {
        Self
    }

    /// One candidate per line.
    pub fn candidates(&self, receipt: &ReceiptText) -> Vec<Decimal> {
        receipt
            .lines()
            .iter()
            .map(|line| line_amount(line).unwrap_or(Decimal::ZERO))
            .collect()
    }
}

impl Default for TotalResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldResolver for TotalResolver {
    type Output = Decimal;

    fn resolve(&self, receipt: &ReceiptText) -> Decimal {
        let total = self
            .candidates(receipt)
            .into_iter()
            .max()
            .unwrap_or(Decimal::ZERO);
        debug!("Resolved total: {}", total);
        total
    }
}

fn line_amount(line: &str) -> Option<Decimal> {
    let m = AMOUNT.find(line)?;
    let s = m.as_str();
    if s.starts_with('.') {
        Decimal::from_str(&format!("0{}", s)).ok()
    } else {
        Decimal::from_str(s).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn resolve(lines: &[&str]) -> Decimal {
        TotalResolver::new().resolve(&ReceiptText::new(lines.iter().copied()))
    }

    #[test]
    fn test_largest_amount_wins() {
        let lines = ["MILK 3.49", "BREAD 2.99", "SUBTOTAL 6.48", "TAX 0.00", "TOTAL 6.48"];
        assert_eq!(resolve(&lines), dec("6.48"));
    }

    #[test]
    fn test_total_line() {
        assert_eq!(resolve(&["2655 El Camino Real", "03/01/2020", "TOTAL 45.67"]), dec("45.67"));
    }

    #[test]
    fn test_no_amount_is_zero() {
        assert_eq!(resolve(&["no amounts", "here"]), Decimal::ZERO);
        assert_eq!(resolve(&[]), Decimal::ZERO);
    }

    #[test]
    fn test_one_candidate_per_line() {
        let receipt = ReceiptText::new(["1.00 2.00 300.00", "text", ".75"]);
        assert_eq!(
            TotalResolver::new().candidates(&receipt),
            vec![dec("1.00"), Decimal::ZERO, dec("0.75")]
        );
    }

    #[test]
    fn test_unrelated_larger_decimal_is_taken() {
        // Known heuristic limitation: any larger figure beats the printed total.
        assert_eq!(resolve(&["TOTAL 12.50", "AUTH 123456.78"]), dec("123456.78"));
    }
}
