//! Cash drawer reconciliation rule.
//!
//! At register close-out the counted cash is compared with what the POS
//! expected. Small differences (change-making, rounding) are normal; only a
//! difference strictly larger than [`CASH_DISCREPANCY_THRESHOLD`] in either
//! direction is worth an admin alert.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Tolerance for a closing discrepancy, in pesos.
pub const CASH_DISCREPANCY_THRESHOLD: Decimal = Decimal::from_parts(50, 0, 0, false, 0);

/// Expected vs. counted cash for one register close-out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashDiscrepancy {
    pub expected: Decimal,
    pub counted: Decimal,
}

impl CashDiscrepancy {
    #[must_use]
    pub const fn new(expected: Decimal, counted: Decimal) -> Self {
        Self { expected, counted }
    }

    /// Counted minus expected. Negative means the drawer is short.
    #[must_use]
    pub fn difference(&self) -> Decimal {
        self.counted - self.expected
    }

    /// Whether the difference warrants an alert.
    #[must_use]
    pub fn is_flagged(&self) -> bool {
        is_flagged(self.difference())
    }

    #[must_use]
    pub fn is_short(&self) -> bool {
        self.difference().is_sign_negative() && !self.difference().is_zero()
    }
}

/// Whether a raw difference exceeds the tolerance.
#[must_use]
pub fn is_flagged(difference: Decimal) -> bool {
    difference.abs() > CASH_DISCREPANCY_THRESHOLD
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_threshold_is_fifty() {
        assert_eq!(CASH_DISCREPANCY_THRESHOLD, Decimal::from(50));
    }

    #[test]
    fn test_exactly_threshold_not_flagged() {
        assert!(!is_flagged(dec("50")));
        assert!(!is_flagged(dec("-50")));
        assert!(!is_flagged(dec("50.00")));
    }

    #[test]
    fn test_just_over_threshold_flagged() {
        assert!(is_flagged(dec("50.01")));
        assert!(is_flagged(dec("-50.01")));
    }

    #[test]
    fn test_negative_flagged_by_absolute_value() {
        assert!(is_flagged(dec("-51")));
    }

    #[test]
    fn test_zero_not_flagged() {
        assert!(!is_flagged(Decimal::ZERO));
    }

    #[test]
    fn test_discrepancy_difference() {
        let short = CashDiscrepancy::new(dec("10000"), dec("9949"));
        assert_eq!(short.difference(), dec("-51"));
        assert!(short.is_flagged());
        assert!(short.is_short());

        let over = CashDiscrepancy::new(dec("10000"), dec("10050"));
        assert_eq!(over.difference(), dec("50"));
        assert!(!over.is_flagged());
        assert!(!over.is_short());
    }
}
