//! POS register close-out models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use vapour_lounge_core::{CashDiscrepancy, RegisterClosingId, StaffId};

/// Body of `POST /api/pos/register/close`.
#[derive(Debug, Clone, Deserialize)]
pub struct CloseRegisterInput {
    /// Cash the POS expects in the drawer.
    pub expected_cash: Decimal,
    /// Cash the cashier actually counted.
    pub counted_cash: Decimal,
    pub notes: Option<String>,
}

impl CloseRegisterInput {
    #[must_use]
    pub const fn discrepancy(&self) -> CashDiscrepancy {
        CashDiscrepancy::new(self.expected_cash, self.counted_cash)
    }
}

/// A recorded register close-out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterClosing {
    pub id: RegisterClosingId,
    pub staff_id: StaffId,
    pub expected_cash: Decimal,
    pub counted_cash: Decimal,
    /// Counted minus expected.
    pub discrepancy: Decimal,
    pub flagged: bool,
    pub notes: Option<String>,
    pub closed_at: DateTime<Utc>,
}

impl RegisterClosing {
    /// The stored amounts as a reconciliation.
    #[must_use]
    pub const fn cash(&self) -> CashDiscrepancy {
        CashDiscrepancy::new(self.expected_cash, self.counted_cash)
    }
}
