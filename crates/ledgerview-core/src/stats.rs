//! Summary statistics over an entry set

use ledgerview_parser::LedgerEntry;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Totals shown in the summary cards.
///
/// Sums clamp at `Decimal::MAX` / `Decimal::MIN` instead of overflowing.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LedgerStats {
    /// Distinct party names (case-sensitive)
    pub total_parties: usize,
    pub total_debit: Decimal,
    pub total_credit: Decimal,
    /// `total_debit - total_credit`
    pub net_balance: Decimal,
}

impl LedgerStats {
    pub fn from_entries(entries: &[LedgerEntry]) -> Self {
        let total_parties = entries
            .iter()
            .map(|e| e.party_name.as_str())
            .collect::<HashSet<_>>()
            .len();
        let total_debit = entries
            .iter()
            .fold(Decimal::ZERO, |acc, e| acc.saturating_add(e.debit));
        let total_credit = entries
            .iter()
            .fold(Decimal::ZERO, |acc, e| acc.saturating_add(e.credit));

        Self {
            total_parties,
            total_debit,
            total_credit,
            net_balance: total_debit.saturating_sub(total_credit),
        }
    }

    /// Whether the net balance is shown with the non-negative treatment
    pub fn is_net_positive(&self) -> bool {
        self.net_balance >= Decimal::ZERO
    }

    /// Net balance magnitude, as displayed
    pub fn net_magnitude(&self) -> Decimal {
        self.net_balance.abs()
    }
}
