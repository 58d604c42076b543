//! Common types for the ledger parser

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Party name used when the party column is empty
pub const UNKNOWN_PARTY: &str = "Unknown";

/// Minimum number of columns a row needs to produce an entry
pub const MIN_COLUMNS: usize = 6;

/// Column positions in the exported CSV
pub mod column {
    pub const DATE: usize = 0;
    pub const PARTY_NAME: usize = 1;
    pub const VOUCHER_TYPE: usize = 2;
    pub const VOUCHER_NO: usize = 3;
    pub const DEBIT: usize = 4;
    pub const CREDIT: usize = 5;
    pub const BALANCE: usize = 6;
}

/// One ledger line from the export
///
/// Every field always holds a value: missing columns resolve to the
/// documented defaults while parsing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntry {
    /// Free-text date label as exported
    pub date: String,
    /// Counterparty name
    pub party_name: String,
    /// Category label (e.g. "Sales", "Receipt"), may be empty
    pub voucher_type: String,
    /// Voucher identifier
    pub voucher_no: String,
    pub debit: Decimal,
    pub credit: Decimal,
    /// Running balance for the party at this entry
    pub balance: Decimal,
}

impl Default for LedgerEntry {
    fn default() -> Self {
        Self {
            date: String::new(),
            party_name: UNKNOWN_PARTY.to_string(),
            voucher_type: String::new(),
            voucher_no: String::new(),
            debit: Decimal::ZERO,
            credit: Decimal::ZERO,
            balance: Decimal::ZERO,
        }
    }
}

impl LedgerEntry {
    /// Check whether the entry's balance is non-negative
    pub fn is_positive(&self) -> bool {
        !self.balance.is_sign_negative() || self.balance.is_zero()
    }

    /// Absolute value of the balance
    pub fn balance_magnitude(&self) -> Decimal {
        self.balance.abs()
    }

    /// Short description line: "type • date"
    pub fn details(&self) -> String {
        format!("{} \u{2022} {}", self.voucher_type, self.date)
    }
}
