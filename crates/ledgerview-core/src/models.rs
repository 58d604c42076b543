//! Core data models for the ledger session

use chrono::{DateTime, Utc};
use ledgerview_parser::LedgerEntry;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::stats::LedgerStats;

/// The full parsed entry set and when it was obtained
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerSnapshot {
    pub entries: Vec<LedgerEntry>,
    /// Sync time, serialized as an RFC 3339 timestamp
    pub synced_at: DateTime<Utc>,
}

impl LedgerSnapshot {
    /// Create a snapshot stamped with the current time
    pub fn new(entries: Vec<LedgerEntry>) -> Self {
        Self::at(entries, Utc::now())
    }

    pub fn at(entries: Vec<LedgerEntry>, synced_at: DateTime<Utc>) -> Self {
        Self { entries, synced_at }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Category selection for the voucher type tabs
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum CategoryFilter {
    /// Every voucher type
    #[default]
    All,
    /// Exactly one voucher type (case-sensitive)
    VoucherType(String),
}

impl CategoryFilter {
    pub fn matches(&self, voucher_type: &str) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::VoucherType(t) => t == voucher_type,
        }
    }

    /// Tab label: "All" for the catch-all tab, the voucher type otherwise
    pub fn label(&self) -> &str {
        match self {
            CategoryFilter::All => "All",
            CategoryFilter::VoucherType(t) => t.as_str(),
        }
    }
}

impl From<&str> for CategoryFilter {
    fn from(s: &str) -> Self {
        if s == "all" {
            CategoryFilter::All
        } else {
            CategoryFilter::VoucherType(s.to_string())
        }
    }
}

impl std::str::FromStr for CategoryFilter {
    type Err = std::convert::Infallible;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(CategoryFilter::from(s))
    }
}

impl std::fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CategoryFilter::All => write!(f, "all"),
            CategoryFilter::VoucherType(t) => write!(f, "{}", t),
        }
    }
}

/// Search and category selection for the current session
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterState {
    pub search_query: String,
    pub category: CategoryFilter,
}

impl FilterState {
    pub fn new(search_query: impl Into<String>, category: CategoryFilter) -> Self {
        Self {
            search_query: search_query.into(),
            category,
        }
    }
}

/// The latest entry for one party within a filtered view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PartyBalance {
    /// Representative entry (latest by date)
    pub entry: LedgerEntry,
    /// Number of entries the party had in the resolved set
    pub entry_count: usize,
}

impl PartyBalance {
    pub fn party_name(&self) -> &str {
        &self.entry.party_name
    }

    pub fn balance(&self) -> Decimal {
        self.entry.balance
    }
}

/// Everything the front-end needs to draw one screen
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerView {
    pub stats: LedgerStats,
    pub categories: Vec<CategoryFilter>,
    pub parties: Vec<PartyBalance>,
    pub filter: FilterState,
    pub synced_at: Option<DateTime<Utc>>,
}
