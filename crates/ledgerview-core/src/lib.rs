//! Core ledger processing and business logic

pub mod error;
pub mod models;
pub mod query;
pub mod resolver;
pub mod source;
pub mod stats;
pub mod storage;
pub mod time;

use chrono::{DateTime, Utc};
use ledgerview_config::Config;
use ledgerview_parser::{LedgerEntry, ParserRef};
use std::path::PathBuf;
use std::sync::Arc;

pub use error::{CoreError, CoreResult, DefaultErrorLogger, ErrorContext, ErrorLogger, ErrorSeverity};
pub use models::{CategoryFilter, FilterState, LedgerSnapshot, LedgerView, PartyBalance};
pub use resolver::resolve;
pub use source::{FetchedExport, SourceFetcher};
pub use stats::LedgerStats;
pub use storage::{JsonFileStore, SnapshotStore, StoreRef};
pub use time::{parse_entry_date, EntryDate};

/// Outcome of a successful sync
#[derive(Debug, Clone, PartialEq)]
pub struct SyncReport {
    /// Candidate the export was read from, `None` for in-memory text
    pub source: Option<PathBuf>,
    pub entry_count: usize,
    pub synced_at: DateTime<Utc>,
    /// Whether the snapshot reached durable storage
    pub persisted: bool,
}

/// Ledger session state.
///
/// Owns the current snapshot and filter selection. Only the `&mut self`
/// methods change state; every view is computed fresh from the snapshot.
pub struct Ledger {
    config: Config,
    parser: ParserRef,
    store: Option<StoreRef>,
    snapshot: Option<LedgerSnapshot>,
    filter: FilterState,
}

impl Ledger {
    /// Create a new ledger with config and parser
    pub fn new(config: Config, parser: ParserRef) -> Self {
        let store: Option<StoreRef> = if config.storage.enable {
            Some(Arc::new(JsonFileStore::new(config.storage.path.clone())))
        } else {
            None
        };

        Self {
            config,
            parser,
            store,
            snapshot: None,
            filter: FilterState::default(),
        }
    }

    /// Replace the snapshot store
    pub fn with_store(mut self, store: Option<StoreRef>) -> Self {
        self.store = store;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    // ==================== Snapshot Lifecycle ====================

    /// Load the cached snapshot, if one was stored by an earlier sync.
    ///
    /// Returns whether a snapshot was restored.
    pub async fn restore(&mut self) -> CoreResult<bool> {
        let Some(store) = &self.store else {
            return Ok(false);
        };

        match store.load().await? {
            Some(snapshot) => {
                log::info!(
                    "Restored {} entries, last synced: {}",
                    snapshot.len(),
                    snapshot.synced_at.to_rfc3339()
                );
                self.snapshot = Some(snapshot);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Fetch from the configured candidates and replace the snapshot
    pub async fn sync(&mut self) -> CoreResult<SyncReport> {
        let candidates = self.config.source.candidates.clone();
        self.sync_from(candidates).await
    }

    /// Fetch from the given candidates and replace the snapshot
    pub async fn sync_from(&mut self, candidates: Vec<PathBuf>) -> CoreResult<SyncReport> {
        let fetcher = SourceFetcher::new(self.parser.clone(), candidates);
        let fetched = fetcher.fetch().await?;
        self.accept(fetched.entries, Some(fetched.source)).await
    }

    /// Parse export text already in memory and replace the snapshot
    pub async fn sync_text(&mut self, content: &str) -> CoreResult<SyncReport> {
        let entries = self.parser.parse(content).await;
        self.accept(entries, None).await
    }

    async fn accept(&mut self, entries: Vec<LedgerEntry>, source: Option<PathBuf>) -> CoreResult<SyncReport> {
        if entries.is_empty() {
            return Err(CoreError::EmptyInput);
        }

        let snapshot = LedgerSnapshot::new(entries);
        let mut report = SyncReport {
            source,
            entry_count: snapshot.len(),
            synced_at: snapshot.synced_at,
            persisted: false,
        };

        if let Some(store) = &self.store {
            match store.save(&snapshot).await {
                Ok(()) => report.persisted = true,
                Err(e) => {
                    let context = ErrorContext::new("persist_snapshot".to_string())
                        .with_data("entries", serde_json::json!(snapshot.len()));
                    DefaultErrorLogger.log_error(&e, &context);
                }
            }
        }

        log::info!("Synced {} entries", snapshot.len());
        self.snapshot = Some(snapshot);
        Ok(report)
    }

    pub fn snapshot(&self) -> Option<&LedgerSnapshot> {
        self.snapshot.as_ref()
    }

    /// The current snapshot, or `NotLoaded` before the first restore/sync
    pub fn require_snapshot(&self) -> CoreResult<&LedgerSnapshot> {
        self.snapshot.as_ref().ok_or(CoreError::NotLoaded)
    }

    /// All entries of the current snapshot
    pub fn entries(&self) -> &[LedgerEntry] {
        self.snapshot
            .as_ref()
            .map(|s| s.entries.as_slice())
            .unwrap_or(&[])
    }

    // ==================== Filter State ====================

    pub fn filter_state(&self) -> &FilterState {
        &self.filter
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.filter.search_query = query.into();
    }

    pub fn set_category(&mut self, category: CategoryFilter) {
        self.filter.category = category;
    }

    pub fn set_filter(&mut self, filter: FilterState) {
        self.filter = filter;
    }

    // ==================== Derived Views ====================

    /// Summary totals over the full entry set
    pub fn stats(&self) -> LedgerStats {
        LedgerStats::from_entries(self.entries())
    }

    /// Category tabs for the full entry set
    pub fn categories(&self) -> Vec<CategoryFilter> {
        query::categories(self.entries())
    }

    /// Entries matching the current filter, in source order
    pub fn filtered_entries(&self) -> Vec<LedgerEntry> {
        query::apply(self.entries(), &self.filter)
    }

    /// Latest entry per party for the current filter, largest balances first
    pub fn party_balances(&self) -> Vec<PartyBalance> {
        resolve(&self.filtered_entries())
    }

    /// Everything needed to render the current screen
    pub fn view(&self) -> LedgerView {
        LedgerView {
            stats: self.stats(),
            categories: self.categories(),
            parties: self.party_balances(),
            filter: self.filter.clone(),
            synced_at: self.snapshot.as_ref().map(|s| s.synced_at),
        }
    }
}

// ==================== Tests ====================
