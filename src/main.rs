//! ledgerview main entry point

use anyhow::Context;
use clap::Parser;
use ledgerview_config::{Config, DisplayConfig, SummaryUnit};
use ledgerview_core::{
    CategoryFilter, CoreError, DefaultErrorLogger, ErrorContext, ErrorLogger, Ledger, LedgerStats,
    LedgerView,
};
use ledgerview_parser::DefaultLedgerParser;
use ledgerview_utils::{format_indian, format_lakhs, format_number};
use rust_decimal::Decimal;
use std::fmt::{self, Write as _};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Runtime;

#[derive(Parser, Debug)]
#[command(name = "ledgerview")]
#[command(author = "ledgerview Contributors")]
#[command(version = "0.1.0")]
#[command(about = "A lightweight terminal viewer for outstanding party balances", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Fetch the export from the configured sources before rendering
    #[arg(long)]
    sync: bool,

    /// Sync from this CSV export instead of the configured sources
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Only show parties whose name contains this text
    #[arg(short, long, default_value = "")]
    search: String,

    /// Voucher type tab to show ("all" for every type)
    #[arg(short = 't', long, default_value = "all")]
    category: CategoryFilter,

    /// Print the default configuration and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.print_config {
        print!("{}", Config::generate_default());
        return Ok(());
    }

    let config = Config::load_or_default(&args.config)
        .map_err(|e| {
            eprintln!("{}", e.to_details());
            e
        })
        .with_context(|| format!("Failed to load configuration from {}", args.config.display()))?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.logging.level))
        .init();

    log::debug!(
        "Config loaded: {} source candidate(s), snapshot={}",
        config.source.candidates.len(),
        config.storage.path.display()
    );

    let rt = Runtime::new().context("Failed to start async runtime")?;

    rt.block_on(async {
        let display = config.display.clone();
        let snapshot_path = config.storage.path.display().to_string();
        let mut ledger = Ledger::new(config, Arc::new(DefaultLedgerParser));

        if let Err(e) = ledger.restore().await {
            warn_restore_failed(&DefaultErrorLogger, &e, &snapshot_path);
        }

        if args.sync || args.input.is_some() {
            let result = match &args.input {
                Some(input) => ledger.sync_from(vec![input.clone()]).await,
                None => ledger.sync().await,
            };
            if let Err(e) = result {
                let context = ErrorContext::new("sync".to_string())
                    .with_data("input", serde_json::json!(args.input.as_ref().map(|p| p.display().to_string())));
                DefaultErrorLogger.log_error(&e, &context);
                eprintln!("{}\n", e.to_details());
            }
        }

        ledger.set_search(args.search.clone());
        ledger.set_category(args.category.clone());

        print!("{}", render(&ledger.view(), &display)?);
        Ok::<(), anyhow::Error>(())
    })
}

/// A cached snapshot that cannot be read is skipped; the session starts empty
fn warn_restore_failed(logger: &dyn ErrorLogger, error: &CoreError, snapshot_path: &str) {
    let context = ErrorContext::new("restore_snapshot".to_string())
        .with_data("path", serde_json::json!(snapshot_path));
    logger.log_warning(&format!("Ignoring cached snapshot: {}", error), &context);
}

// ==================== Rendering ====================

fn render(view: &LedgerView, display: &DisplayConfig) -> Result<String, fmt::Error> {
    let mut out = String::new();

    match view.synced_at {
        Some(at) => writeln!(out, "Last synced: {}", at.format("%Y-%m-%d %H:%M:%S UTC"))?,
        None => writeln!(out, "Not synced yet")?,
    }
    out.push('\n');

    out.push_str(&render_stats(&view.stats, display)?);
    out.push('\n');
    out.push_str(&render_tabs(view));
    out.push('\n');
    out.push_str(&render_parties(view, display)?);
    Ok(out)
}

fn render_stats(stats: &LedgerStats, display: &DisplayConfig) -> Result<String, fmt::Error> {
    let summary = |amount: Decimal| match display.summary_unit {
        SummaryUnit::Lakh => format!("{}{}", display.currency_symbol, format_lakhs(amount)),
        SummaryUnit::Plain => format!("{}{}", display.currency_symbol, format_indian(amount)),
    };
    let net_label = if stats.is_net_positive() { "positive" } else { "negative" };

    let mut out = String::new();
    writeln!(out, "{:<14}{}", "Total Parties", format_number(stats.total_parties))?;
    writeln!(out, "{:<14}{}", "Total Debit", summary(stats.total_debit))?;
    writeln!(out, "{:<14}{}", "Total Credit", summary(stats.total_credit))?;
    writeln!(out, "{:<14}{} ({})", "Net Balance", summary(stats.net_magnitude()), net_label)?;
    Ok(out)
}

fn render_tabs(view: &LedgerView) -> String {
    let tabs: Vec<String> = view
        .categories
        .iter()
        .map(|c| {
            if *c == view.filter.category {
                format!("[{}]", c.label())
            } else {
                c.label().to_string()
            }
        })
        .collect();
    format!("{}\n", tabs.join("  "))
}

fn render_parties(view: &LedgerView, display: &DisplayConfig) -> Result<String, fmt::Error> {
    if view.parties.is_empty() {
        return Ok("No entries found\n".to_string());
    }

    let limit = match display.top_parties {
        0 => view.parties.len(),
        n => n,
    };

    let mut out = String::new();
    for party in view.parties.iter().take(limit) {
        let entry = &party.entry;
        let sign = if entry.is_positive() { "positive" } else { "negative" };
        writeln!(out, "{}", entry.party_name)?;
        writeln!(
            out,
            "  {:<40}{}{} ({})",
            entry.details(),
            display.currency_symbol,
            format_indian(entry.balance_magnitude()),
            sign
        )?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledgerview_core::{FilterState, PartyBalance};
    use ledgerview_parser::LedgerEntry;

    fn party(name: &str, voucher_type: &str, balance: i64) -> PartyBalance {
        PartyBalance {
            entry: LedgerEntry {
                date: "2024-01-01".to_string(),
                party_name: name.to_string(),
                voucher_type: voucher_type.to_string(),
                balance: Decimal::from(balance),
                ..Default::default()
            },
            entry_count: 1,
        }
    }

    fn view(parties: Vec<PartyBalance>) -> LedgerView {
        LedgerView {
            stats: LedgerStats {
                total_parties: 2,
                total_debit: Decimal::from(150_000),
                total_credit: Decimal::from(50_000),
                net_balance: Decimal::from(-1_234_567),
            },
            categories: vec![CategoryFilter::All, CategoryFilter::from("Sales")],
            parties,
            filter: FilterState::new("", CategoryFilter::from("Sales")),
            synced_at: None,
        }
    }

    #[test]
    fn test_render_stats_in_lakhs() {
        let rendered = render_stats(&view(vec![]).stats, &DisplayConfig::default()).unwrap();
        assert!(rendered.contains("\u{20b9}1.5L"));
        assert!(rendered.contains("\u{20b9}0.5L"));
        assert!(rendered.contains("\u{20b9}12.3L (negative)"));
    }

    #[test]
    fn test_render_stats_plain() {
        let display = DisplayConfig {
            summary_unit: SummaryUnit::Plain,
            ..Default::default()
        };
        let rendered = render_stats(&view(vec![]).stats, &display).unwrap();
        assert!(rendered.contains("\u{20b9}1,50,000"));
        assert!(rendered.contains("\u{20b9}12,34,567 (negative)"));
    }

    #[test]
    fn test_render_tabs_marks_active() {
        assert_eq!(render_tabs(&view(vec![])), "All  [Sales]\n");
    }

    #[test]
    fn test_render_parties() {
        let v = view(vec![party("Acme", "Sales", 250_000), party("Zanco", "Sales", -20)]);
        let rendered = render_parties(&v, &DisplayConfig::default()).unwrap();
        assert!(rendered.starts_with("Acme\n"));
        assert!(rendered.contains("Sales \u{2022} 2024-01-01"));
        assert!(rendered.contains("\u{20b9}2,50,000 (positive)"));
        assert!(rendered.contains("\u{20b9}20 (negative)"));
    }

    #[test]
    fn test_render_parties_limit_and_empty() {
        let display = DisplayConfig {
            top_parties: 1,
            ..Default::default()
        };
        let v = view(vec![party("Acme", "Sales", 10), party("Zanco", "Sales", 5)]);
        let rendered = render_parties(&v, &display).unwrap();
        assert!(rendered.contains("Acme"));
        assert!(!rendered.contains("Zanco"));

        assert_eq!(render_parties(&view(vec![]), &display).unwrap(), "No entries found\n");
    }

    #[derive(Default)]
    struct RecordingLogger {
        warnings: std::cell::RefCell<Vec<(String, String)>>,
    }

    impl ErrorLogger for RecordingLogger {
        fn log_error(&self, _error: &CoreError, _context: &ErrorContext) {}

        fn log_warning(&self, message: &str, context: &ErrorContext) {
            self.warnings
                .borrow_mut()
                .push((message.to_string(), context.data["path"].to_string()));
        }
    }

    #[test]
    fn test_restore_failure_is_a_warning() {
        let logger = RecordingLogger::default();
        let error = CoreError::StorageError {
            message: "Corrupt snapshot in data/snapshot.json".to_string(),
        };
        warn_restore_failed(&logger, &error, "data/snapshot.json");

        let warnings = logger.warnings.borrow();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].0.starts_with("Ignoring cached snapshot: Snapshot storage error"));
        assert_eq!(warnings[0].1, "\"data/snapshot.json\"");
    }

    #[test]
    fn test_render_maximum_amounts() {
        let mut v = view(vec![party("Acme", "Sales", 0)]);
        v.parties[0].entry.balance = Decimal::MIN;
        v.stats.total_debit = Decimal::MAX;
        v.stats.net_balance = Decimal::MIN;

        let rendered = render(&v, &DisplayConfig::default()).unwrap();
        assert!(rendered.contains("Acme"));
        assert!(rendered.contains("(negative)"));
    }
}
