//! CSV ledger export parser

use crate::amount::{parse_amount, parse_optional_amount};
use crate::types::{column, LedgerEntry, MIN_COLUMNS, UNKNOWN_PARTY};

/// Line-based parser for ledger CSV exports
pub struct CsvLedgerParser;

impl CsvLedgerParser {
    /// Parse exported CSV text into ledger entries.
    ///
    /// Blank lines are ignored and the first non-blank line is treated as the
    /// header. Rows with fewer than six columns are dropped. The result keeps
    /// the input row order and is empty when nothing usable was found.
    pub fn parse(content: &str) -> Vec<LedgerEntry> {
        let mut entries = Vec::new();

        let rows = content
            .split('\n')
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .skip(1);

        for (i, line) in rows {
            // Line number is 1-indexed (i starts from 0)
            let line_number = i + 1;
            let columns = Self::split_columns(line);
            if columns.len() < MIN_COLUMNS {
                log::debug!(
                    "Skipping line {}: expected at least {} columns, found {}",
                    line_number,
                    MIN_COLUMNS,
                    columns.len()
                );
                continue;
            }
            entries.push(Self::entry_from_columns(&columns));
        }

        entries
    }

    /// Split one line into trimmed fields.
    ///
    /// A `"` toggles quoted mode and is dropped from the output; commas only
    /// separate fields outside quotes.
    pub fn split_columns(line: &str) -> Vec<String> {
        let mut columns = Vec::new();
        let mut current = String::new();
        let mut in_quotes = false;

        for c in line.chars() {
            match c {
                '"' => in_quotes = !in_quotes,
                ',' if !in_quotes => {
                    columns.push(current.trim().to_string());
                    current.clear();
                }
                _ => current.push(c),
            }
        }
        columns.push(current.trim().to_string());

        columns
    }

    fn entry_from_columns(columns: &[String]) -> LedgerEntry {
        let text = |idx: usize| columns.get(idx).map(String::as_str).unwrap_or("");

        let party_name = match text(column::PARTY_NAME) {
            "" => UNKNOWN_PARTY.to_string(),
            name => name.to_string(),
        };

        LedgerEntry {
            date: text(column::DATE).to_string(),
            party_name,
            voucher_type: text(column::VOUCHER_TYPE).to_string(),
            voucher_no: text(column::VOUCHER_NO).to_string(),
            debit: parse_amount(text(column::DEBIT)),
            credit: parse_amount(text(column::CREDIT)),
            balance: parse_optional_amount(columns.get(column::BALANCE).map(String::as_str)),
        }
    }
}
