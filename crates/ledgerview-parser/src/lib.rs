//! Ledger CSV parser implementation
//!
//! A lenient, quote-aware parser for ledger exports with the fixed column
//! order `date, party, voucher type, voucher no, debit, credit, balance`.

use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;

pub mod amount;
pub mod error;
pub mod parser;
pub mod types;

pub use amount::parse_amount;
pub use error::ParseError;
pub use parser::CsvLedgerParser;
pub use types::{LedgerEntry, UNKNOWN_PARTY};

// ==================== Parser Trait ====================

/// Parser reference type
pub type ParserRef = Arc<dyn LedgerParserTrait>;

/// Trait for ledger export parsers
#[async_trait]
pub trait LedgerParserTrait: Send + Sync {
    /// Parse exported text into entries; an empty result means no usable data
    async fn parse(&self, content: &str) -> Vec<LedgerEntry>;

    /// Read and parse an export from a file path
    async fn parse_file(&self, path: PathBuf) -> Result<Vec<LedgerEntry>, ParseError>;
}

/// Default parser implementation
#[derive(Debug, Default)]
pub struct DefaultLedgerParser;

#[async_trait]
impl LedgerParserTrait for DefaultLedgerParser {
    async fn parse(&self, content: &str) -> Vec<LedgerEntry> {
        CsvLedgerParser::parse(content)
    }

    async fn parse_file(&self, path: PathBuf) -> Result<Vec<LedgerEntry>, ParseError> {
        let bytes = tokio::fs::read(&path).await.map_err(|e| ParseError::Unreadable {
            location: path.to_string_lossy().to_string(),
            source: e,
        })?;

        // Exports are not always clean UTF-8; bad bytes only affect their own field
        let content = String::from_utf8_lossy(&bytes);
        let entries = CsvLedgerParser::parse(&content);
        log::debug!("Parsed {} entries from {}", entries.len(), path.display());
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_default_parser_parse() {
        let parser = DefaultLedgerParser;
        let entries = parser
            .parse("Date,Party,Type,No,Debit,Credit,Balance\n2024-01-01,Acme,Sales,V1,1,0,1")
            .await;
        assert_eq!(entries.len(), 1);
    }

    #[tokio::test]
    async fn test_parse_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Date,Party,Type,No,Debit,Credit,Balance").unwrap();
        writeln!(file, "2024-01-01,Acme,Sales,V1,1,0,1").unwrap();
        file.write_all(b"2024-01-02,Caf\xe9,Sales,V2,2,0,3\n").unwrap();

        let parser: ParserRef = Arc::new(DefaultLedgerParser);
        let entries = parser.parse_file(file.path().to_path_buf()).await.unwrap();
        assert_eq!(entries.len(), 2);
        assert!(entries[1].party_name.starts_with("Caf"));
    }

    #[tokio::test]
    async fn test_parse_missing_file() {
        let parser = DefaultLedgerParser;
        let result = parser.parse_file(PathBuf::from("/nonexistent/ledger.csv")).await;
        assert!(matches!(result, Err(ParseError::Unreadable { .. })));
    }
}
