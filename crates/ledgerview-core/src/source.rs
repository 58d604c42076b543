//! Export fetching with sequential fallback

use ledgerview_parser::{LedgerEntry, ParserRef};
use std::path::PathBuf;

use super::error::CoreError;

/// Entries read from the first candidate that could be read
#[derive(Debug, Clone)]
pub struct FetchedExport {
    pub source: PathBuf,
    pub entries: Vec<LedgerEntry>,
}

/// Tries each configured export location in order.
///
/// The first candidate that can be read wins, even if it parses to nothing;
/// later candidates are only consulted when reading fails.
pub struct SourceFetcher {
    parser: ParserRef,
    candidates: Vec<PathBuf>,
}

impl SourceFetcher {
    pub fn new(parser: ParserRef, candidates: Vec<PathBuf>) -> Self {
        Self { parser, candidates }
    }

    pub fn candidates(&self) -> &[PathBuf] {
        &self.candidates
    }

    pub async fn fetch(&self) -> Result<FetchedExport, CoreError> {
        let mut attempts = Vec::new();

        for (i, candidate) in self.candidates.iter().enumerate() {
            match self.parser.parse_file(candidate.clone()).await {
                Ok(entries) => {
                    log::debug!(
                        "Method {} succeeded: {} ({} entries)",
                        i + 1,
                        candidate.display(),
                        entries.len()
                    );
                    return Ok(FetchedExport {
                        source: candidate.clone(),
                        entries,
                    });
                }
                Err(e) => {
                    log::debug!("Method {} failed: {}: {}", i + 1, candidate.display(), e);
                    attempts.push(format!("{}: {}", candidate.display(), e));
                }
            }
        }

        Err(CoreError::SourceUnavailable { attempts })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledgerview_parser::DefaultLedgerParser;
    use std::sync::Arc;

    const EXPORT: &str = "Date,Party,Type,No,Debit,Credit,Balance\n2024-01-01,Acme,Sales,V1,1,0,1\n";

    #[tokio::test]
    async fn test_falls_back_to_next_candidate() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.csv");
        tokio::fs::write(&good, EXPORT).await.unwrap();

        let fetcher = SourceFetcher::new(
            Arc::new(DefaultLedgerParser),
            vec![dir.path().join("missing.csv"), good.clone()],
        );
        let fetched = fetcher.fetch().await.unwrap();
        assert_eq!(fetched.source, good);
        assert_eq!(fetched.entries.len(), 1);
    }

    #[tokio::test]
    async fn test_first_readable_candidate_wins() {
        let dir = tempfile::tempdir().unwrap();
        let empty = dir.path().join("empty.csv");
        let good = dir.path().join("good.csv");
        tokio::fs::write(&empty, "Date,Party\n").await.unwrap();
        tokio::fs::write(&good, EXPORT).await.unwrap();

        let fetcher = SourceFetcher::new(Arc::new(DefaultLedgerParser), vec![empty.clone(), good]);
        let fetched = fetcher.fetch().await.unwrap();
        assert_eq!(fetched.source, empty);
        assert!(fetched.entries.is_empty());
    }

    #[tokio::test]
    async fn test_all_candidates_fail() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = SourceFetcher::new(
            Arc::new(DefaultLedgerParser),
            vec![dir.path().join("a.csv"), dir.path().join("b.csv")],
        );
        match fetcher.fetch().await {
            Err(CoreError::SourceUnavailable { attempts }) => {
                assert_eq!(attempts.len(), 2);
                assert!(attempts[0].contains("a.csv"));
            }
            other => panic!("Expected SourceUnavailable, got {:?}", other),
        }
    }
}
