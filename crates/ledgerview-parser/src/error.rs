//! Error types for ledgerview-parser

use thiserror::Error;
use std::io;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Cannot read ledger export at {location}")]
    Unreadable {
        location: String,
        #[source]
        source: io::Error,
    },
}
