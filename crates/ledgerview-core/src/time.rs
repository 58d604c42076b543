//! Date parsing for free-text entry dates

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

/// Date-only layouts, tried in order. Two-digit years come before the
/// four-digit variant so "01-Apr-24" is not read as year 24.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%m-%d-%Y",
    "%d-%b-%y",
    "%d-%b-%Y",
    "%d %b %Y",
    "%d %B %Y",
    "%b %d, %Y",
    "%b %d %Y",
    "%B %d, %Y",
];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// A sortable entry date.
///
/// `Unparsable` orders below every parsed date, so entries whose date
/// cannot be read always lose "latest entry" comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EntryDate {
    Unparsable,
    Parsed(NaiveDateTime),
}

impl EntryDate {
    pub fn is_parsed(&self) -> bool {
        matches!(self, EntryDate::Parsed(_))
    }
}

/// Parse a free-text date label
pub fn parse_entry_date(raw: &str) -> EntryDate {
    let s = raw.trim();
    if s.is_empty() {
        return EntryDate::Unparsable;
    }

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return EntryDate::Parsed(date.and_time(NaiveTime::default()));
        }
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return EntryDate::Parsed(dt.naive_utc());
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return EntryDate::Parsed(dt);
        }
    }

    EntryDate::Unparsable
}
