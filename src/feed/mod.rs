//! The CNB daily rate feed: fetching, parsing and rate resolution.

pub mod fetcher;
pub mod parser;
pub mod resolver;

pub use fetcher::{CnbFeedFetcher, FeedSource};
pub use parser::RateRow;

use crate::core::error::SyncResult;
use chrono::NaiveDate;
use std::fmt;
use std::sync::Arc;

/// An immutable snapshot of one fetched feed. Cloning shares the text.
#[derive(Clone, PartialEq, Eq)]
pub struct Feed {
    raw: Arc<str>,
}

impl Feed {
    pub fn new(raw: impl Into<Arc<str>>) -> Self {
        Self { raw: raw.into() }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Lazily parsed data rows, in feed order.
    pub fn rows(&self) -> impl Iterator<Item = SyncResult<RateRow>> + '_ {
        parser::rows(&self.raw)
    }

    /// Date stamp from the first line, if it has the usual `DD.MM.YYYY #N` shape.
    pub fn header(&self) -> Option<FeedHeader> {
        self.raw.lines().next().and_then(FeedHeader::parse)
    }
}

impl fmt::Debug for Feed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Feed")
            .field("header", &self.header())
            .field("bytes", &self.raw.len())
            .finish()
    }
}

impl From<String> for Feed {
    fn from(raw: String) -> Self {
        Feed::new(raw)
    }
}

impl From<&str> for Feed {
    fn from(raw: &str) -> Self {
        Feed::new(raw)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedHeader {
    pub date: NaiveDate,
    /// Running number of the publication within the year.
    pub sequence: Option<u32>,
}

impl FeedHeader {
    fn parse(line: &str) -> Option<Self> {
        let mut parts = line.split_whitespace();
        let date = NaiveDate::parse_from_str(parts.next()?, fetcher::FEED_DATE_FORMAT).ok()?;
        let sequence = parts
            .next()
            .and_then(|s| s.strip_prefix('#'))
            .and_then(|s| s.parse().ok());
        Some(FeedHeader { date, sequence })
    }
}
