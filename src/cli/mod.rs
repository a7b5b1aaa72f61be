pub mod rates;
pub mod setup;
pub mod sync;
pub mod ui;

use crate::core::currency::{Currency, CurrencyStore};
use anyhow::{Result, anyhow};
use chrono::NaiveDate;

/// Accepts the feed's own `DD.MM.YYYY` as well as ISO `YYYY-MM-DD`.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, crate::feed::fetcher::FEED_DATE_FORMAT)
        .or_else(|_| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
        .map_err(|_| anyhow!("Invalid date '{s}', expected DD.MM.YYYY or YYYY-MM-DD"))
}

/// Finds a stored currency by short code, ignoring case.
pub async fn find_currency(store: &dyn CurrencyStore, code: &str) -> Result<Option<Currency>> {
    Ok(store
        .list()
        .await?
        .into_iter()
        .find(|c| c.code.eq_ignore_ascii_case(code)))
}
