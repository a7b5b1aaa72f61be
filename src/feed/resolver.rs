//! Picks the rate applicable to one currency out of a feed.

use crate::core::currency::Currency;
use crate::core::error::{SyncError, SyncResult};
use crate::feed::Feed;
use rust_decimal::Decimal;
use tracing::debug;

/// Per-unit rate of `currency` in the base currency.
///
/// The base currency is always exactly one, whatever the feed says. Otherwise rows are
/// scanned in order and the first one matching by title or by code wins; rows after the
/// match are never parsed.
pub fn resolve(currency: &Currency, feed: &Feed) -> SyncResult<Decimal> {
    if currency.is_base() {
        return Ok(Decimal::ONE);
    }

    for row in feed.rows() {
        let row = row?;
        if row.title == currency.title || row.code == currency.code {
            debug!(
                code = %currency.code,
                amount = %row.amount,
                rate = %row.rate,
                "Matched feed row"
            );
            return row.unit_rate();
        }
    }

    Err(SyncError::RateNotFound {
        code: currency.code.clone(),
        title: currency.title.clone(),
    })
}
