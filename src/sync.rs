//! Synchronization of stored currencies with the rate feed.
//!
//! A full sync fetches the feed once and then updates every known currency in turn.
//! Each currency runs in its own failure scope: its error is logged and recorded in the
//! [`SyncReport`], and the batch moves on. Only failing to fetch the feed, or to list
//! the currencies, aborts the sync, and that happens before anything is written.

use crate::core::currency::{Currency, CurrencyStore};
use crate::core::error::{SyncError, SyncResult};
use crate::feed::{Feed, FeedSource, resolver};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// What happened to a single currency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The base currency is fixed at one and never written.
    BaseCurrency,
    Updated {
        previous: Option<Decimal>,
        current: Decimal,
    },
}

#[derive(Debug)]
pub struct CurrencyOutcome {
    pub currency: Currency,
    pub result: SyncResult<UpdateOutcome>,
}

/// Per-currency results of one sync cycle, in store order.
#[derive(Debug)]
pub struct SyncReport {
    pub feed_date: Option<NaiveDate>,
    pub outcomes: Vec<CurrencyOutcome>,
}

impl SyncReport {
    pub fn updated(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.result, Ok(UpdateOutcome::Updated { .. })))
            .count()
    }

    pub fn failures(&self) -> impl Iterator<Item = (&Currency, &SyncError)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|e| (&o.currency, e)))
    }

    pub fn is_complete(&self) -> bool {
        self.failures().next().is_none()
    }
}

pub struct RateSyncService {
    feed: Arc<dyn FeedSource>,
    store: Arc<dyn CurrencyStore>,
}

impl RateSyncService {
    pub fn new(feed: Arc<dyn FeedSource>, store: Arc<dyn CurrencyStore>) -> Self {
        Self { feed, store }
    }

    /// Raw feed for `date`, or the latest one.
    pub async fn fetch_feed(&self, date: Option<NaiveDate>) -> SyncResult<Feed> {
        Ok(Feed::from(self.feed.fetch(date).await?))
    }

    /// Per-unit rate of `currency` without persisting anything. The feed is fetched
    /// for `date` only when `feed` is not supplied and the currency is not the base.
    pub async fn pick_exchange_rate(
        &self,
        currency: &Currency,
        feed: Option<&Feed>,
        date: Option<NaiveDate>,
    ) -> SyncResult<Decimal> {
        if currency.is_base() {
            return Ok(Decimal::ONE);
        }
        match feed {
            Some(feed) => resolver::resolve(currency, feed),
            None => resolver::resolve(currency, &self.fetch_feed(date).await?),
        }
    }

    /// Resolves and persists the rate of one currency. `currency` is only modified once
    /// the store accepted the new rate.
    #[instrument(skip_all, fields(code = %currency.code))]
    pub async fn update_exchange_rate(
        &self,
        currency: &mut Currency,
        feed: Option<&Feed>,
    ) -> SyncResult<UpdateOutcome> {
        if currency.is_base() {
            debug!("Skipping base currency");
            return Ok(UpdateOutcome::BaseCurrency);
        }

        let rate = self.pick_exchange_rate(currency, feed, None).await?;
        let previous = currency.exchange_rate_to_base;

        let mut updated = currency.clone();
        updated.exchange_rate_to_base = Some(rate);
        self.store.save(&updated).await?;
        *currency = updated;

        info!(
            currency = %currency.title,
            previous = ?previous,
            current = %rate,
            "Exchange rate updated"
        );
        Ok(UpdateOutcome::Updated {
            previous,
            current: rate,
        })
    }

    /// Updates every stored currency from a single fetch of today's feed.
    pub async fn update_all_exchange_rates(&self) -> SyncResult<SyncReport> {
        let feed = self.fetch_feed(None).await?;
        let feed_date = feed.header().map(|h| h.date);
        let currencies = self.store.list().await?;
        info!(
            feed_date = ?feed_date,
            currencies = currencies.len(),
            "Synchronizing exchange rates"
        );

        let mut outcomes = Vec::with_capacity(currencies.len());
        for mut currency in currencies {
            let result = self.update_exchange_rate(&mut currency, Some(&feed)).await;
            if let Err(e) = &result {
                warn!(
                    currency = %currency.title,
                    error = %e,
                    "Failed to update exchange rate"
                );
            }
            outcomes.push(CurrencyOutcome { currency, result });
        }

        let report = SyncReport {
            feed_date,
            outcomes,
        };
        info!(
            updated = report.updated(),
            failed = report.failures().count(),
            "Exchange rate sync finished"
        );
        Ok(report)
    }
}
