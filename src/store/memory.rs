use crate::core::currency::{Currency, CurrencyStore};
use crate::core::error::StoreError;
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::Mutex;
use tracing::debug;

/// In-memory store keyed by currency id. Listing is ordered by id.
#[derive(Default)]
pub struct MemoryCurrencyStore {
    inner: Mutex<BTreeMap<u32, Currency>>,
}

impl MemoryCurrencyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_currencies(currencies: impl IntoIterator<Item = Currency>) -> Self {
        let inner = currencies.into_iter().map(|c| (c.id, c)).collect();
        Self {
            inner: Mutex::new(inner),
        }
    }

    pub async fn get(&self, id: u32) -> Option<Currency> {
        self.inner.lock().await.get(&id).cloned()
    }
}

#[async_trait]
impl CurrencyStore for MemoryCurrencyStore {
    async fn list(&self) -> Result<Vec<Currency>, StoreError> {
        Ok(self.inner.lock().await.values().cloned().collect())
    }

    async fn save(&self, currency: &Currency) -> Result<(), StoreError> {
        let mut currencies = self.inner.lock().await;
        let slot = currencies
            .get_mut(&currency.id)
            .ok_or(StoreError::UnknownCurrency(currency.id))?;
        *slot = currency.clone();
        debug!(id = currency.id, "Currency saved");
        Ok(())
    }

    async fn insert_if_missing(&self, currency: &Currency) -> Result<bool, StoreError> {
        let mut currencies = self.inner.lock().await;
        if currencies.contains_key(&currency.id) {
            return Ok(false);
        }
        currencies.insert(currency.id, currency.clone());
        Ok(true)
    }
}
