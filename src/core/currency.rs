//! Currency records and the persistence seam

use crate::core::error::StoreError;
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Short code of the currency every feed rate is quoted against.
pub const BASE_CURRENCY_CODE: &str = "CZK";
pub const BASE_CURRENCY_SYMBOL: &str = "Kč";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Currency {
    pub id: u32,
    pub title: String,
    pub code: String,
    pub symbol: String,
    /// Value of one unit in the base currency. `None` until the first successful sync.
    #[serde(default)]
    pub exchange_rate_to_base: Option<Decimal>,
}

impl Currency {
    pub fn new(id: u32, title: &str, code: &str, symbol: &str) -> Self {
        Self {
            id,
            title: title.to_string(),
            code: code.to_string(),
            symbol: symbol.to_string(),
            exchange_rate_to_base: None,
        }
    }

    /// True for the base currency, which always converts at exactly 1.
    pub fn is_base(&self) -> bool {
        self.code == BASE_CURRENCY_CODE || self.symbol == BASE_CURRENCY_SYMBOL
    }
}

/// Long-lived currency records. The engine only lists and saves; creation belongs to
/// whoever owns the store.
#[async_trait]
pub trait CurrencyStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Currency>, StoreError>;

    /// Persists the record. Fails with [`StoreError::UnknownCurrency`] if the id was
    /// never inserted.
    async fn save(&self, currency: &Currency) -> Result<(), StoreError>;

    /// Adds a record unless its id is already present. Returns whether it was added.
    async fn insert_if_missing(&self, currency: &Currency) -> Result<bool, StoreError>;
}
