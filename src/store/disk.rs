use crate::core::currency::{Currency, CurrencyStore};
use crate::core::error::StoreError;
use async_trait::async_trait;
use fjall::{Config, Keyspace, PartitionCreateOptions, PartitionHandle, PersistMode};
use std::path::Path;
use tracing::debug;

const PARTITION: &str = "currencies";

/// Currency records kept in a fjall partition. Keys are big-endian ids so iteration
/// follows id order; values are JSON.
pub struct DiskCurrencyStore {
    keyspace: Keyspace,
    partition: PartitionHandle,
}

fn key(id: u32) -> Vec<u8> {
    id.to_be_bytes().to_vec()
}

impl DiskCurrencyStore {
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let keyspace = Config::new(path).open()?;
        let partition = keyspace.open_partition(PARTITION, PartitionCreateOptions::default())?;
        debug!("Opened currency store at {}", path.display());
        Ok(Self {
            keyspace,
            partition,
        })
    }

    fn write(&self, currency: &Currency) -> Result<(), StoreError> {
        self.partition
            .insert(key(currency.id), serde_json::to_vec(currency)?)?;
        self.keyspace.persist(PersistMode::SyncAll)?;
        Ok(())
    }
}

#[async_trait]
impl CurrencyStore for DiskCurrencyStore {
    async fn list(&self) -> Result<Vec<Currency>, StoreError> {
        self.partition
            .iter()
            .map(|item| -> Result<Currency, StoreError> {
                let (_, value) = item?;
                Ok(serde_json::from_slice(&value)?)
            })
            .collect()
    }

    async fn save(&self, currency: &Currency) -> Result<(), StoreError> {
        if !self.partition.contains_key(key(currency.id))? {
            return Err(StoreError::UnknownCurrency(currency.id));
        }
        self.write(currency)?;
        debug!(id = currency.id, "Currency saved");
        Ok(())
    }

    async fn insert_if_missing(&self, currency: &Currency) -> Result<bool, StoreError> {
        if self.partition.contains_key(key(currency.id))? {
            return Ok(false);
        }
        self.write(currency)?;
        Ok(true)
    }
}
