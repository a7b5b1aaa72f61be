//! Currency store adapters.

pub mod disk;
pub mod memory;

pub use disk::DiskCurrencyStore;
pub use memory::MemoryCurrencyStore;

use crate::core::currency::{Currency, CurrencyStore};
use crate::core::error::StoreError;
use tracing::info;

/// Inserts configured currencies the store does not know yet. Existing records, and
/// their rates, are left alone. Returns how many were added.
pub async fn seed_currencies(
    store: &dyn CurrencyStore,
    currencies: &[Currency],
) -> Result<usize, StoreError> {
    let mut added = 0;
    for currency in currencies {
        if store.insert_if_missing(currency).await? {
            info!(code = %currency.code, id = currency.id, "Seeded currency");
            added += 1;
        }
    }
    Ok(added)
}
