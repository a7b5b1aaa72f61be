//! Core domain types and ambient plumbing

pub mod config;
pub mod currency;
pub mod error;
pub mod log;

// Re-export main types for cleaner imports
pub use currency::{BASE_CURRENCY_CODE, BASE_CURRENCY_SYMBOL, Currency, CurrencyStore};
pub use error::{FetchError, StoreError, SyncError};
