//! Error types for the synchronization engine.

use reqwest::StatusCode;
use rust_decimal::Decimal;
use thiserror::Error;

/// Failure to obtain the raw feed from upstream.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Upstream answered with a non-success status.
    #[error("HTTP error: {status} for {target}")]
    Status { status: StatusCode, target: String },

    /// The request never produced a response (DNS, timeout, connection reset).
    #[error("Failed to send request to {target}")]
    Transport {
        target: String,
        #[source]
        source: reqwest::Error,
    },
}

impl FetchError {
    pub fn target(&self) -> &str {
        match self {
            FetchError::Status { target, .. } | FetchError::Transport { target, .. } => target,
        }
    }
}

/// Failure reported by a [`CurrencyStore`](crate::core::CurrencyStore).
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Unknown currency id: {0}")]
    UnknownCurrency(u32),

    #[error("Storage error: {0}")]
    Backend(#[from] fjall::Error),

    #[error("Failed to (de)serialize currency record: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors raised while fetching, parsing, resolving or persisting a rate.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// A data row could not be split into five typed fields.
    #[error("Malformed feed row '{line}': {reason}")]
    MalformedRow { line: String, reason: String },

    /// No feed row matches the currency by title or code.
    #[error("No exchange rate found for {code} ({title})")]
    RateNotFound { code: String, title: String },

    /// The matching row's lot size is zero or negative, so no per-unit rate exists.
    #[error("Feed row for {code} has a non-positive amount: {amount}")]
    NonPositiveLotSize { code: String, amount: Decimal },

    /// Dividing the row's rate by its lot size does not fit a decimal.
    #[error("Per-unit rate for {code} overflows ({rate} / {amount})")]
    RateOverflow {
        code: String,
        rate: Decimal,
        amount: Decimal,
    },

    #[error("Failed to persist currency: {0}")]
    Persistence(#[from] StoreError),
}

pub type SyncResult<T> = Result<T, SyncError>;
