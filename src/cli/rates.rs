use super::ui;
use crate::core::currency::{Currency, CurrencyStore};
use crate::sync::RateSyncService;
use anyhow::Result;
use chrono::NaiveDate;
use comfy_table::Cell;

/// Stored currencies and their last synchronized rates.
pub async fn list(store: &dyn CurrencyStore) -> Result<String> {
    let currencies = store.list().await?;
    if currencies.is_empty() {
        return Ok(ui::style_text("No currencies stored", ui::StyleType::Subtle));
    }

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Id"),
        ui::header_cell("Code"),
        ui::header_cell("Currency"),
        ui::header_cell("Symbol"),
        ui::header_cell("Rate (CZK)"),
    ]);
    for currency in currencies {
        let rate = if currency.is_base() {
            Some(rust_decimal::Decimal::ONE)
        } else {
            currency.exchange_rate_to_base
        };
        table.add_row(vec![
            Cell::new(currency.id),
            Cell::new(&currency.code),
            Cell::new(&currency.title),
            Cell::new(&currency.symbol),
            ui::rate_cell(rate),
        ]);
    }
    Ok(table.to_string())
}

/// Resolves a rate without storing it. Codes unknown to the store are looked up in the
/// feed by code alone.
pub async fn rate(
    service: &RateSyncService,
    store: &dyn CurrencyStore,
    code: &str,
    date: Option<NaiveDate>,
) -> Result<String> {
    let currency = match super::find_currency(store, code).await? {
        Some(currency) => currency,
        None => {
            let code = code.to_uppercase();
            Currency::new(0, &code, &code, &code)
        }
    };
    let rate = service.pick_exchange_rate(&currency, None, date).await?;
    Ok(format!("1 {} = {} CZK", currency.code, rate.normalize()))
}

/// Raw feed text, unchanged.
pub async fn fetch(service: &RateSyncService, date: Option<NaiveDate>) -> Result<String> {
    Ok(service.fetch_feed(date).await?.raw().to_string())
}
