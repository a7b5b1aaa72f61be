use super::ui;
use crate::core::currency::CurrencyStore;
use crate::sync::{RateSyncService, SyncReport, UpdateOutcome};
use anyhow::{Result, bail};
use comfy_table::Cell;

impl SyncReport {
    pub fn display_as_table(&self) -> String {
        let mut table = ui::new_styled_table();
        table.set_header(vec![
            ui::header_cell("Code"),
            ui::header_cell("Currency"),
            ui::header_cell("Previous"),
            ui::header_cell("Rate (CZK)"),
            ui::header_cell("Status"),
        ]);

        for outcome in &self.outcomes {
            let currency = &outcome.currency;
            let (previous, current, status) = match &outcome.result {
                Ok(UpdateOutcome::BaseCurrency) => (
                    ui::rate_cell(None),
                    ui::rate_cell(Some(rust_decimal::Decimal::ONE)),
                    Cell::new("base"),
                ),
                Ok(UpdateOutcome::Updated { previous, current }) => (
                    ui::rate_cell(*previous),
                    ui::rate_cell(Some(*current)),
                    ui::ok_cell("updated"),
                ),
                Err(e) => (
                    ui::rate_cell(currency.exchange_rate_to_base),
                    ui::rate_cell(None),
                    ui::error_cell(&e.to_string()),
                ),
            };
            table.add_row(vec![
                Cell::new(&currency.code),
                Cell::new(&currency.title),
                previous,
                current,
                status,
            ]);
        }

        let feed_date = self
            .feed_date
            .map_or("unknown date".to_string(), |d| d.format("%d.%m.%Y").to_string());
        let failed = self.failures().count();
        let summary = format!("{} updated, {} failed", self.updated(), failed);
        let summary = if failed == 0 {
            ui::style_text(&summary, ui::StyleType::Success)
        } else {
            ui::style_text(&summary, ui::StyleType::Error)
        };

        format!(
            "Exchange rates for {}\n\n{}\n\n{}",
            ui::style_text(&feed_date, ui::StyleType::Title),
            table,
            summary
        )
    }
}

/// Full sync. Individual currency failures are part of the report, not an error.
pub async fn sync_all(service: &RateSyncService) -> Result<String> {
    let report = service.update_all_exchange_rates().await?;
    Ok(report.display_as_table())
}

/// Updates a single stored currency from today's feed.
pub async fn update_one(
    service: &RateSyncService,
    store: &dyn CurrencyStore,
    code: &str,
) -> Result<String> {
    let Some(mut currency) = super::find_currency(store, code).await? else {
        bail!("Unknown currency: {code}");
    };

    let message = match service.update_exchange_rate(&mut currency, None).await? {
        UpdateOutcome::BaseCurrency => format!(
            "{} is the base currency, its rate is always 1",
            currency.code
        ),
        UpdateOutcome::Updated { previous, current } => format!(
            "{} ({}): {} -> {}",
            currency.code,
            currency.title,
            previous.map_or("N/A".to_string(), |p| p.normalize().to_string()),
            current.normalize()
        ),
    };
    Ok(message)
}
