//! Reduces raw day payloads to EUR/USD sale and purchase rates

use crate::core::rates::{
    Currency, DayOutcome, FilteredDayEntry, FilteredResult, RatePair, RawDayPayload,
};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Keeps EUR and USD rates for every fetched day that has them, in input order.
/// Failed days, malformed payloads and days without EUR/USD are omitted.
pub fn filter_exchange_rates(outcomes: &[DayOutcome]) -> FilteredResult {
    outcomes
        .iter()
        .filter_map(DayOutcome::payload)
        .filter_map(filter_day)
        .collect()
}

/// Filters a single day. Returns `None` if nothing qualifies.
pub fn filter_day(payload: &RawDayPayload) -> Option<FilteredDayEntry> {
    let (Some(date), Some(records)) = (&payload.date, &payload.exchange_rate) else {
        warn!(payload = ?payload, "Skipping payload without date or exchangeRate");
        return None;
    };

    let mut rates = BTreeMap::new();
    for record in records {
        let Some(currency) = record.currency.as_deref().and_then(Currency::from_code) else {
            continue;
        };

        match (record.sale(), record.purchase()) {
            (Some(sale), Some(purchase)) => {
                rates.insert(
                    currency,
                    RatePair {
                        sale: sale.clone(),
                        purchase: purchase.clone(),
                    },
                );
            }
            _ => warn!(%date, %currency, "Skipping record without sale or purchase rate"),
        }
    }

    if rates.is_empty() {
        debug!(%date, "No EUR/USD rates for day");
        return None;
    }

    Some(FilteredDayEntry {
        date: date.clone(),
        rates,
    })
}
