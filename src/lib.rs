pub mod cli;
pub mod core;
pub mod fetcher;
pub mod providers;

use crate::core::config::AppConfig;
use crate::core::{DateKey, DayOutcome, FilteredResult, filter_exchange_rates};
use crate::fetcher::ExchangeRateFetcher;
use crate::providers::PrivatBankProvider;
use anyhow::Result;
use chrono::Local;
use tracing::{debug, info};

pub fn rate_fetcher(config: &AppConfig) -> ExchangeRateFetcher<PrivatBankProvider> {
    debug!("Using config: {config:#?}");
    let provider = PrivatBankProvider::new(&config.provider.base_url);
    ExchangeRateFetcher::new(provider).with_max_days(config.max_days)
}

/// Fetches `dates` and keeps their EUR/USD rates. Raw outcomes are returned
/// alongside so callers can report failed days.
pub async fn collect_rates(
    fetcher: &ExchangeRateFetcher<PrivatBankProvider>,
    dates: &[DateKey],
    on_settled: &(dyn Fn() + Send + Sync),
) -> (Vec<DayOutcome>, FilteredResult) {
    let outcomes = fetcher.fetch_days(dates, on_settled).await;
    let rates = filter_exchange_rates(&outcomes);
    (outcomes, rates)
}

/// Fetches the last `days` days (capped) and keeps their EUR/USD rates.
pub async fn fetch_rates(days: i64, config: &AppConfig) -> FilteredResult {
    let fetcher = rate_fetcher(config);
    let dates = fetcher.dates_for(Local::now().date_naive(), days);
    let (_, rates) = collect_rates(&fetcher, &dates, &|| ()).await;
    rates
}

/// Runs the CLI command: fetch, filter and print as JSON.
pub async fn run_command(days: i64, config: &AppConfig) -> Result<()> {
    info!("Exchange rates starting...");
    cli::rates::run(days, config).await
}
