//! Fans out one request per day and waits for all of them to settle.

use crate::core::config::MAX_DAYS;
use crate::core::{DateKey, DayOutcome, RateProvider};
use chrono::{Local, NaiveDate};
use futures::future::join_all;
use tracing::{debug, info, warn};

pub struct ExchangeRateFetcher<P> {
    provider: P,
    max_days: usize,
}

impl<P: RateProvider> ExchangeRateFetcher<P> {
    pub fn new(provider: P) -> Self {
        ExchangeRateFetcher {
            provider,
            max_days: MAX_DAYS,
        }
    }

    pub fn with_max_days(mut self, max_days: usize) -> Self {
        self.max_days = max_days;
        self
    }

    /// Dates for the last `n` days ending at `today`, capped at `max_days`.
    pub fn dates_for(&self, today: NaiveDate, n: i64) -> Vec<DateKey> {
        let cap = i64::try_from(self.max_days).unwrap_or(i64::MAX);
        DateKey::last_n_days(today, n.min(cap))
    }

    /// Requests every date at once. Outcomes are in the order of `dates`;
    /// a failed day never cancels or fails the others.
    pub async fn fetch_days(
        &self,
        dates: &[DateKey],
        on_settled: &(dyn Fn() + Send + Sync),
    ) -> Vec<DayOutcome> {
        info!(days = dates.len(), "Fetching exchange rates");

        let futures = dates.iter().map(|date| async move {
            let outcome = match self.provider.fetch_day(date).await {
                Ok(payload) => DayOutcome::Fetched {
                    date: *date,
                    payload,
                },
                Err(error) => {
                    warn!(%date, error = %error, "Failed to fetch exchange rates");
                    DayOutcome::Failed { date: *date, error }
                }
            };
            on_settled();
            outcome
        });
        let outcomes = join_all(futures).await;

        let failed = outcomes.iter().filter(|o| o.error().is_some()).count();
        debug!(fetched = outcomes.len() - failed, failed, "All requests settled");
        outcomes
    }

    pub async fn fetch_last_n_days(&self, n: i64) -> Vec<DayOutcome> {
        self.fetch_last_n_days_from(Local::now().date_naive(), n).await
    }

    pub async fn fetch_last_n_days_from(&self, today: NaiveDate, n: i64) -> Vec<DayOutcome> {
        let dates = self.dates_for(today, n);
        self.fetch_days(&dates, &|| ()).await
    }
}
