//! Calendar dates in the form the exchange rate API expects

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

const DATE_KEY_FORMAT: &str = "%d.%m.%Y";

/// A calendar date rendered as `DD.MM.YYYY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct DateKey(NaiveDate);

impl DateKey {
    pub fn new(date: NaiveDate) -> Self {
        DateKey(date)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// Dates from `today` going back, newest first. Non-positive `n` yields nothing.
    pub fn last_n_days(today: NaiveDate, n: i64) -> Vec<DateKey> {
        (0..n.max(0))
            .map(|i| DateKey(today - Duration::days(i)))
            .collect()
    }
}

impl From<NaiveDate> for DateKey {
    fn from(date: NaiveDate) -> Self {
        DateKey(date)
    }
}

impl Display for DateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(DATE_KEY_FORMAT))
    }
}

impl FromStr for DateKey {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s, DATE_KEY_FORMAT)
            .map(DateKey)
            .map_err(|e| anyhow::anyhow!("Invalid date key '{}': {}", s, e))
    }
}
