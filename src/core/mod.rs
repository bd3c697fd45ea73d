//! Core business logic abstractions

pub mod config;
pub mod date_key;
pub mod filter;
pub mod log;
pub mod provider;
pub mod rates;

// Re-export main types for cleaner imports
pub use date_key::DateKey;
pub use filter::{filter_day, filter_exchange_rates};
pub use provider::{FetchError, RateProvider};
pub use rates::{
    Currency, CurrencyRateRecord, DayOutcome, FilteredDayEntry, FilteredResult, RatePair,
    RateValue, RawDayPayload,
};
