//! Exchange rate payloads as returned by the bank, and their filtered form

use crate::core::date_key::DateKey;
use crate::core::provider::FetchError;
use serde::de::Error as _;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt::Display;

/// A rate as the API reports it. Usually a number, occasionally a string.
/// Numbers keep their JSON form, so `43` stays `43` and `43.10` stays a float.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RateValue {
    Number(serde_json::Number),
    Text(String),
}

impl Display for RateValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RateValue::Number(n) => write!(f, "{n}"),
            RateValue::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<f64> for RateValue {
    /// Non-finite values have no JSON number form and become text.
    fn from(value: f64) -> Self {
        serde_json::Number::from_f64(value)
            .map_or_else(|| RateValue::Text(value.to_string()), RateValue::Number)
    }
}

impl From<u64> for RateValue {
    fn from(value: u64) -> Self {
        RateValue::Number(value.into())
    }
}

/// One entry of a day's `exchangeRate` list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyRateRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sale_rate: Option<RateValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_rate: Option<RateValue>,
    #[serde(
        rename = "saleRateNB",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub sale_rate_nb: Option<RateValue>,
    #[serde(
        rename = "purchaseRateNB",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub purchase_rate_nb: Option<RateValue>,
}

impl CurrencyRateRecord {
    /// Commercial sale rate, falling back to the National Bank one.
    pub fn sale(&self) -> Option<&RateValue> {
        self.sale_rate.as_ref().or(self.sale_rate_nb.as_ref())
    }

    /// Commercial purchase rate, falling back to the National Bank one.
    pub fn purchase(&self) -> Option<&RateValue> {
        self.purchase_rate.as_ref().or(self.purchase_rate_nb.as_ref())
    }
}

/// Body of a single-day response. Fields are optional so that a partial
/// payload still parses; the filter decides what to do with it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDayPayload {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_currency_lit: Option<String>,
    #[serde(default)]
    pub exchange_rate: Option<Vec<CurrencyRateRecord>>,
}

/// Currencies kept by the filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Eur,
    Usd,
}

impl Currency {
    pub fn from_code(code: &str) -> Option<Currency> {
        match code {
            "EUR" => Some(Currency::Eur),
            "USD" => Some(Currency::Usd),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Currency::Eur => "EUR",
            Currency::Usd => "USD",
        }
    }
}

impl Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatePair {
    pub sale: RateValue,
    pub purchase: RateValue,
}

/// Rates for one day, serialized as `{"<date>": {"EUR": {...}, "USD": {...}}}`.
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredDayEntry {
    pub date: String,
    pub rates: BTreeMap<Currency, RatePair>,
}

impl Serialize for FilteredDayEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.date, &self.rates)?;
        map.end()
    }
}

impl<'de> Deserialize<'de> for FilteredDayEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let map = BTreeMap::<String, BTreeMap<Currency, RatePair>>::deserialize(deserializer)?;
        let mut entries = map.into_iter();
        match (entries.next(), entries.next()) {
            (Some((date, rates)), None) => Ok(FilteredDayEntry { date, rates }),
            _ => Err(D::Error::custom(
                "expected an object with exactly one date key",
            )),
        }
    }
}

/// Days with EUR/USD data, newest first. Failed or empty days are absent.
pub type FilteredResult = Vec<FilteredDayEntry>;

/// What a single-day request ended with.
#[derive(Debug)]
pub enum DayOutcome {
    Fetched {
        date: DateKey,
        payload: RawDayPayload,
    },
    Failed {
        date: DateKey,
        error: FetchError,
    },
}

impl DayOutcome {
    pub fn date(&self) -> &DateKey {
        match self {
            DayOutcome::Fetched { date, .. } | DayOutcome::Failed { date, .. } => date,
        }
    }

    pub fn payload(&self) -> Option<&RawDayPayload> {
        match self {
            DayOutcome::Fetched { payload, .. } => Some(payload),
            DayOutcome::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&FetchError> {
        match self {
            DayOutcome::Fetched { .. } => None,
            DayOutcome::Failed { error, .. } => Some(error),
        }
    }
}
