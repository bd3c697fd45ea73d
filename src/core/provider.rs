//! Exchange rate source abstractions

use crate::core::date_key::DateKey;
use crate::core::rates::RawDayPayload;
use async_trait::async_trait;
use thiserror::Error;

/// Why a single-day request produced no payload.
#[derive(Debug, Error)]
pub enum FetchError {
    /// DNS, refused connection, bad URL, broken body stream.
    #[error("Connection error: {url}: {reason}")]
    Connection { url: String, reason: String },

    #[error("Error status: {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    /// A 200 response whose body is not a day payload.
    #[error("Malformed payload for {url}: {reason}")]
    MalformedPayload { url: String, reason: String },
}

impl FetchError {
    pub fn url(&self) -> &str {
        match self {
            FetchError::Connection { url, .. }
            | FetchError::HttpStatus { url, .. }
            | FetchError::MalformedPayload { url, .. } => url,
        }
    }
}

#[async_trait]
pub trait RateProvider: Send + Sync {
    async fn fetch_day(&self, date: &DateKey) -> Result<RawDayPayload, FetchError>;
}
