use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::core::{DateKey, FetchError, RateProvider, RawDayPayload};

const USER_AGENT: &str = concat!("pbrates/", env!("CARGO_PKG_VERSION"));

/// Daily archive rates from the PrivatBank public API.
pub struct PrivatBankProvider {
    base_url: String,
}

impl PrivatBankProvider {
    pub fn new(base_url: &str) -> Self {
        PrivatBankProvider {
            base_url: base_url.to_string(),
        }
    }

    pub fn url_for(&self, date: &DateKey) -> String {
        format!("{}?date={}", self.base_url, date)
    }
}

#[async_trait]
impl RateProvider for PrivatBankProvider {
    #[instrument(name = "PrivatBankFetch", skip(self), fields(date = %date))]
    async fn fetch_day(&self, date: &DateKey) -> Result<RawDayPayload, FetchError> {
        let url = self.url_for(date);
        let connection_error = |e: reqwest::Error| FetchError::Connection {
            url: url.clone(),
            reason: e.to_string(),
        };
        debug!("Requesting exchange rates from {}", url);

        // One client per request; its connection pool is dropped on return.
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(connection_error)?;
        let response = client.get(&url).send().await.map_err(connection_error)?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(FetchError::HttpStatus {
                url,
                status: status.as_u16(),
            });
        }

        let text = response.text().await.map_err(connection_error)?;
        let payload: RawDayPayload =
            serde_json::from_str(&text).map_err(|e| FetchError::MalformedPayload {
                url: url.clone(),
                reason: e.to_string(),
            })?;

        debug!(
            records = payload.exchange_rate.as_ref().map_or(0, Vec::len),
            "Received exchange rates"
        );
        Ok(payload)
    }
}
