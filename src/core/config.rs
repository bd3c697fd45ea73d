use tracing::debug;

pub const PRIVATBANK_BASE_URL: &str = "https://api.privatbank.ua/p24api/exchange_rates";

/// Upper bound on how many days a single run fetches.
pub const MAX_DAYS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrivatBankProviderConfig {
    pub base_url: String,
}

impl Default for PrivatBankProviderConfig {
    fn default() -> Self {
        PrivatBankProviderConfig {
            base_url: PRIVATBANK_BASE_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub provider: PrivatBankProviderConfig,
    pub max_days: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            provider: PrivatBankProviderConfig::default(),
            max_days: MAX_DAYS,
        }
    }
}

impl AppConfig {
    /// Same defaults, pointed at another rate endpoint.
    pub fn with_base_url(base_url: &str) -> Self {
        debug!(base_url, "Overriding rate endpoint");
        AppConfig {
            provider: PrivatBankProviderConfig {
                base_url: base_url.to_string(),
            },
            ..Default::default()
        }
    }
}
