use anyhow::{anyhow, Result};
use mime::APPLICATION_JSON;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use url::Url;

use crate::core::config::ProspectorConfig;
use crate::utils::http;

const TICKER_URL: &str = "https://www.sec.gov/files/company_tickers.json";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ticker(String);

impl Ticker {
    pub fn new(ticker: &str) -> Result<Self> {
        let uppercase_ticker = ticker.trim().to_uppercase();
        if uppercase_ticker.is_empty() {
            return Err(anyhow!("Ticker cannot be empty"));
        }
        if !uppercase_ticker
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-')
        {
            return Err(anyhow!(
                "Ticker must contain only alphanumeric characters or hyphens: {}",
                ticker
            ));
        }
        Ok(Ticker(uppercase_ticker))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Ticker {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Ticker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Deserialize)]
struct RegistryEntry {
    cik_str: u64,
    ticker: String,
}

/// Uppercase ticker -> zero-padded 10-digit CIK, built once per run from the
/// SEC company_tickers.json registry. The raw registry body is cached on disk
/// and reused on later runs without expiry.
#[derive(Debug, Clone, Default)]
pub struct TickerMap {
    ticker_to_cik: HashMap<String, String>,
}

impl TickerMap {
    /// Load the registry snapshot, preferring the local cache file. A fetch
    /// or parse failure degrades to an empty map: every ticker then resolves
    /// to `None` and the run continues.
    pub async fn load(client: &Client, config: &ProspectorConfig) -> Self {
        match Self::load_inner(client, config).await {
            Ok(map) => {
                log::debug!("Loaded {} ticker entries", map.ticker_to_cik.len());
                map
            }
            Err(e) => {
                log::error!("Error fetching ticker to CIK mapping: {}", e);
                Self::default()
            }
        }
    }

    async fn load_inner(client: &Client, config: &ProspectorConfig) -> Result<Self> {
        let path = config.ticker_cache_path();
        log::debug!("Checking for existing tickers file at {:?}", path);

        let json_string = if path.exists() {
            log::debug!("Using existing tickers file");
            fs::read_to_string(&path)?
        } else {
            log::debug!("Tickers file not found, downloading from SEC");
            let url = Url::parse(TICKER_URL)?;
            http::fetch_and_save(client, &url, &path, &config.user_agent, &APPLICATION_JSON)
                .await?
        };

        Self::from_registry_json(&json_string)
    }

    fn from_registry_json(json_string: &str) -> Result<Self> {
        let entries: HashMap<String, RegistryEntry> = serde_json::from_str(json_string)?;

        let ticker_to_cik = entries
            .values()
            .map(|entry| {
                (
                    entry.ticker.trim().to_uppercase(),
                    format!("{:010}", entry.cik_str),
                )
            })
            .collect();

        Ok(Self { ticker_to_cik })
    }

    /// Case-insensitive lookup. Unknown tickers yield `None`.
    pub fn resolve(&self, ticker: &str) -> Option<&str> {
        self.ticker_to_cik
            .get(&ticker.trim().to_uppercase())
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.ticker_to_cik.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ticker_to_cik.is_empty()
    }
}
