use anyhow::{anyhow, Result};
use std::path::PathBuf;
use std::time::Duration;

use crate::edgar::report::ReportType;

#[derive(Clone, Debug)]
pub struct ProspectorConfig {
    pub openai_key: String,
    pub model: String,
    pub user_agent: String,
    pub data_dir: PathBuf,
    pub report_type: ReportType,
    pub feed_count: usize,
    pub request_delay: Duration,
}

impl ProspectorConfig {
    pub fn from_env() -> Result<Self> {
        let openai_key = std::env::var("OPENAI_KEY")
            .map_err(|_| anyhow!("OPENAI_KEY environment variable not set"))?;

        let model = std::env::var("PROSPECTOR_MODEL")
            .unwrap_or_else(|_| "gpt-4o-mini".to_string());

        // SEC requires a contact string in the User-Agent header.
        let user_agent = std::env::var("SEC_USER_AGENT")
            .unwrap_or_else(|_| "prospector (software@example.com)".to_string());

        let data_dir = PathBuf::from(
            std::env::var("PROSPECTOR_DATA_DIR")
                .unwrap_or_else(|_| crate::utils::dirs::EDGAR_DIR.to_string()),
        );

        let report_type = match std::env::var("PROSPECTOR_REPORT_TYPE") {
            Ok(s) => s
                .parse::<ReportType>()
                .map_err(|e| anyhow!("PROSPECTOR_REPORT_TYPE: {}", e))?,
            Err(_) => ReportType::Form8K,
        };

        let feed_count = match std::env::var("PROSPECTOR_FEED_COUNT") {
            Ok(s) => s
                .parse::<usize>()
                .map_err(|_| anyhow!("PROSPECTOR_FEED_COUNT must be a number: {}", s))?,
            Err(_) => 100,
        };

        let request_delay = match std::env::var("PROSPECTOR_REQUEST_DELAY_MS") {
            Ok(s) => {
                let ms = s
                    .parse::<u64>()
                    .map_err(|_| anyhow!("PROSPECTOR_REQUEST_DELAY_MS must be a number: {}", s))?;
                Duration::from_millis(ms)
            }
            Err(_) => Duration::from_secs(1),
        };

        Ok(Self {
            openai_key,
            model,
            user_agent,
            data_dir,
            report_type,
            feed_count,
            request_delay,
        })
    }

    pub fn ticker_cache_path(&self) -> PathBuf {
        self.data_dir.join("company_tickers.json")
    }
}
