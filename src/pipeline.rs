use anyhow::Result;
use reqwest::Client;
use std::time::Duration;

use crate::core::config::ProspectorConfig;
use crate::edgar::feed;
use crate::edgar::filing;
use crate::edgar::tickers::{Ticker, TickerMap};
use crate::llm::ProductExtractor;
use crate::output::OutputRow;
use crate::utils::dirs;

/// Owns everything a run needs: the HTTP client, the resolved ticker
/// registry, and the model handle. Built once, then driven over a ticker
/// list. A single failed ticker or filing never aborts the run.
pub struct Pipeline {
    config: ProspectorConfig,
    client: Client,
    tickers: TickerMap,
    extractor: ProductExtractor,
}

impl Pipeline {
    pub async fn new(config: ProspectorConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        dirs::ensure_dir(&config.data_dir)?;

        let tickers = TickerMap::load(&client, &config).await;
        if tickers.is_empty() {
            log::warn!("Ticker registry is empty; every ticker will be skipped");
        }

        let extractor = ProductExtractor::new(&config);

        Ok(Self {
            config,
            client,
            tickers,
            extractor,
        })
    }

    /// Process tickers in the order given, filings in feed order. Skips are
    /// logged and move on; rows accumulate across all tickers and are only
    /// returned once the whole list has been processed.
    pub async fn run(&self, tickers: &[Ticker]) -> Vec<OutputRow> {
        let mut rows = Vec::new();

        for ticker in tickers {
            log::info!("Processing {}...", ticker);

            let cik = match self.tickers.resolve(ticker.as_str()) {
                Some(cik) => cik,
                None => {
                    log::warn!("CIK not found for {}. Skipping.", ticker);
                    continue;
                }
            };

            let filings = feed::list_filings(&self.client, &self.config, cik).await;
            if filings.is_empty() {
                log::info!(
                    "No {} filings found for {}",
                    self.config.report_type,
                    ticker
                );
                continue;
            }
            log::info!("Found {} filings for {}", filings.len(), ticker);

            for record in &filings {
                let text = filing::extract_text(&self.client, &self.config, &record.link).await;
                if text.is_empty() {
                    log::warn!("Empty filing text for {}", record.link);
                    continue;
                }

                let info = match self.extractor.extract(&text).await {
                    Some(info) => info,
                    None => {
                        log::warn!("No product info extracted from {}", record.link);
                        continue;
                    }
                };

                log::info!("Extracted: {:?}", info);
                rows.push(OutputRow::assemble(ticker, record, info));

                // Fixed pause between filings so the source isn't hammered
                tokio::time::sleep(self.config.request_delay).await;
            }
        }

        rows
    }
}
