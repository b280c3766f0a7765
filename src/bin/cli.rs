use anyhow::Result;
use prospector::edgar::tickers::Ticker;
use prospector::{output, Pipeline, ProspectorConfig};
use std::path::PathBuf;
use structopt::StructOpt;

const DEFAULT_TICKERS: [&str; 3] = ["AAPL", "MSFT", "GOOGL"];

#[derive(Debug, StructOpt)]
#[structopt(
    name = "prospector",
    about = "Scan recent SEC filings for new-product announcements"
)]
struct Opt {
    /// Ticker symbols to scan; defaults to AAPL MSFT GOOGL
    tickers: Vec<String>,

    /// Output CSV path; defaults to product_announcements_<date>.csv
    #[structopt(long, parse(from_os_str))]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let opt = Opt::from_args();
    let config = ProspectorConfig::from_env()?;

    let tickers: Vec<Ticker> = if opt.tickers.is_empty() {
        DEFAULT_TICKERS
            .iter()
            .map(|t| Ticker::new(t))
            .collect::<Result<_>>()?
    } else {
        opt.tickers
            .iter()
            .map(|t| Ticker::new(t))
            .collect::<Result<_>>()?
    };

    let pipeline = Pipeline::new(config).await?;
    let rows = pipeline.run(&tickers).await;

    let path = opt.output.unwrap_or_else(output::default_output_path);
    output::write_rows(&rows, &path)?;
    log::info!("Extraction complete. Saved {} rows to {:?}", rows.len(), path);

    Ok(())
}
