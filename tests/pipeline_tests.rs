use prospector::edgar::feed::FilingRecord;
use prospector::edgar::report::ReportType;
use prospector::edgar::tickers::{Ticker, TickerMap};
use prospector::llm::parse::parse_product_info;
use prospector::output::{self, OutputRow};
use prospector::ProspectorConfig;
use std::path::Path;
use std::time::Duration;
use tempfile::tempdir;

fn test_config(data_dir: &Path) -> ProspectorConfig {
    ProspectorConfig {
        openai_key: "test-key".to_string(),
        model: "gpt-4o-mini".to_string(),
        user_agent: "prospector tests (test@example.com)".to_string(),
        data_dir: data_dir.to_path_buf(),
        report_type: ReportType::Form8K,
        feed_count: 100,
        request_delay: Duration::from_millis(0),
    }
}

#[tokio::test]
async fn ticker_map_loads_from_the_cache_file_without_fetching() {
    let dir = tempdir().unwrap();
    let config = test_config(dir.path());
    std::fs::write(
        config.ticker_cache_path(),
        r#"{"0": {"cik_str": 320193, "ticker": "AAPL", "title": "Apple Inc."}}"#,
    )
    .unwrap();

    let client = reqwest::Client::new();
    let map = TickerMap::load(&client, &config).await;

    assert_eq!(map.len(), 1);
    assert_eq!(map.resolve("AAPL"), Some("0000320193"));
    assert_eq!(map.resolve("MSFT"), None);
}

#[tokio::test]
async fn corrupt_cache_degrades_to_an_empty_map() {
    let dir = tempdir().unwrap();
    let config = test_config(dir.path());
    std::fs::write(config.ticker_cache_path(), "{ truncated").unwrap();

    let client = reqwest::Client::new();
    let map = TickerMap::load(&client, &config).await;

    assert!(map.is_empty());
    assert_eq!(map.resolve("AAPL"), None);
}

#[test]
fn one_filing_one_reply_yields_exactly_one_row() {
    // The deterministic tail of the pipeline: a located filing, a strict
    // JSON model reply, and the CSV that lands on disk.
    let filing = FilingRecord {
        title: "8-K - Current report".to_string(),
        link: "https://www.sec.gov/Archives/edgar/data/0000000001/index.htm".to_string(),
        filing_time: "2024-05-02T16:31:14-04:00".to_string(),
    };
    let reply =
        r#"{"company_name":"Acme","new_product":"Widget X","product_description":"A better widget."}"#;
    let info = parse_product_info(reply).unwrap();

    let ticker = Ticker::new("acme").unwrap();
    let row = OutputRow::assemble(&ticker, &filing, info);

    let dir = tempdir().unwrap();
    let path = dir.path().join("announcements.csv");
    output::write_rows(&[row], &path).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(
        content,
        "company_name,stock_name,filing_time,new_product,product_description\n\
         Acme,ACME,2024-05-02T16:31:14-04:00,Widget X,A better widget.\n"
    );
}

#[test]
fn unparseable_reply_yields_no_row() {
    assert!(parse_product_info("I could not find any product announcement.").is_none());
}
