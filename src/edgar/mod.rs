pub mod feed;
pub mod filing;
pub mod report;
pub mod text;
pub mod tickers;

pub const EDGAR_BASE_URL: &str = "https://www.sec.gov";
