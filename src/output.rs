use anyhow::Result;
use chrono::Local;
use csv::WriterBuilder;
use std::fs::File;
use std::path::{Path, PathBuf};

use crate::edgar::feed::FilingRecord;
use crate::edgar::tickers::Ticker;
use crate::llm::ProductInfo;

pub const OUTPUT_HEADER: [&str; 5] = [
    "company_name",
    "stock_name",
    "filing_time",
    "new_product",
    "product_description",
];

/// One successfully extracted announcement: the filing's metadata merged
/// with the model's record and the originating ticker.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputRow {
    pub company_name: String,
    pub stock_name: String,
    pub filing_time: String,
    pub new_product: String,
    pub product_description: String,
}

impl OutputRow {
    pub fn assemble(ticker: &Ticker, filing: &FilingRecord, info: ProductInfo) -> Self {
        Self {
            company_name: info.company_name,
            stock_name: ticker.as_str().to_string(),
            filing_time: filing.filing_time.clone(),
            new_product: info.new_product,
            product_description: info.product_description,
        }
    }
}

/// `product_announcements_<YYYY-MM-DD>.csv` in the working directory.
pub fn default_output_path() -> PathBuf {
    PathBuf::from(format!(
        "product_announcements_{}.csv",
        Local::now().format("%Y-%m-%d")
    ))
}

/// Write the header and one record per row, in accumulation order,
/// overwriting anything already at `path`.
pub fn write_rows(rows: &[OutputRow], path: &Path) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);

    writer.write_record(OUTPUT_HEADER)?;
    for row in rows {
        writer.write_record([
            &row.company_name,
            &row.stock_name,
            &row.filing_time,
            &row.new_product,
            &row.product_description,
        ])?;
    }
    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_path_embeds_the_date() {
        let path = default_output_path();
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("product_announcements_"));
        assert!(name.ends_with(".csv"));
    }

    #[test]
    fn empty_run_writes_header_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        write_rows(&[], &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "company_name,stock_name,filing_time,new_product,product_description\n"
        );
    }

    #[test]
    fn rows_are_written_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        let rows = vec![
            OutputRow {
                company_name: "Acme".into(),
                stock_name: "ACME".into(),
                filing_time: "2024-05-02T16:31:14-04:00".into(),
                new_product: "Widget X".into(),
                product_description: "A better widget.".into(),
            },
            OutputRow {
                company_name: "Globex".into(),
                stock_name: "GBX".into(),
                filing_time: "2024-04-01T09:00:00-04:00".into(),
                new_product: "".into(),
                product_description: "".into(),
            },
        ];
        write_rows(&rows, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[1],
            "Acme,ACME,2024-05-02T16:31:14-04:00,Widget X,A better widget."
        );
        assert_eq!(lines[2], "Globex,GBX,2024-04-01T09:00:00-04:00,,");
    }

    #[test]
    fn existing_file_is_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        std::fs::write(&path, "stale contents\nstale row\n").unwrap();

        write_rows(&[], &path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(!content.contains("stale"));
    }
}
