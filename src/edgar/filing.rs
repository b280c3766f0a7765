use anyhow::Result;
use mime::TEXT_HTML;
use reqwest::Client;
use scraper::{Html, Selector};
use url::Url;

use crate::core::config::ProspectorConfig;
use crate::edgar::text::render_plain_text;
use crate::edgar::EDGAR_BASE_URL;
use crate::utils::http;

/// Outcome of scanning a filing landing page for its primary document.
#[derive(Debug, PartialEq)]
pub(crate) enum PrimaryDocument {
    Found(String),
    NoTable,
    NoQualifyingRow,
}

/// Fetch a filing's landing page, follow the first HTML document it lists,
/// and return that document's rendered text. Every failure mode (missing
/// table, no qualifying row, fetch error) is logged and yields an empty
/// string; nothing is raised to the caller.
pub async fn extract_text(client: &Client, config: &ProspectorConfig, landing_url: &str) -> String {
    match extract_text_inner(client, config, landing_url).await {
        Ok(Some(text)) => text,
        Ok(None) => String::new(),
        Err(e) => {
            log::error!("Error extracting filing text from {}: {}", landing_url, e);
            String::new()
        }
    }
}

async fn extract_text_inner(
    client: &Client,
    config: &ProspectorConfig,
    landing_url: &str,
) -> Result<Option<String>> {
    let url = Url::parse(landing_url)?;
    let landing_html = http::fetch_text(client, &url, &config.user_agent, &TEXT_HTML).await?;

    let href = match scan_landing_page(&landing_html) {
        PrimaryDocument::Found(href) => href,
        PrimaryDocument::NoTable => {
            log::warn!("No document table found in: {}", landing_url);
            return Ok(None);
        }
        PrimaryDocument::NoQualifyingRow => {
            log::warn!("No HTML document listed in: {}", landing_url);
            return Ok(None);
        }
    };

    // Document hrefs are usually relative to the EDGAR archive root
    let document_url = Url::parse(EDGAR_BASE_URL)?.join(&href)?;
    let document_html =
        http::fetch_text(client, &document_url, &config.user_agent, &TEXT_HTML).await?;

    Ok(Some(render_plain_text(&document_html)))
}

/// Locate the "Document Format Files" table and return the href of the first
/// data row whose document cell links an .htm/.html file. The table's first
/// row is a header. Only this first qualifying document is used; additional
/// exhibits are ignored.
pub(crate) fn scan_landing_page(html: &str) -> PrimaryDocument {
    let document = Html::parse_document(html);
    let table_selector =
        Selector::parse(r#"table.tableFile[summary="Document Format Files"]"#).unwrap();
    let row_selector = Selector::parse("tr").unwrap();
    let cell_selector = Selector::parse("td").unwrap();
    let anchor_selector = Selector::parse("a").unwrap();

    let table = match document.select(&table_selector).next() {
        Some(table) => table,
        None => return PrimaryDocument::NoTable,
    };

    for row in table.select(&row_selector).skip(1) {
        let cells: Vec<_> = row.select(&cell_selector).collect();
        if cells.len() < 3 {
            continue;
        }
        if let Some(anchor) = cells[2].select(&anchor_selector).next() {
            if let Some(href) = anchor.value().attr("href") {
                if href.contains(".htm") {
                    return PrimaryDocument::Found(href.to_string());
                }
            }
        }
    }

    PrimaryDocument::NoQualifyingRow
}
