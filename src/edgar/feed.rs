use anyhow::{anyhow, Result};
use mime::TEXT_XML;
use quick_xml::events::Event;
use quick_xml::Reader;
use reqwest::Client;
use url::Url;

use crate::core::config::ProspectorConfig;
use crate::utils::http;

const BROWSE_URL: &str = "https://www.sec.gov/cgi-bin/browse-edgar";

/// One filing as advertised by the EDGAR browse feed. `link` points at the
/// filing's landing page, not at the document itself.
#[derive(Debug, Clone, PartialEq)]
pub struct FilingRecord {
    pub title: String,
    pub link: String,
    pub filing_time: String,
}

/// Query the browse feed for a company's recent filings of the configured
/// report type. Request and parse failures are logged and yield an empty
/// list; the caller moves on to the next ticker.
pub async fn list_filings(
    client: &Client,
    config: &ProspectorConfig,
    cik: &str,
) -> Vec<FilingRecord> {
    match list_filings_inner(client, config, cik).await {
        Ok(filings) => filings,
        Err(e) => {
            log::error!("Error fetching {} filings for CIK {}: {}", config.report_type, cik, e);
            Vec::new()
        }
    }
}

async fn list_filings_inner(
    client: &Client,
    config: &ProspectorConfig,
    cik: &str,
) -> Result<Vec<FilingRecord>> {
    let url = Url::parse_with_params(
        BROWSE_URL,
        &[
            ("action", "getcompany"),
            ("CIK", cik),
            ("type", &config.report_type.to_string()),
            ("count", &config.feed_count.to_string()),
            ("output", "atom"),
        ],
    )?;

    let xml = http::fetch_text(client, &url, &config.user_agent, &TEXT_XML).await?;
    parse_feed(&xml)
}

enum EntryField {
    Title,
    Updated,
}

/// Pull title, landing-page link and update timestamp out of each feed
/// entry, preserving feed order. Entries without a link are dropped.
pub fn parse_feed(xml: &str) -> Result<Vec<FilingRecord>> {
    let mut reader = Reader::from_str(xml);
    let mut buf = Vec::new();

    let mut records = Vec::new();
    let mut in_entry = false;
    let mut field: Option<EntryField> = None;
    let mut title = String::new();
    let mut link: Option<String> = None;
    let mut updated = String::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => match e.name().as_ref() {
                b"entry" => {
                    in_entry = true;
                    title.clear();
                    updated.clear();
                    link = None;
                }
                b"title" if in_entry => field = Some(EntryField::Title),
                b"updated" if in_entry => field = Some(EntryField::Updated),
                b"link" if in_entry => link = link.or(link_href(e)?),
                _ => field = None,
            },
            // Atom link elements are usually self-closing
            Ok(Event::Empty(ref e)) if in_entry && e.name().as_ref() == b"link" => {
                link = link.or(link_href(e)?);
            }
            Ok(Event::Text(e)) => {
                if let Some(ref f) = field {
                    let text = e.unescape()?;
                    match f {
                        EntryField::Title => title.push_str(&text),
                        EntryField::Updated => updated.push_str(&text),
                    }
                }
            }
            Ok(Event::End(ref e)) => match e.name().as_ref() {
                b"entry" => {
                    in_entry = false;
                    match link.take() {
                        Some(href) => records.push(FilingRecord {
                            title: title.trim().to_string(),
                            link: href,
                            filing_time: updated.trim().to_string(),
                        }),
                        None => log::warn!("Feed entry without a link: {}", title.trim()),
                    }
                }
                _ => field = None,
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(anyhow!(
                    "Feed parse error at position {}: {}",
                    reader.buffer_position(),
                    e
                ))
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(records)
}

fn link_href(e: &quick_xml::events::BytesStart) -> Result<Option<String>> {
    for attr in e.attributes() {
        let attr = attr?;
        if attr.key.as_ref() == b"href" {
            return Ok(Some(std::str::from_utf8(&attr.value)?.to_string()));
        }
    }
    Ok(None)
}
