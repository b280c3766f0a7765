use anyhow::Result;
use mime::Mime;
use reqwest::Client;
use std::path::Path;
use url::Url;

/// Status-checked GET returning the response body as text.
pub async fn fetch_text(
    client: &Client,
    url: &Url,
    user_agent: &str,
    accept: &Mime,
) -> Result<String> {
    log::debug!("Fetching URL: {}", url);

    let response = client
        .get(url.as_str())
        .header(reqwest::header::USER_AGENT, user_agent)
        .header(reqwest::header::ACCEPT, accept.as_ref())
        .send()
        .await?;

    log::debug!("Response status: {}", response.status());

    if !response.status().is_success() {
        return Err(anyhow::anyhow!(
            "HTTP request failed with status: {}",
            response.status()
        ));
    }

    let content = response.text().await?;
    log::debug!("Received content length: {}", content.len());

    Ok(content)
}

/// Fetch a URL and persist the raw body to `filepath`, returning the body.
/// Used for snapshots that later runs read back without refetching.
pub async fn fetch_and_save(
    client: &Client,
    url: &Url,
    filepath: &Path,
    user_agent: &str,
    accept: &Mime,
) -> Result<String> {
    let content = fetch_text(client, url, user_agent, accept).await?;

    if let Some(parent) = filepath.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(filepath, &content)?;
    log::debug!("Saved content to {:?}", filepath);

    Ok(content)
}
