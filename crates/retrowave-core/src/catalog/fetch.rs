//! Catalog GET over libcurl.
//!
//! The catalog body is small JSON, so unlike track transfers it is collected
//! in memory and parsed in one go.

use anyhow::{Context, Result};
use std::time::Duration;

use super::CatalogResponse;

/// Parameters for one catalog request.
#[derive(Debug, Clone)]
pub struct CatalogRequest {
    pub base_url: String,
    /// Number of tracks to request.
    pub limit: u32,
    pub user_agent: String,
    pub connect_timeout: Duration,
    /// Total time allowed for the request.
    pub timeout: Duration,
}

/// `{base}/api/v1/tracks?cursor=1&limit={limit}`
pub fn catalog_url(base_url: &str, limit: u32) -> String {
    format!(
        "{}/api/v1/tracks?cursor=1&limit={}",
        base_url.trim_end_matches('/'),
        limit
    )
}

/// Fetches and parses the catalog. Any failure is fatal for the run.
///
/// Runs in the current thread; call from `spawn_blocking` if used from async code.
pub fn fetch_catalog(req: &CatalogRequest) -> Result<CatalogResponse> {
    let url = catalog_url(&req.base_url, req.limit);
    let base = req.base_url.trim_end_matches('/');
    let mut body: Vec<u8> = Vec::new();

    let mut easy = curl::easy::Easy::new();
    easy.url(&url).context("invalid catalog URL")?;
    easy.follow_location(true)?;
    easy.useragent(&req.user_agent)?;
    easy.connect_timeout(req.connect_timeout)?;
    easy.timeout(req.timeout)?;

    let mut list = curl::easy::List::new();
    list.append("cache-control: no-cache")?;
    list.append(&format!("Referer: {}/", base))?;
    easy.http_headers(list)?;

    {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.perform().context("catalog GET failed")?;
    }

    let code = easy.response_code().context("no response code")?;
    if !(200..300).contains(&code) {
        anyhow::bail!("GET {} returned HTTP {}", url, code);
    }

    let resp: CatalogResponse =
        serde_json::from_slice(&body).context("catalog response is not valid JSON")?;
    tracing::debug!(
        status = resp.status,
        tracks = resp.tracks().len(),
        "fetched catalog from {}",
        url
    );
    Ok(resp)
}
