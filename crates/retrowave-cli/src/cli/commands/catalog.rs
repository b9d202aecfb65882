//! Fetch the track catalog (the descriptor source for both modes).

use anyhow::{Context, Result};
use retrowave_core::catalog::{fetch_catalog, CatalogResponse};
use retrowave_core::config::RetrowaveConfig;

pub async fn fetch_tracks(cfg: &RetrowaveConfig, limit: u32) -> Result<CatalogResponse> {
    let req = cfg.catalog_request(limit);
    tracing::info!(limit, "fetching catalog from {}", cfg.base_url);
    let catalog = tokio::task::spawn_blocking(move || fetch_catalog(&req))
        .await
        .context("catalog task failed")?
        .context("could not obtain track list")?;
    Ok(catalog)
}
