//! `--json`: write the catalog as soundtracks.json instead of downloading.

use anyhow::Result;
use retrowave_core::catalog::CatalogResponse;
use retrowave_core::config::RetrowaveConfig;
use retrowave_core::engine::prepare_target_dir;
use retrowave_core::export::export_json;
use std::path::Path;

pub async fn run_export(
    cfg: &RetrowaveConfig,
    catalog: &CatalogResponse,
    out_dir: &Path,
) -> Result<()> {
    let dir = prepare_target_dir(out_dir).await?;
    let path = export_json(catalog.tracks(), &cfg.base_url, &dir)?;
    println!("JSON file saved at '{}'", path.display());
    Ok(())
}
