//! Default mode: run the retrieval engine over the catalog and print the tally.

use anyhow::Result;
use retrowave_core::catalog::CatalogResponse;
use retrowave_core::config::RetrowaveConfig;
use retrowave_core::control::CancelToken;
use retrowave_core::engine::{self, RunOptions, RunSummary};

pub async fn run_download(
    cfg: &RetrowaveConfig,
    catalog: &CatalogResponse,
    opts: RunOptions,
) -> Result<RunSummary> {
    let descriptors = catalog.descriptors(&cfg.base_url);

    let cancel = CancelToken::new();
    let interrupt = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::warn!("interrupt received, cancelling in-flight downloads");
                cancel.cancel();
            }
        })
    };

    let result = engine::run_with_cancel(descriptors, &opts, cancel).await;
    interrupt.abort();
    let summary = result?;

    print!("{}", format_report(&summary));
    Ok(summary)
}

/// Console report: the tally line, then one line per failure.
pub(crate) fn format_report(summary: &RunSummary) -> String {
    let mut out = format!("{}\n", summary);
    for f in &summary.failures {
        out.push_str(&format!("  failed: {} ({}): {}\n", f.name, f.remote_url, f.reason));
    }
    out
}
