//! CLI for the retrowave-dl catalog downloader.

mod commands;

use anyhow::Result;
use clap::Parser;
use retrowave_core::config::{self, RetrowaveConfig};
use retrowave_core::engine::RunOptions;
use std::path::PathBuf;
use std::time::Duration;

use commands::{fetch_tracks, run_download, run_export};

/// Default output directory, relative to the working directory.
const DEFAULT_OUT_DIR: &str = "downloads";

/// Download tracks from the retrowave catalog.
#[derive(Debug, Parser)]
#[command(name = "retrowave-dl", version)]
#[command(about = "Download tracks from the retrowave catalog", long_about = None)]
pub struct Cli {
    /// Number of tracks to fetch (default from config).
    #[arg(long, value_name = "N")]
    pub limit: Option<u32>,

    /// Get all available tracks (ignores --limit).
    #[arg(long)]
    pub all: bool,

    /// Save the track list as soundtracks.json instead of downloading.
    #[arg(long)]
    pub json: bool,

    /// Skip tracks already present in the output directory.
    #[arg(long)]
    pub sync: bool,

    /// Output directory (default: ./downloads).
    #[arg(long, value_name = "DIR")]
    pub out: Option<PathBuf>,

    /// Delay between launching downloads in milliseconds (overrides config).
    #[arg(long, value_name = "MS")]
    pub pacing_ms: Option<u64>,

    /// Log to stderr instead of the log file.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Number of catalog entries to request.
    pub fn track_limit(&self, cfg: &RetrowaveConfig) -> u32 {
        if self.all {
            cfg.all_limit
        } else {
            self.limit.unwrap_or(cfg.default_limit)
        }
    }

    pub fn output_dir(&self) -> PathBuf {
        self.out
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUT_DIR))
    }

    /// Flags merged over config into the engine's immutable run options.
    pub fn run_options(&self, cfg: &RetrowaveConfig) -> RunOptions {
        RunOptions {
            target_dir: self.output_dir(),
            idempotent: self.sync,
            pacing: self
                .pacing_ms
                .map(Duration::from_millis)
                .unwrap_or_else(|| cfg.pacing()),
            transfer: cfg.transfer_options(),
        }
    }

    pub async fn run(self) -> Result<()> {
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        let limit = self.track_limit(&cfg);
        let catalog = fetch_tracks(&cfg, limit).await?;

        if self.json {
            run_export(&cfg, &catalog, &self.output_dir()).await?;
        } else {
            run_download(&cfg, &catalog, self.run_options(&cfg)).await?;
        }
        Ok(())
    }
}
