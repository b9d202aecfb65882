//! Catalog export: write the track list as `soundtracks.json` instead of downloading.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::catalog::Track;

pub const EXPORT_FILE_NAME: &str = "soundtracks.json";

#[derive(Debug, Serialize)]
struct ExportEntry<'a> {
    id: &'a str,
    title: &'a str,
    link: String,
    filename: String,
}

/// Writes every track with a non-empty id to `target_dir/soundtracks.json`
/// (pretty-printed, 2-space indent). Creates `target_dir` if needed and
/// returns the written path.
pub fn export_json(tracks: &[Track], base_url: &str, target_dir: &Path) -> Result<PathBuf> {
    let entries: Vec<ExportEntry<'_>> = tracks
        .iter()
        .filter(|t| !t.id.is_empty())
        .map(|t| ExportEntry {
            id: &t.id,
            title: &t.title,
            link: t.stream_link(base_url),
            filename: t.file_name(),
        })
        .collect();

    let json = serde_json::to_string_pretty(&entries)?;
    fs::create_dir_all(target_dir)
        .with_context(|| format!("create {}", target_dir.display()))?;
    let path = target_dir.join(EXPORT_FILE_NAME);
    fs::write(&path, json).with_context(|| format!("write {}", path.display()))?;
    tracing::info!(count = entries.len(), "exported catalog to {}", path.display());
    Ok(path)
}
