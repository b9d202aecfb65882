//! CLI command handlers.

mod catalog;
mod download;
mod export;

pub use catalog::fetch_tracks;
pub use download::run_download;
pub use export::run_export;

#[cfg(test)]
pub(crate) use download::format_report;
