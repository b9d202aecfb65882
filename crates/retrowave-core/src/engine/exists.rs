//! Existence check used by idempotent (sync) runs.

use std::io;
use std::path::Path;

/// Reports whether `target_dir/name` is already present.
///
/// Any error determining presence counts as absent, so an ambiguous state
/// leads to a re-download rather than a silent skip.
pub fn exists(target_dir: &Path, name: &str) -> bool {
    let path = target_dir.join(name);
    match std::fs::metadata(&path) {
        Ok(_) => true,
        Err(e) => {
            if e.kind() != io::ErrorKind::NotFound {
                tracing::debug!(path = %path.display(), "presence check failed, treating as absent: {}", e);
            }
            false
        }
    }
}
