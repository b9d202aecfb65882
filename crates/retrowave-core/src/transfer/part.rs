//! Temp-file lifecycle for a single transfer.
//!
//! Bytes stream into `<name>.part`; on success the file is flushed and
//! atomically renamed to `<name>`, so a half-written track never looks
//! complete to the existence check.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Temporary file suffix used before atomic rename.
pub const TEMP_SUFFIX: &str = ".part";

/// Write buffer per transfer; bounds memory regardless of track size.
const BUF_SIZE: usize = 64 * 1024;

/// Path for the temp file: appends `.part` to the final path (e.g. `a.mp3` → `a.mp3.part`).
pub fn temp_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    PathBuf::from(o)
}

/// Open temp file receiving a transfer's body.
pub struct PartFile {
    writer: BufWriter<File>,
    temp_path: PathBuf,
}

impl PartFile {
    /// Create (or truncate) the temp file for `final_path`.
    pub fn create(final_path: &Path) -> io::Result<Self> {
        let temp_path = temp_path(final_path);
        let file = File::options()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)?;
        Ok(Self {
            writer: BufWriter::with_capacity(BUF_SIZE, file),
            temp_path,
        })
    }

    pub fn write_chunk(&mut self, data: &[u8]) -> io::Result<()> {
        self.writer.write_all(data)
    }

    pub fn temp_path(&self) -> &Path {
        &self.temp_path
    }

    /// Flush, close, and rename the temp file onto `final_path`.
    pub fn finalize(self, final_path: &Path) -> io::Result<()> {
        let file = self.writer.into_inner().map_err(|e| e.into_error())?;
        file.sync_all()?;
        drop(file);
        std::fs::rename(&self.temp_path, final_path)
    }

    /// Close and remove the temp file. Best effort.
    pub fn discard(self) {
        let temp_path = self.temp_path.clone();
        drop(self.writer);
        if let Err(e) = std::fs::remove_file(&temp_path) {
            tracing::debug!(path = %temp_path.display(), "could not remove partial file: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temp_path_appends_part() {
        let p = temp_path(Path::new("/tmp/Track One.mp3"));
        assert_eq!(p.to_string_lossy(), "/tmp/Track One.mp3.part");
    }

    #[test]
    fn finalize_renames_onto_final_path() {
        let dir = tempfile::tempdir().unwrap();
        let final_path = dir.path().join("a.mp3");
        let mut part = PartFile::create(&final_path).unwrap();
        part.write_chunk(b"hello ").unwrap();
        part.write_chunk(b"world").unwrap();
        let tp = part.temp_path().to_path_buf();
        part.finalize(&final_path).unwrap();
        assert!(!tp.exists());
        assert_eq!(std::fs::read(&final_path).unwrap(), b"hello world");
    }

    #[test]
    fn create_truncates_stale_part() {
        let dir = tempfile::tempdir().unwrap();
        let final_path = dir.path().join("a.mp3");
        std::fs::write(temp_path(&final_path), b"stale leftover bytes").unwrap();
        let mut part = PartFile::create(&final_path).unwrap();
        part.write_chunk(b"new").unwrap();
        part.finalize(&final_path).unwrap();
        assert_eq!(std::fs::read(&final_path).unwrap(), b"new");
    }

    #[test]
    fn discard_removes_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let final_path = dir.path().join("a.mp3");
        let mut part = PartFile::create(&final_path).unwrap();
        part.write_chunk(b"partial").unwrap();
        let tp = part.temp_path().to_path_buf();
        part.discard();
        assert!(!tp.exists());
        assert!(!final_path.exists());
    }
}
