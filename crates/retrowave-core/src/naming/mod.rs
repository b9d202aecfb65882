//! Local filename derivation for catalog tracks.
//!
//! Remote metadata is never used as a literal path: titles and descriptor
//! names pass through `sanitize_file_name` before touching the filesystem.

mod sanitize;

pub use sanitize::{sanitize_file_name, MAX_FILE_NAME, NAME_MAX};

/// Extension appended to every track title.
pub const TRACK_EXTENSION: &str = ".mp3";

/// Derives the local filename for a track: sanitized title plus `.mp3`.
///
/// Falls back to the track id when the title sanitizes to nothing usable.
///
/// # Examples
///
/// - `track_file_name("1", "Track One")` → `"Track One.mp3"`
/// - `track_file_name("7", "AC/DC")` → `"AC_DC.mp3"`
/// - `track_file_name("9", "")` → `"9.mp3"`
pub fn track_file_name(id: &str, title: &str) -> String {
    let mut stem = sanitize_file_name(title.trim());
    if stem.is_empty() || stem == "_" {
        stem = sanitize_file_name(id.trim());
    }

    let budget = MAX_FILE_NAME - TRACK_EXTENSION.len();
    if stem.len() > budget {
        let mut take = budget;
        while take > 0 && !stem.is_char_boundary(take) {
            take -= 1;
        }
        stem.truncate(take);
    }
    stem.push_str(TRACK_EXTENSION);
    stem
}
