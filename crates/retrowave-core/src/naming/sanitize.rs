//! Filename sanitization so a remote name cannot escape the target directory.

use crate::transfer::TEMP_SUFFIX;

/// Linux NAME_MAX in bytes.
pub const NAME_MAX: usize = 255;

/// Longest final name whose `.part` sibling still fits in NAME_MAX.
pub const MAX_FILE_NAME: usize = NAME_MAX - TEMP_SUFFIX.len();

/// Sanitizes a candidate filename for use directly under the target directory.
///
/// - Replaces NUL, `/`, `\`, and control characters with `_`
/// - Replaces the reserved names `.` and `..` with `_`
/// - Limits length to `MAX_FILE_NAME` bytes so the `.part` temp name stays valid
///
/// Spaces and other printable characters are kept as-is.
pub fn sanitize_file_name(name: &str) -> String {
    let out: String = name
        .chars()
        .map(|c| {
            if c == '\0' || c == '/' || c == '\\' || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect();

    if out == "." || out == ".." {
        return "_".to_string();
    }

    if out.len() > MAX_FILE_NAME {
        let mut take = MAX_FILE_NAME;
        while take > 0 && !out.is_char_boundary(take) {
            take -= 1;
        }
        out[..take].to_string()
    } else {
        out
    }
}
