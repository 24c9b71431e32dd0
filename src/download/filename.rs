//! Title sanitization for destination filenames.

use std::path::{Path, PathBuf};

/// Maximum length of a sanitized title, in characters.
pub const MAX_TITLE_CHARS: usize = 100;

/// Extension appended to every destination file.
pub const PDF_EXTENSION: &str = "pdf";

/// Turns a publication title into a filesystem-safe file stem.
///
/// Every character outside ASCII letters, digits, `_`, `-`, `.` and space is
/// replaced by `_`, then the result is cut to [`MAX_TITLE_CHARS`].
#[must_use]
pub fn sanitize_title(title: &str) -> String {
    title
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | ' ') {
                c
            } else {
                '_'
            }
        })
        .take(MAX_TITLE_CHARS)
        .collect()
}

/// Destination path `<dir>/<sanitized title>.pdf`.
#[must_use]
pub fn destination_for(output_dir: &Path, title: &str) -> PathBuf {
    output_dir.join(format!("{}.{PDF_EXTENSION}", sanitize_title(title)))
}
