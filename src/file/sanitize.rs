//! Original-name sanitizing.

use crate::{FileboxError, Result};

/// Maximum length for a sanitized filename (in characters).
pub const MAX_FILENAME_LENGTH: usize = 255;

/// Reduce a client-supplied filename to a safe display name.
///
/// Keeps only the final path component (both `/` and `\` count as
/// separators), drops control characters and surrounding whitespace, and
/// truncates to [`MAX_FILENAME_LENGTH`] characters from the front so the
/// extension survives. Names that end up empty, `.` or `..` are rejected.
pub fn sanitize_filename(name: &str) -> Result<String> {
    let last = name.rsplit(['/', '\\']).next().unwrap_or("");

    let cleaned: String = last.chars().filter(|c| !c.is_control()).collect();
    let cleaned = cleaned.trim();

    if cleaned.is_empty() || cleaned == "." || cleaned == ".." {
        return Err(FileboxError::Validation("invalid filename".to_string()));
    }

    let count = cleaned.chars().count();
    if count > MAX_FILENAME_LENGTH {
        return Ok(cleaned.chars().skip(count - MAX_FILENAME_LENGTH).collect());
    }

    Ok(cleaned.to_string())
}
