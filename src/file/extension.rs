//! Filename extension allow-list.

use std::collections::HashSet;

/// Checks filename extensions against a fixed allow-list.
///
/// The extension is the text after the last `.`, compared lower-cased.
/// A name without a `.` has no extension and is never allowed.
#[derive(Debug, Clone)]
pub struct ExtensionValidator {
    allowed: HashSet<String>,
}

impl ExtensionValidator {
    /// Create a validator from a list of extensions (case-insensitive, no leading dot).
    pub fn new<I, S>(allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let allowed = allowed
            .into_iter()
            .map(|s| s.as_ref().trim_start_matches('.').to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();

        Self { allowed }
    }

    /// True when no usable extension was configured.
    pub fn is_empty(&self) -> bool {
        self.allowed.is_empty()
    }

    /// Return the lower-cased extension of `filename`, if it has one.
    pub fn extension_of(filename: &str) -> Option<String> {
        filename
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_lowercase())
    }

    /// Check whether `filename` carries an allowed extension.
    pub fn is_allowed(&self, filename: &str) -> bool {
        Self::extension_of(filename)
            .map(|ext| self.allowed.contains(&ext))
            .unwrap_or(false)
    }

    /// Return the lower-cased extension of `filename` only when it is allowed.
    pub fn allowed_extension(&self, filename: &str) -> Option<String> {
        Self::extension_of(filename).filter(|ext| self.allowed.contains(ext))
    }
}
