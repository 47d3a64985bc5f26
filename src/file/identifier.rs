//! Storage identifier generation and checking.

use uuid::Uuid;

use super::extension::ExtensionValidator;

/// Length of the random hex token at the start of every generated identifier.
pub const TOKEN_LENGTH: usize = 32;

/// Generate a fresh storage identifier for `original_name`.
///
/// The identifier is a 32-character lower-case hex token from a random
/// (v4) UUID, followed by `.` and the lower-cased extension when the name
/// carries an allowed one. No other part of the name is kept.
pub fn generate_storage_id(original_name: &str, extensions: &ExtensionValidator) -> String {
    let token = Uuid::new_v4().simple().to_string();

    match extensions.allowed_extension(original_name) {
        Some(ext) => format!("{token}.{ext}"),
        None => token,
    }
}

/// Check that `storage_id` can name a file directly inside the storage root.
///
/// Identifiers that are empty, hidden (leading `.`), or contain a path
/// separator or control character are refused. Identifiers are not required
/// to look generated: orphan files placed in the storage root by other means
/// stay addressable.
pub fn is_addressable(storage_id: &str) -> bool {
    !storage_id.is_empty()
        && !storage_id.starts_with('.')
        && !storage_id
            .chars()
            .any(|c| c == '/' || c == '\\' || c.is_control())
}

/// Relative download reference for a storage identifier.
pub fn download_reference(storage_id: &str) -> String {
    format!("/download/{storage_id}")
}
