//! Naming rules for uploaded images.
//!
//! Stored files are named `<unix-millis>.<ext>`. Two uploads landing in the
//! same millisecond overwrite each other; that window is accepted.

use crate::error::CoreError;
use crate::types::Timestamp;

/// Image extensions accepted for upload (lowercase, without the dot).
///
/// Raster formats only. Uploads are served from the API origin, and an SVG
/// can carry script.
pub const ALLOWED_IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp"];

/// Extract and validate the lowercase extension of an uploaded filename.
pub fn image_extension(filename: &str) -> Result<String, CoreError> {
    let ext = std::path::Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .ok_or_else(|| {
            CoreError::Validation(format!("File '{filename}' has no extension"))
        })?;

    if !ALLOWED_IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        return Err(CoreError::Validation(format!(
            "Unsupported image format '.{ext}'. Supported: {}",
            ALLOWED_IMAGE_EXTENSIONS.join(", ")
        )));
    }
    Ok(ext)
}

/// Build the stored filename for an upload received at `now`.
pub fn stored_filename(ext: &str, now: Timestamp) -> String {
    format!("{}.{ext}", now.timestamp_millis())
}
