/// Product photo intake
///
/// Loads the user's product photo from disk (picked via the native
/// dialog or dropped onto the window) and sniffs the actual format
/// before it enters the session. Also fetches the remote style
/// thumbnails shown on the template cards.

use std::path::{Path, PathBuf};

use crate::media::inline::{self, InlineImage};

/// File extensions accepted by the picker and the drop target
pub const SUPPORTED_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "webp"];

/// Load a product photo from disk
///
/// Reads the file, sniffs the format from its magic bytes (the
/// extension is not trusted), and rejects anything that is not
/// PNG, JPEG, or WEBP.
pub async fn load_image_file(path: PathBuf) -> Result<InlineImage, String> {
    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;

    let image = image_from_bytes(bytes)
        .map_err(|e| format!("{}: {}", path.display(), e))?;

    println!(
        "📷 Loaded product photo: {} ({} KB, {})",
        path.display(),
        image.size_kb(),
        image.mime_type
    );

    Ok(image)
}

/// Sniff the image format and wrap the bytes as inline image data
fn image_from_bytes(bytes: Vec<u8>) -> Result<InlineImage, String> {
    let format = image::guess_format(&bytes)
        .map_err(|_| "not a recognized image file".to_string())?;

    let mime_type = format.to_mime_type();
    if !inline::is_supported_mime(mime_type) {
        return Err(format!(
            "unsupported image format {} (use PNG, JPEG, or WEBP)",
            mime_type
        ));
    }

    Ok(InlineImage::new(mime_type, bytes))
}

/// Quick extension check for dropped files
///
/// Drops of non-image files are rejected before reading anything; the
/// real format check still happens on the bytes afterwards.
pub fn has_supported_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| {
            let ext = ext.to_string_lossy().to_lowercase();
            SUPPORTED_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

/// Fetch a style thumbnail for the template grid
///
/// Thumbnails are decorative; callers treat a failure as "show the
/// card without a picture".
pub async fn fetch_thumbnail(url: String) -> Result<Vec<u8>, String> {
    let response = reqwest::get(&url)
        .await
        .map_err(|e| format!("Thumbnail request failed: {}", e))?;

    if !response.status().is_success() {
        return Err(format!(
            "Thumbnail fetch for {} returned {}",
            url,
            response.status()
        ));
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| format!("Thumbnail download failed: {}", e))?;

    Ok(bytes.to_vec())
}
