/// Generated image export
///
/// Offers the generated image as a downloadable file. The save dialog
/// itself runs in the update loop (rfd is synchronous there, matching
/// the picker); this module supplies the default name and location and
/// does the actual write off the UI thread.

use std::path::PathBuf;

use chrono::Utc;

use crate::media::inline::InlineImage;

/// Filename prefix for saved images
const FILENAME_PREFIX: &str = "product-stager";

/// Default filename for a generated image
///
/// The millisecond timestamp keeps repeated saves from colliding; the
/// extension follows the image's MIME type (png by default).
pub fn default_filename(image: &InlineImage) -> String {
    format!(
        "{}-{}.{}",
        FILENAME_PREFIX,
        Utc::now().timestamp_millis(),
        image.extension()
    )
}

/// Where the save dialog should open
///
/// Pictures if it exists, then Downloads, then home, then the current
/// directory.
pub fn default_directory() -> PathBuf {
    dirs::picture_dir()
        .or_else(dirs::download_dir)
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Write the generated image to the chosen path
pub async fn write_image(path: PathBuf, image: InlineImage) -> Result<PathBuf, String> {
    tokio::fs::write(&path, &image.data)
        .await
        .map_err(|e| format!("Failed to save {}: {}", path.display(), e))?;

    println!(
        "💾 Saved generated image: {} ({} KB)",
        path.display(),
        image.size_kb()
    );

    Ok(path)
}
