/// Image intake and export module
///
/// This module handles everything that crosses the image boundary:
/// - Inline image data and data URIs (inline.rs)
/// - Loading the user's product photo from disk (intake.rs)
/// - Saving the generated image with a timestamped name (export.rs)

pub mod export;
pub mod inline;
pub mod intake;

pub use inline::InlineImage;
