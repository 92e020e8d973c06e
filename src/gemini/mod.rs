/// Gemini image generation module
///
/// The boundary to the external image-generation service: one request
/// in (product photo + resolved prompt), one generated image or error
/// out (client.rs).

pub mod client;

pub use client::{generate, GenerationError};
