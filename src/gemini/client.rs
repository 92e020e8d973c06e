/// Gemini image generation client
///
/// Issues a single generateContent request against the image model:
/// the uploaded product photo as an inline part plus the resolved
/// prompt text, asking for an image response. No retries and no
/// timeout policy live here; the controller's loading flag guarantees
/// one request in flight per generate action.

use base64::{engine::general_purpose, Engine as _};
use serde::Deserialize;
use serde_json::{json, Value};
use thiserror::Error;

use crate::media::inline::InlineImage;

/// Model used for image generation
pub const IMAGE_MODEL: &str = "gemini-2.5-flash-image";

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Anything that kept the service from returning an image
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct GenerationError(pub String);

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    parts: Option<Vec<Part>>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

/// Generate a staged product image
///
/// Exactly one HTTP call; every failure path collapses into a
/// human-readable `GenerationError`.
pub async fn generate(
    api_key: String,
    source: InlineImage,
    prompt: String,
) -> Result<InlineImage, GenerationError> {
    let api_key = api_key.trim().to_string();
    if api_key.is_empty() {
        return Err(GenerationError(
            "GEMINI_API_KEY is not set. Export it and restart the app.".to_string(),
        ));
    }

    println!(
        "🎨 Requesting staged image ({} KB source, {} prompt chars)",
        source.size_kb(),
        prompt.len()
    );

    let payload = build_payload(&source, &prompt);
    let url = format!("{}/{}:generateContent", API_BASE, IMAGE_MODEL);

    let client = reqwest::Client::new();
    let response = client
        .post(&url)
        .header("x-goog-api-key", &api_key)
        .json(&payload)
        .send()
        .await
        .map_err(|e| GenerationError(format!("Request to the image service failed: {}", e)))?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(GenerationError(format!(
            "Image service returned {}: {}",
            status,
            summarize_error_body(&body)
        )));
    }

    let parsed = response
        .json::<GenerateResponse>()
        .await
        .map_err(|e| GenerationError(format!("Malformed response from image service: {}", e)))?;

    let image = extract_image(parsed)?;

    println!(
        "✅ Received generated image ({} KB, {})",
        image.size_kb(),
        image.mime_type
    );

    Ok(image)
}

/// Build the generateContent request body
fn build_payload(source: &InlineImage, prompt: &str) -> Value {
    json!({
        "systemInstruction": {
            "parts": [{
                "text": "Edit the product photo as described by the prompt. \
                         The response must be an image, not text."
            }]
        },
        "contents": [{
            "role": "user",
            "parts": [
                {
                    "inlineData": {
                        "mimeType": source.mime_type,
                        "data": general_purpose::STANDARD.encode(&source.data),
                    }
                },
                { "text": prompt },
            ]
        }],
        "generationConfig": {
            "responseModalities": ["TEXT", "IMAGE"]
        },
    })
}

/// Pick the generated image out of the response
///
/// The first image part wins. When the model answered with prose only
/// (usually a refusal), that prose becomes the error message.
fn extract_image(response: GenerateResponse) -> Result<InlineImage, GenerationError> {
    let mut refusal = None;

    for candidate in response.candidates.unwrap_or_default() {
        let parts = candidate
            .content
            .and_then(|content| content.parts)
            .unwrap_or_default();

        for part in parts {
            match part {
                Part::InlineData { inline_data } if inline_data.mime_type.starts_with("image/") => {
                    let data = general_purpose::STANDARD
                        .decode(inline_data.data.as_bytes())
                        .map_err(|e| {
                            GenerationError(format!("Service sent invalid image data: {}", e))
                        })?;
                    return Ok(InlineImage::new(inline_data.mime_type, data));
                }
                Part::Text { text } => {
                    let text = text.trim();
                    if refusal.is_none() && !text.is_empty() {
                        refusal = Some(text.to_string());
                    }
                }
                Part::InlineData { .. } => {}
            }
        }
    }

    match refusal {
        Some(text) => Err(GenerationError(format!(
            "The service returned text instead of an image: {}",
            text
        ))),
        None => Err(GenerationError(
            "The service returned no image.".to_string(),
        )),
    }
}

/// Pull a useful message out of an error body
///
/// The API wraps failures as `{"error": {"message": ...}}`; anything
/// else is truncated raw text.
fn summarize_error_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "empty response body".to_string();
    }

    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        if let Some(message) = value.pointer("/error/message").and_then(|v| v.as_str()) {
            return message.to_string();
        }
    }

    truncate_for_log(trimmed, 300)
}

fn truncate_for_log(value: &str, limit: usize) -> String {
    if value.chars().count() <= limit {
        return value.to_string();
    }
    let truncated: String = value.chars().take(limit).collect();
    format!("{}... (truncated)", truncated)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source() -> InlineImage {
        InlineImage::new("image/png", vec![1, 2, 3])
    }

    #[test]
    fn test_payload_shape() {
        let payload = build_payload(&source(), "a prompt");

        let modalities = payload
            .pointer("/generationConfig/responseModalities")
            .unwrap();
        assert_eq!(modalities, &json!(["TEXT", "IMAGE"]));

        let image_part = payload.pointer("/contents/0/parts/0/inlineData").unwrap();
        assert_eq!(image_part["mimeType"], "image/png");
        assert_eq!(
            image_part["data"],
            general_purpose::STANDARD.encode([1, 2, 3])
        );

        let text_part = payload.pointer("/contents/0/parts/1/text").unwrap();
        assert_eq!(text_part, "a prompt");
    }

    #[test]
    fn test_extract_first_image_part() {
        let encoded = general_purpose::STANDARD.encode([7, 7, 7]);
        let response: GenerateResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": {
                    "parts": [
                        { "text": "Here is your image" },
                        { "inlineData": { "mimeType": "image/png", "data": encoded } },
                        { "inlineData": { "mimeType": "image/png", "data": "ignored" } },
                    ]
                }
            }]
        }))
        .unwrap();

        let image = extract_image(response).unwrap();
        assert_eq!(image.mime_type, "image/png");
        assert_eq!(image.data, vec![7, 7, 7]);
    }

    #[test]
    fn test_extract_surfaces_model_prose() {
        let response: GenerateResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": {
                    "parts": [{ "text": "I can't edit that image." }]
                }
            }]
        }))
        .unwrap();

        let err = extract_image(response).unwrap_err();
        assert!(err.0.contains("I can't edit that image."));
    }

    #[test]
    fn test_extract_handles_empty_response() {
        let response: GenerateResponse = serde_json::from_value(json!({})).unwrap();
        let err = extract_image(response).unwrap_err();
        assert!(err.0.contains("no image"));

        let response: GenerateResponse =
            serde_json::from_value(json!({ "candidates": [] })).unwrap();
        assert!(extract_image(response).is_err());
    }

    #[test]
    fn test_extract_skips_non_image_inline_data() {
        let response: GenerateResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": {
                    "parts": [
                        { "inlineData": { "mimeType": "audio/wav", "data": "AAAA" } },
                    ]
                }
            }]
        }))
        .unwrap();

        assert!(extract_image(response).is_err());
    }

    #[test]
    fn test_extract_rejects_bad_base64() {
        let response: GenerateResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": {
                    "parts": [
                        { "inlineData": { "mimeType": "image/png", "data": "!!not-base64!!" } },
                    ]
                }
            }]
        }))
        .unwrap();

        let err = extract_image(response).unwrap_err();
        assert!(err.0.contains("invalid image data"));
    }

    #[test]
    fn test_summarize_error_body() {
        let api_error = r#"{"error": {"code": 429, "message": "quota exceeded"}}"#;
        assert_eq!(summarize_error_body(api_error), "quota exceeded");

        assert_eq!(summarize_error_body("   "), "empty response body");
        assert_eq!(summarize_error_body("plain text"), "plain text");

        let long = "x".repeat(500);
        assert!(summarize_error_body(&long).ends_with("... (truncated)"));
    }

    #[tokio::test]
    async fn test_generate_without_api_key_fails_before_any_request() {
        let err = generate(String::from("  "), source(), "prompt".to_string())
            .await
            .unwrap_err();
        assert!(err.0.contains("GEMINI_API_KEY"));
    }
}
