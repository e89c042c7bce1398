//! Image Client: the single point of entry for image-generation calls.
//!
//! The upstream answers with either a hosted URL or inline base64 bytes tagged with a
//! content type. Both forms are normalized into `ImageRef`, whose `to_src` yields a
//! string the browser can put straight into an `<img src>`.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

const IMAGE_API_URL: &str = "https://api.aimlapi.com/images/generations/";
/// The image model used for every generation call.
pub const IMAGE_MODEL: &str = "flux-realism";
const REQUEST_TIMEOUT_SECS: u64 = 180;
const DEFAULT_CONTENT_TYPE: &str = "image/png";

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Invalid JSON response from image API: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Image API returned no image")]
    NoImage,

    #[error("Inline image data is not valid base64: {0}")]
    InvalidInline(#[from] base64::DecodeError),
}

/// A generated image: either hosted by the provider or returned inline.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageRef {
    Url(String),
    Inline { content_type: String, bytes: Vec<u8> },
}

impl ImageRef {
    /// The value handed to clients: the URL itself, or a `data:` URI for inline bytes.
    pub fn to_src(&self) -> String {
        match self {
            ImageRef::Url(url) => url.clone(),
            ImageRef::Inline {
                content_type,
                bytes,
            } => format!("data:{content_type};base64,{}", STANDARD.encode(bytes)),
        }
    }
}

/// Anything that can turn a text prompt into an image.
///
/// Carried in `AppState` as `Arc<dyn ImageGenerator>`.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<ImageRef, ImageError>;
}

#[derive(Debug, Serialize)]
struct GenerationRequest<'a> {
    prompt: &'a str,
    model: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerationResponse {
    #[serde(default)]
    images: Vec<GeneratedImage>,
}

#[derive(Debug, Deserialize)]
struct GeneratedImage {
    url: Option<String>,
    file_data: Option<String>,
    content_type: Option<String>,
}

/// Parses a provider response body into the first usable image.
///
/// A non-empty `url` wins; otherwise `file_data` is decoded as base64.
fn parse_generation_response(body: &str) -> Result<ImageRef, ImageError> {
    let response: GenerationResponse = serde_json::from_str(body)?;
    let image = response.images.into_iter().next().ok_or(ImageError::NoImage)?;

    if let Some(url) = image.url.filter(|u| !u.is_empty()) {
        return Ok(ImageRef::Url(url));
    }

    match image.file_data.filter(|d| !d.is_empty()) {
        Some(data) => Ok(ImageRef::Inline {
            content_type: image
                .content_type
                .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string()),
            bytes: STANDARD.decode(data.trim())?,
        }),
        None => Err(ImageError::NoImage),
    }
}

#[derive(Clone)]
pub struct ImageClient {
    client: Client,
    api_key: String,
}

impl ImageClient {
    pub fn new(api_key: String) -> Result<Self, ImageError> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()?,
            api_key,
        })
    }
}

#[async_trait]
impl ImageGenerator for ImageClient {
    async fn generate(&self, prompt: &str) -> Result<ImageRef, ImageError> {
        let response = self
            .client
            .post(IMAGE_API_URL)
            .bearer_auth(&self.api_key)
            .json(&GenerationRequest {
                prompt,
                model: IMAGE_MODEL,
            })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ImageError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let image = parse_generation_response(&body)?;
        debug!(
            inline = matches!(image, ImageRef::Inline { .. }),
            "Image generation succeeded"
        );
        Ok(image)
    }
}
