//! Layout suggestions from a UI screenshot.
//!
//! An image is sent to a Gemini-style `generateContent` endpoint together
//! with a fixed prompt and response schema. The text it returns is validated
//! by [`craft_core::parse_suggestions`] before anything reaches a layout.

use std::path::Path;

use async_trait::async_trait;
use base64::Engine as _;
use craft_core::{parse_suggestions, CraftError, Element, SuggestedShape};
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use thiserror::Error;
use url::Url;

/// Largest accepted image.
pub const MAX_IMAGE_BYTES: usize = 4 * 1024 * 1024;

/// Default API base URL.
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default model.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Instruction sent alongside the image.
pub const LAYOUT_PROMPT: &str = "Analyze this UI screenshot. Identify all placeholder elements \
like images, text lines, and buttons. Return a JSON array representing these elements as \
skeleton loaders. Each object must have 'type' ('rect', 'circle', or 'text'), 'x', 'y', \
'width', and 'height' properties. All coordinates and dimensions should be relative to a \
600x400 canvas. Do not include any explanation, just the raw JSON array.";

/// Errors from requesting a suggested layout.
#[derive(Debug, Error)]
pub enum SuggestError {
    /// The endpoint URL is invalid.
    #[error("invalid suggestion endpoint: {0}")]
    InvalidUrl(String),
    /// Reading the image failed.
    #[error("failed to read image: {0}")]
    Io(#[from] std::io::Error),
    /// The image exceeds [`MAX_IMAGE_BYTES`].
    #[error("image is {size} bytes; the limit is 4 MiB")]
    ImageTooLarge {
        /// Size of the rejected image.
        size: usize,
    },
    /// The image is not PNG, JPEG or WebP.
    #[error("unsupported image format: {0}")]
    UnsupportedImage(String),
    /// HTTP layer failed (connection, timeout, etc.).
    #[error("suggestion request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// The service answered with a non-success status.
    #[error("suggestion service returned {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, for diagnostics.
        body: String,
    },
    /// The response carried no text.
    #[error("suggestion service returned no layout")]
    EmptyResponse,
    /// The returned text is not a valid layout.
    #[error(transparent)]
    InvalidLayout(#[from] CraftError),
}

/// Accepted image encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    /// PNG.
    Png,
    /// JPEG.
    Jpeg,
    /// WebP.
    Webp,
}

impl ImageFormat {
    /// MIME type sent with the image.
    #[must_use]
    pub const fn mime_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Webp => "image/webp",
        }
    }

    /// Detect the format from the file signature.
    #[must_use]
    pub fn sniff(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(b"\x89PNG\r\n\x1a\n") {
            Some(Self::Png)
        } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
            Some(Self::Jpeg)
        } else if bytes.len() >= 12 && &bytes[..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
            Some(Self::Webp)
        } else {
            None
        }
    }

    /// Guess the format from a file extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "png" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "webp" => Some(Self::Webp),
            _ => None,
        }
    }
}

/// An image ready to send.
#[derive(Debug, Clone)]
pub struct LayoutImage {
    format: ImageFormat,
    bytes: Vec<u8>,
}

impl LayoutImage {
    /// Wrap raw bytes, detecting the format from their signature.
    ///
    /// # Errors
    ///
    /// Returns [`SuggestError::ImageTooLarge`] or
    /// [`SuggestError::UnsupportedImage`].
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, SuggestError> {
        if bytes.len() > MAX_IMAGE_BYTES {
            return Err(SuggestError::ImageTooLarge { size: bytes.len() });
        }
        let format = ImageFormat::sniff(&bytes).ok_or_else(|| {
            SuggestError::UnsupportedImage("expected PNG, JPEG or WebP data".into())
        })?;
        Ok(Self { format, bytes })
    }

    /// Read an image file.
    ///
    /// The extension must name a supported format; the content is then
    /// checked against its signature.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is too large or is not a
    /// supported image.
    pub async fn read(path: &Path) -> Result<Self, SuggestError> {
        if ImageFormat::from_path(path).is_none() {
            return Err(SuggestError::UnsupportedImage(path.display().to_string()));
        }
        let size = usize::try_from(tokio::fs::metadata(path).await?.len()).unwrap_or(usize::MAX);
        if size > MAX_IMAGE_BYTES {
            return Err(SuggestError::ImageTooLarge { size });
        }
        Self::from_bytes(tokio::fs::read(path).await?)
    }

    /// Detected format.
    #[must_use]
    pub fn format(&self) -> ImageFormat {
        self.format
    }

    /// Base64 payload.
    #[must_use]
    pub fn to_base64(&self) -> String {
        base64::engine::general_purpose::STANDARD.encode(&self.bytes)
    }
}

/// Something that proposes a layout for an image.
#[async_trait]
pub trait LayoutSuggester: Send + Sync {
    /// Propose shapes for `image`.
    async fn suggest(&self, image: &LayoutImage) -> Result<Vec<SuggestedShape>, SuggestError>;
}

/// Turn accepted shapes into a layout, stacked in order.
#[must_use]
pub fn shapes_to_layout(shapes: &[SuggestedShape]) -> Vec<Element> {
    let mut layout = Vec::with_capacity(shapes.len());
    for shape in shapes {
        let element = shape.to_element(&layout);
        layout.push(element);
    }
    layout
}

/// Client for the Gemini `generateContent` API.
#[derive(Debug, Clone)]
pub struct GeminiSuggester {
    http: Client,
    endpoint: Url,
    model: String,
    api_key: String,
}

impl GeminiSuggester {
    /// Create a client.
    ///
    /// `endpoint` is the API base, e.g. [`DEFAULT_ENDPOINT`].
    ///
    /// # Errors
    ///
    /// Returns [`SuggestError::InvalidUrl`] if the endpoint is malformed or
    /// [`SuggestError::Http`] if the HTTP client fails to build.
    pub fn new(
        api_key: impl Into<String>,
        endpoint: impl AsRef<str>,
        model: impl Into<String>,
    ) -> Result<Self, SuggestError> {
        let endpoint =
            Url::parse(endpoint.as_ref()).map_err(|e| SuggestError::InvalidUrl(e.to_string()))?;
        if endpoint.cannot_be_a_base() {
            return Err(SuggestError::InvalidUrl(endpoint.to_string()));
        }
        let http = Client::builder()
            .user_agent(concat!("skeleton-craft/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            endpoint,
            model: model.into(),
            api_key: api_key.into(),
        })
    }

    /// Full `generateContent` URL for the configured model.
    ///
    /// # Errors
    ///
    /// Returns [`SuggestError::InvalidUrl`] if the endpoint cannot carry a
    /// path.
    pub fn request_url(&self) -> Result<Url, SuggestError> {
        let mut url = self.endpoint.clone();
        url.path_segments_mut()
            .map_err(|()| SuggestError::InvalidUrl(self.endpoint.to_string()))?
            .pop_if_empty()
            .push("models")
            .push(&format!("{}:generateContent", self.model));
        Ok(url)
    }

    /// JSON request body for `image`.
    #[must_use]
    pub fn request_body(image: &LayoutImage) -> Value {
        json!({
            "contents": [{
                "parts": [
                    { "inlineData": { "mimeType": image.format().mime_type(), "data": image.to_base64() } },
                    { "text": LAYOUT_PROMPT }
                ]
            }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": {
                    "type": "ARRAY",
                    "items": {
                        "type": "OBJECT",
                        "properties": {
                            "type": { "type": "STRING", "enum": ["rect", "circle", "text"] },
                            "x": { "type": "NUMBER" },
                            "y": { "type": "NUMBER" },
                            "width": { "type": "NUMBER" },
                            "height": { "type": "NUMBER" }
                        },
                        "required": ["type", "x", "y", "width", "height"]
                    }
                }
            }
        })
    }
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate.
    fn text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let text: String = parts.iter().filter_map(|p| p.text.as_deref()).collect();
        let text = strip_code_fence(text.trim());
        (!text.is_empty()).then(|| text.to_string())
    }
}

/// Remove a surrounding Markdown code fence, if any.
fn strip_code_fence(text: &str) -> &str {
    let Some(inner) = text.strip_prefix("```") else {
        return text;
    };
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    inner.strip_suffix("```").unwrap_or(inner).trim()
}

#[async_trait]
impl LayoutSuggester for GeminiSuggester {
    async fn suggest(&self, image: &LayoutImage) -> Result<Vec<SuggestedShape>, SuggestError> {
        let url = self.request_url()?;
        tracing::info!(model = %self.model, mime = image.format().mime_type(), "Requesting layout suggestion");

        let response = self
            .http
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .json(&Self::request_body(image))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "Suggestion service rejected request");
            return Err(SuggestError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let payload: GenerateContentResponse = response.json().await?;
        let text = payload.text().ok_or(SuggestError::EmptyResponse)?;
        let shapes = parse_suggestions(&text).inspect_err(|e| {
            tracing::warn!(error = %e, "Suggestion service returned an invalid layout");
        })?;
        tracing::info!(count = shapes.len(), "Received suggested layout");
        Ok(shapes)
    }
}
