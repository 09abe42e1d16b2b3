use std::path::Path;

use base64::Engine;
use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::error::EmberlightError;

/// The style vocabulary offered by the prompt form.
///
/// Exactly one style is active at a time and is appended to the prompt to
/// bias generation aesthetics. Any other string is accepted by
/// [`GenerationRequest::with_style`]; this list is what a view would render
/// as preset buttons.
pub const STYLE_PRESETS: [&str; 7] = [
    "Cinematic",
    "Cyberpunk",
    "Retro-futurism",
    "Biopunk",
    "Photorealistic",
    "Anime",
    "Minimalist",
];

/// The style applied when the user has not picked one.
pub const DEFAULT_STYLE: &str = "Cinematic";

/// Requested width:height class for generated images.
///
/// The provider understands all three values; a front end may choose to
/// expose only a subset (the original form offered square and wide).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AspectRatio {
    /// 1:1 square.
    #[default]
    #[serde(rename = "1:1")]
    Square,
    /// 16:9 landscape.
    #[serde(rename = "16:9")]
    Wide,
    /// 9:16 portrait.
    #[serde(rename = "9:16")]
    Tall,
}

impl AspectRatio {
    /// Returns the provider's string form of the ratio (e.g., "16:9").
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Square => "1:1",
            Self::Wide => "16:9",
            Self::Tall => "9:16",
        }
    }
}

impl std::fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The user-edited inputs for one generation attempt.
///
/// A request is valid once `prompt` is non-empty; the other fields always
/// have usable defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// User-authored text describing the desired image.
    pub prompt: String,
    /// The active style preset, appended to the prompt.
    pub style: String,
    /// Elements to avoid; omitted from the composed prompt when empty.
    pub negative_prompt: String,
    /// Requested width:height class.
    pub aspect_ratio: AspectRatio,
}

impl Default for GenerationRequest {
    fn default() -> Self {
        Self {
            prompt: String::new(),
            style: DEFAULT_STYLE.to_string(),
            negative_prompt: String::new(),
            aspect_ratio: AspectRatio::default(),
        }
    }
}

impl GenerationRequest {
    /// Creates a request with the given prompt and default style settings.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Default::default()
        }
    }

    /// Sets the style preset.
    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = style.into();
        self
    }

    /// Sets the negative prompt.
    pub fn with_negative_prompt(mut self, negative_prompt: impl Into<String>) -> Self {
        self.negative_prompt = negative_prompt.into();
        self
    }

    /// Sets the aspect ratio.
    pub fn with_aspect_ratio(mut self, aspect_ratio: AspectRatio) -> Self {
        self.aspect_ratio = aspect_ratio;
        self
    }

    /// Whether the request can be submitted.
    pub fn is_valid(&self) -> bool {
        !self.prompt.is_empty()
    }

    /// Flattens the request into the single opaque prompt string sent to
    /// the provider.
    ///
    /// Order is fixed: base prompt, then `", {style} style"`, then
    /// `", negative prompt: {negative_prompt}"` only when non-empty.
    pub fn composed_prompt(&self) -> String {
        let mut full = format!("{}, {} style", self.prompt, self.style);
        if !self.negative_prompt.is_empty() {
            full.push_str(", negative prompt: ");
            full.push_str(&self.negative_prompt);
        }
        full
    }
}

/// A single generated image, as returned by the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    /// Base64-encoded image bytes.
    pub bytes_base64: String,
    /// MIME type of the payload (e.g., "image/jpeg").
    pub mime_type: String,
}

impl GeneratedImage {
    /// Returns the image as a self-contained, directly renderable data URL.
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.bytes_base64)
    }

    /// Decodes the payload into raw image bytes.
    pub fn decode(&self) -> Result<Vec<u8>, EmberlightError> {
        Ok(base64::engine::general_purpose::STANDARD.decode(&self.bytes_base64)?)
    }

    /// Writes the decoded image to a local file (the "export" action).
    pub async fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), EmberlightError> {
        let bytes = self.decode()?;
        fs::write(path.as_ref(), &bytes).await?;
        Ok(())
    }
}

/// A private struct for serializing the image generation request body.
#[derive(Serialize)]
pub(crate) struct PredictRequest<'a> {
    pub(crate) instances: Vec<Instance<'a>>,
    pub(crate) parameters: Parameters<'a>,
}

#[derive(Serialize)]
pub(crate) struct Instance<'a> {
    pub(crate) prompt: &'a str,
}

#[derive(Serialize)]
pub(crate) struct Parameters<'a> {
    #[serde(rename = "sampleCount")]
    pub(crate) sample_count: u32,
    #[serde(rename = "aspectRatio")]
    pub(crate) aspect_ratio: &'a str,
    #[serde(rename = "outputMimeType")]
    pub(crate) output_mime_type: &'a str,
}

/// The response from a successful `:predict` call.
#[derive(Deserialize, Debug)]
pub(crate) struct PredictResponse {
    #[serde(default)]
    pub(crate) predictions: Vec<Prediction>,
}

#[derive(Deserialize, Debug)]
pub(crate) struct Prediction {
    #[serde(rename = "bytesBase64Encoded")]
    pub(crate) bytes_base64_encoded: String,
    #[serde(rename = "mimeType", default = "default_mime_type")]
    pub(crate) mime_type: String,
}

fn default_mime_type() -> String {
    "image/jpeg".to_string()
}
