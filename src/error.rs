/// Represents the possible errors that can occur when using Emberlight.
#[derive(Debug, thiserror::Error)]
pub enum EmberlightError {
    /// The API key was not provided, either directly or via the environment.
    #[error(
        "API key is missing. Please provide it or set the GEMINI_API_KEY environment variable."
    )]
    MissingApiKey,
    /// The provider rejected the API key.
    #[error("The provided API key is not valid.")]
    InvalidApiKey,
    /// The provider responded successfully but returned zero images.
    #[error("Image generation failed: no images were returned.")]
    NoImages,
    /// An error occurred during the HTTP request (e.g., network issue).
    #[error("Network request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    /// The API response did not match the expected data structure.
    #[error("Failed to parse API response: {0}")]
    ResponseParseFailed(#[from] serde_json::Error),
    /// The API returned a non-successful status code.
    #[error("API request failed: {message}")]
    ApiError {
        /// The error message returned by the API.
        message: String,
    },
    /// An error occurred while parsing a URL, typically the base URL.
    #[error("URL parsing failed: {0}")]
    UrlParseFailed(#[from] url::ParseError),
    /// Image payload data was not valid base64.
    #[error("Failed to decode image data: {0}")]
    DecodeFailed(#[from] base64::DecodeError),
    /// The gallery storage backend failed to read or write.
    #[error("Gallery storage error: {0}")]
    StorageError(String),
    /// An error occurred during file I/O operations.
    #[error("File I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl EmberlightError {
    /// Maps an error to the short text shown to the user in place of results.
    ///
    /// Raw provider text is never forwarded: a credential failure gets a
    /// fixed configuration message, an empty result gets its own message,
    /// and every other failure collapses to one generic message.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::MissingApiKey | Self::InvalidApiKey => {
                "The provided API key is not valid. Please check your configuration."
            }
            Self::NoImages => "Image generation failed: No images were returned.",
            _ => "Failed to generate image. The model may have refused the request.",
        }
    }
}
