use std::env;

use reqwest::header::HeaderMap;
use url::Url;

use crate::error::EmberlightError;
use crate::types::{AspectRatio, GeneratedImage, Instance, Parameters, PredictRequest, PredictResponse};

const DEFAULT_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta/";
const DEFAULT_MODEL: &str = "imagen-4.0-generate-001";
const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Every call asks the provider for this many independent variations.
const IMAGES_PER_REQUEST: u32 = 4;
const OUTPUT_MIME_TYPE: &str = "image/jpeg";

/// The client for the Imagen image generation API.
///
/// It holds the shared `reqwest::Client` (with the API key installed as a
/// default header) and the base URL for all API requests. It is designed to
/// be cloneable and safe to share across threads.
#[derive(Clone, Debug)]
pub struct ImagenClient {
    client: reqwest::Client,
    base_url: Url,
    model: String,
}

impl ImagenClient {
    /// Creates a new `ImagenClient`.
    ///
    /// This method initializes the client with an API key. It first checks
    /// the `api_key` parameter. If it is `None`, it falls back to the
    /// `GEMINI_API_KEY` environment variable. The credential is validated
    /// here once, so a missing key is a construction failure rather than a
    /// failure on the first request.
    ///
    /// # Errors
    ///
    /// - `EmberlightError::MissingApiKey` if the API key is not provided in either way.
    /// - `EmberlightError::RequestFailed` if the internal HTTP client fails to build.
    /// - `EmberlightError::UrlParseFailed` if the default API URL is invalid.
    pub fn new(api_key: Option<String>) -> Result<Self, EmberlightError> {
        let api_key = api_key.or_else(|| env::var(API_KEY_ENV).ok());
        let Some(key) = api_key else {
            return Err(EmberlightError::MissingApiKey);
        };
        Self::new_with_url(key, DEFAULT_API_URL)
    }

    /// Creates a new `ImagenClient` with a custom base URL.
    ///
    /// This is useful for testing against a mock server or for connecting
    /// to a different API endpoint.
    ///
    /// # Errors
    ///
    /// - `EmberlightError::InvalidApiKey` if the key cannot be used as a header value.
    /// - `EmberlightError::RequestFailed` if the internal HTTP client fails to build.
    /// - `EmberlightError::UrlParseFailed` if the provided `base_url` is invalid.
    pub fn new_with_url(api_key: String, base_url: &str) -> Result<Self, EmberlightError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-goog-api-key",
            api_key
                .parse()
                .map_err(|_| EmberlightError::InvalidApiKey)?,
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        let mut base_url = Url::parse(base_url)?;
        // Url::join drops the last path segment unless the base ends in '/'.
        if !base_url.path().ends_with('/') {
            base_url.set_path(&format!("{}/", base_url.path()));
        }

        Ok(Self {
            client,
            base_url,
            model: DEFAULT_MODEL.to_string(),
        })
    }

    /// Overrides the model used for generation.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// The model identifier requests are sent to.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Generates images for a text prompt.
    ///
    /// Submits a single `:predict` request asking for four variations and
    /// returns them in the order the provider produced them, each as a
    /// base64 payload that can be turned into a data URL or written to a
    /// file. There is no retry and no caching: one call, one attempt.
    /// Dropping the returned future cancels the outbound request.
    ///
    /// # Arguments
    ///
    /// * `prompt` - The full prompt text, typically produced by
    ///   [`GenerationRequest::composed_prompt`](crate::GenerationRequest::composed_prompt).
    /// * `aspect_ratio` - The requested width:height class.
    ///
    /// # Errors
    ///
    /// - `EmberlightError::NoImages` if the provider responded but returned zero images.
    /// - `EmberlightError::InvalidApiKey` if the provider rejected the credential.
    /// - `EmberlightError::ApiError` for any other non-successful response.
    pub async fn generate(
        &self,
        prompt: &str,
        aspect_ratio: AspectRatio,
    ) -> Result<Vec<GeneratedImage>, EmberlightError> {
        let url = self.base_url.join(&format!("models/{}:predict", self.model))?;
        let request_body = PredictRequest {
            instances: vec![Instance { prompt }],
            parameters: Parameters {
                sample_count: IMAGES_PER_REQUEST,
                aspect_ratio: aspect_ratio.as_str(),
                output_mime_type: OUTPUT_MIME_TYPE,
            },
        };

        tracing::debug!(model = %self.model, aspect_ratio = %aspect_ratio, "submitting generation request");

        let response = self.client.post(url).json(&request_body).send().await?;

        if response.status().is_success() {
            let body = response.text().await?;
            let predict: PredictResponse = serde_json::from_str(&body)?;
            if predict.predictions.is_empty() {
                return Err(EmberlightError::NoImages);
            }
            Ok(predict
                .predictions
                .into_iter()
                .map(|p| GeneratedImage {
                    bytes_base64: p.bytes_base64_encoded,
                    mime_type: p.mime_type,
                })
                .collect())
        } else {
            let error_body: serde_json::Value = response.json().await.unwrap_or_default();
            let message = error_body
                .pointer("/error/message")
                .and_then(|m| m.as_str())
                .map(str::to_string)
                .unwrap_or_else(|| error_body.to_string());
            if message.contains("API key not valid") {
                return Err(EmberlightError::InvalidApiKey);
            }
            Err(EmberlightError::ApiError { message })
        }
    }
}
