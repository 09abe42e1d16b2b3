mod common;

use common::{mount_predict_error, mount_predict_success, predictions_body, FAKE_JPEG_B64, PREDICT_PATH};
use emberlight::{AspectRatio, EmberlightError, GeneratedImage, ImagenClient};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_generate_success() {
    let server = MockServer::start().await;

    // The request body shape is part of the provider contract.
    Mock::given(method("POST"))
        .and(path(PREDICT_PATH))
        .and(body_json(json!({
            "instances": [
                { "prompt": "a red fox, Cinematic style" }
            ],
            "parameters": {
                "sampleCount": 4,
                "aspectRatio": "1:1",
                "outputMimeType": "image/jpeg"
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(predictions_body(4)))
        .mount(&server)
        .await;

    let client = ImagenClient::new_with_url("test_api_key".to_string(), &server.uri()).unwrap();

    let images = client
        .generate("a red fox, Cinematic style", AspectRatio::Square)
        .await
        .unwrap();

    assert_eq!(images.len(), 4);
    assert_eq!(images[0].mime_type, "image/jpeg");
    assert_eq!(images[0].bytes_base64, FAKE_JPEG_B64);
    assert_eq!(
        images[0].to_data_url(),
        format!("data:image/jpeg;base64,{}", FAKE_JPEG_B64)
    );
}

#[tokio::test]
async fn test_generate_sends_requested_aspect_ratio() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(PREDICT_PATH))
        .and(body_json(json!({
            "instances": [
                { "prompt": "a skyline" }
            ],
            "parameters": {
                "sampleCount": 4,
                "aspectRatio": "16:9",
                "outputMimeType": "image/jpeg"
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(predictions_body(1)))
        .mount(&server)
        .await;

    let client = ImagenClient::new_with_url("test_api_key".to_string(), &server.uri()).unwrap();

    let images = client.generate("a skyline", AspectRatio::Wide).await.unwrap();
    assert_eq!(images.len(), 1);
}

#[tokio::test]
async fn test_generate_empty_result() {
    let server = MockServer::start().await;
    mount_predict_success(&server, 0).await;

    let client = ImagenClient::new_with_url("test_api_key".to_string(), &server.uri()).unwrap();

    let error = client
        .generate("a red fox", AspectRatio::Square)
        .await
        .unwrap_err();
    assert!(matches!(error, EmberlightError::NoImages));
}

#[tokio::test]
async fn test_generate_invalid_api_key() {
    let server = MockServer::start().await;
    mount_predict_error(&server, 400, "API key not valid. Please pass a valid API key.").await;

    let client = ImagenClient::new_with_url("bad_key".to_string(), &server.uri()).unwrap();

    let error = client
        .generate("a red fox", AspectRatio::Square)
        .await
        .unwrap_err();
    assert!(matches!(error, EmberlightError::InvalidApiKey));
}

#[tokio::test]
async fn test_generate_provider_error() {
    let server = MockServer::start().await;
    mount_predict_error(&server, 500, "model overloaded").await;

    let client = ImagenClient::new_with_url("test_api_key".to_string(), &server.uri()).unwrap();

    let error = client
        .generate("a red fox", AspectRatio::Square)
        .await
        .unwrap_err();
    match error {
        EmberlightError::ApiError { message } => assert_eq!(message, "model overloaded"),
        other => panic!("expected ApiError, got {:?}", other),
    }
}

#[tokio::test]
async fn test_generate_with_model_override() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/imagen-4.0-ultra-generate-001:predict"))
        .respond_with(ResponseTemplate::new(200).set_body_json(predictions_body(4)))
        .mount(&server)
        .await;

    let client = ImagenClient::new_with_url("test_api_key".to_string(), &server.uri())
        .unwrap()
        .with_model("imagen-4.0-ultra-generate-001");
    assert_eq!(client.model(), "imagen-4.0-ultra-generate-001");

    let images = client
        .generate("a red fox, Cinematic style", AspectRatio::Square)
        .await
        .unwrap();
    assert_eq!(images.len(), 4);
}

#[tokio::test]
async fn test_image_decode_and_export() {
    let image = GeneratedImage {
        bytes_base64: FAKE_JPEG_B64.to_string(),
        mime_type: "image/jpeg".to_string(),
    };
    assert_eq!(image.decode().unwrap(), vec![0xFF, 0xD8, 0xFF, 0xE0]);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("emberlight-creation-1.jpeg");
    image.save(&path).await.unwrap();
    assert_eq!(std::fs::read(&path).unwrap(), vec![0xFF, 0xD8, 0xFF, 0xE0]);
}

#[test]
fn test_new_without_api_key_fails() {
    // The constructor falls back to GEMINI_API_KEY; with neither source the
    // client must refuse to start.
    std::env::remove_var("GEMINI_API_KEY");
    let error = ImagenClient::new(None).unwrap_err();
    assert!(matches!(error, EmberlightError::MissingApiKey));
}
