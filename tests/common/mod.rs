use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Base64 of the JPEG magic bytes, small enough to assert against.
pub const FAKE_JPEG_B64: &str = "/9j/4A==";

pub const PREDICT_PATH: &str = "/models/imagen-4.0-generate-001:predict";

/// A successful `:predict` body carrying `count` identical predictions.
pub fn predictions_body(count: usize) -> serde_json::Value {
    let predictions: Vec<_> = (0..count)
        .map(|_| {
            json!({
                "bytesBase64Encoded": FAKE_JPEG_B64,
                "mimeType": "image/jpeg"
            })
        })
        .collect();
    json!({ "predictions": predictions })
}

/// Mounts a mock that answers every predict request with `count` images.
pub async fn mount_predict_success(server: &MockServer, count: usize) {
    Mock::given(method("POST"))
        .and(path(PREDICT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(predictions_body(count)))
        .mount(server)
        .await;
}

/// Mounts a mock that fails every predict request with the given status
/// and provider error message.
pub async fn mount_predict_error(server: &MockServer, status: u16, message: &str) {
    Mock::given(method("POST"))
        .and(path(PREDICT_PATH))
        .respond_with(ResponseTemplate::new(status).set_body_json(json!({
            "error": {
                "code": status,
                "message": message,
                "status": "INVALID_ARGUMENT"
            }
        })))
        .mount(server)
        .await;
}
