//! Client for the face-compositing service.
//!
//! Unlike synthesis there is no job lifecycle here: one multipart POST with
//! the source face and the target image reference returns the composited
//! image reference directly.

use std::time::Duration;

use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use thiserror::Error;

/// Failures raised by the compositing call.
#[derive(Debug, Error)]
pub enum CompositingError {
    /// Network-layer failure (DNS, connect, timeout, body decode).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-2xx status.
    #[error("compositing service returned status {status}: {message}")]
    Api { status: u16, message: String },

    /// 2xx response whose body had no usable output reference.
    #[error("compositing response had no output_url")]
    MalformedResponse,
}

/// Seam over the synchronous compositing capability. Takes the face blob
/// by value: the request owns it until this one call consumes it.
#[allow(async_fn_in_trait)]
pub trait CompositingBackend {
    async fn swap(
        &self,
        source_face: Vec<u8>,
        target_url: &str,
    ) -> Result<String, CompositingError>;
}

#[derive(Debug, Deserialize)]
struct SwapResponse {
    #[serde(default)]
    output_url: Option<String>,
}

/// HTTP client for the face-swap endpoint.
pub struct FaceSwapClient {
    client: Client,
    base_url: String,
}

impl FaceSwapClient {
    pub fn new(base_url: String) -> Self {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(120))
            .build()
            .expect("failed to build HTTP client");
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

impl CompositingBackend for FaceSwapClient {
    async fn swap(
        &self,
        source_face: Vec<u8>,
        target_url: &str,
    ) -> Result<String, CompositingError> {
        let form = Form::new()
            .part("source", Part::bytes(source_face).file_name("face.jpg"))
            .text("target_url", target_url.to_string());

        let response = self
            .client
            .post(format!("{}/swap", self.base_url))
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(CompositingError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.json::<SwapResponse>().await?;
        body.output_url
            .filter(|url| !url.is_empty())
            .ok_or(CompositingError::MalformedResponse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn swap_returns_output_url() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/swap"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "output_url": "https://img.example/swapped.png"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = FaceSwapClient::new(server.uri());
        let url = client
            .swap(vec![0xff, 0xd8, 0xff], "https://img.example/target.png")
            .await
            .unwrap();
        assert_eq!(url, "https://img.example/swapped.png");
    }

    #[tokio::test]
    async fn swap_non_2xx_is_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/swap"))
            .respond_with(ResponseTemplate::new(500).set_body_string("no face detected"))
            .mount(&server)
            .await;

        let client = FaceSwapClient::new(server.uri());
        let err = client
            .swap(vec![1, 2, 3], "https://img.example/target.png")
            .await
            .unwrap_err();
        match err {
            CompositingError::Api { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "no face detected");
            }
            other => panic!("expected Api, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn swap_empty_body_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/swap"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let client = FaceSwapClient::new(server.uri());
        let err = client
            .swap(vec![1], "https://img.example/target.png")
            .await
            .unwrap_err();
        assert!(matches!(err, CompositingError::MalformedResponse));
    }

    #[tokio::test]
    async fn swap_empty_url_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/swap"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "output_url": "" })))
            .mount(&server)
            .await;

        let client = FaceSwapClient::new(server.uri());
        let err = client.swap(vec![1], "t").await.unwrap_err();
        assert!(matches!(err, CompositingError::MalformedResponse));
    }
}
