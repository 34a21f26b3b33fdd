use std::time::Duration;

use reqwest::Client;

use super::error::SynthesisError;
use super::types::{ImageParams, JobHandle, Prediction, PredictionRequest};

const API_URL: &str = "https://api.replicate.com/v1";

/// Seam over the asynchronous synthesis capability: submit one unit of
/// work, then poll its handle until a terminal status. Implemented by the
/// live client, the mock provider, and test stubs.
#[allow(async_fn_in_trait)]
pub trait SynthesisBackend {
    async fn submit(
        &self,
        prompt: &str,
        params: &ImageParams,
    ) -> Result<JobHandle, SynthesisError>;

    async fn poll(&self, handle: &JobHandle) -> Result<Prediction, SynthesisError>;
}

/// HTTP client for the prediction-based synthesis service.
pub struct ReplicateClient {
    api_token: String,
    client: Client,
    base_url: String,
}

impl ReplicateClient {
    pub fn new(api_token: String) -> Self {
        Self::with_base_url(api_token, API_URL.to_string())
    }

    /// Create a client pointing at a custom base URL (useful for testing).
    pub fn with_base_url(api_token: String, base_url: String) -> Self {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(60))
            .build()
            .expect("failed to build HTTP client");
        Self {
            api_token,
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

impl SynthesisBackend for ReplicateClient {
    async fn submit(
        &self,
        prompt: &str,
        params: &ImageParams,
    ) -> Result<JobHandle, SynthesisError> {
        let body = PredictionRequest::new(prompt, params);
        let response = self
            .client
            .post(format!("{}/predictions", self.base_url))
            .header("Authorization", format!("Token {}", self.api_token))
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(SynthesisError::Submission {
                status: status.as_u16(),
                message,
            });
        }

        let prediction = response.json::<Prediction>().await?;
        Ok(JobHandle(prediction.id))
    }

    async fn poll(&self, handle: &JobHandle) -> Result<Prediction, SynthesisError> {
        let response = self
            .client
            .get(format!("{}/predictions/{handle}", self.base_url))
            .header("Authorization", format!("Token {}", self.api_token))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(SynthesisError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let prediction = response.json::<Prediction>().await?;
        Ok(prediction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synthesis::types::JobStatus;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn submit_returns_handle_and_sends_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/predictions"))
            .and(header("Authorization", "Token test-token"))
            .and(body_partial_json(json!({
                "input": { "prompt": "a prompt", "width": 512, "height": 768 }
            })))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(json!({ "id": "pred_1", "status": "starting" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = ReplicateClient::with_base_url("test-token".into(), server.uri());
        let handle = client
            .submit("a prompt", &ImageParams::default())
            .await
            .unwrap();
        assert_eq!(handle, JobHandle("pred_1".into()));
    }

    #[tokio::test]
    async fn submit_non_2xx_is_submission_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/predictions"))
            .respond_with(ResponseTemplate::new(422).set_body_string("invalid version"))
            .mount(&server)
            .await;

        let client = ReplicateClient::with_base_url("t".into(), server.uri());
        let err = client
            .submit("p", &ImageParams::default())
            .await
            .unwrap_err();
        match err {
            SynthesisError::Submission { status, message } => {
                assert_eq!(status, 422);
                assert_eq!(message, "invalid version");
            }
            other => panic!("expected Submission, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn poll_parses_terminal_prediction() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/predictions/pred_7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "pred_7",
                "status": "succeeded",
                "output": ["https://img.example/out.png"]
            })))
            .mount(&server)
            .await;

        let client = ReplicateClient::with_base_url("t".into(), server.uri());
        let prediction = client.poll(&JobHandle("pred_7".into())).await.unwrap();
        assert_eq!(prediction.status, JobStatus::Succeeded);
        assert_eq!(prediction.first_output(), Some("https://img.example/out.png"));
    }

    #[tokio::test]
    async fn poll_non_2xx_is_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/predictions/gone"))
            .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
            .mount(&server)
            .await;

        let client = ReplicateClient::with_base_url("t".into(), server.uri());
        let err = client.poll(&JobHandle("gone".into())).await.unwrap_err();
        assert!(matches!(err, SynthesisError::Api { status: 404, .. }));
    }

    #[tokio::test]
    async fn transport_failure_is_distinct_from_job_failure() {
        // Point at a server that is no longer listening. A dropped
        // wiremock server returns to a pool and keeps listening, so grab
        // a free port directly and release it instead.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let uri = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);

        let client = ReplicateClient::with_base_url("t".into(), uri);
        let err = client.poll(&JobHandle("p".into())).await.unwrap_err();
        assert!(matches!(err, SynthesisError::Transport(_)));
    }
}
