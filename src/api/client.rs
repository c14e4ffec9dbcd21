use super::GenerationService;
use crate::models::{ApiErrorBody, GenerateRequest, GenerateResponse, HealthStatus};
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

pub struct LyricsApiClient {
    client: Client,
    base_url: String,
}

impl LyricsApiClient {
    pub fn new(base_url: String, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self::new_with_client(base_url, builder.build()?))
    }

    pub fn new_with_client(base_url: String, client: Client) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn parse_success<Resp: DeserializeOwned>(response: Response) -> Result<Resp> {
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            tracing::error!("Failed to parse API response: {}\nBody: {}", e, body);
            Error::Serialization(e)
        })
    }

    /// Turn a non-success response into an error, preferring the body's `detail`.
    async fn error_from(response: Response) -> Error {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        let detail = serde_json::from_str::<ApiErrorBody>(&body)
            .ok()
            .and_then(|b| b.detail)
            .filter(|d| !d.is_empty());

        tracing::error!("Lyrics API error (status {}): {}", status, body);

        Error::Api {
            status,
            message: detail.unwrap_or_else(|| format!("HTTP error! status: {}", status)),
        }
    }
}

#[async_trait]
impl GenerationService for LyricsApiClient {
    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse> {
        let url = self.url("/generate");
        tracing::info!("Sending request to: {}", url);

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to send request to lyrics API: {}", e);
                e
            })?;

        tracing::info!("Response status: {}", response.status());

        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }

        let generated: GenerateResponse = Self::parse_success(response).await?;
        if let Some(prompt) = &generated.prompt {
            tracing::debug!("Backend prompt ({} chars): {}", prompt.len(), prompt);
        }
        Ok(generated)
    }

    async fn health(&self) -> Result<HealthStatus> {
        let url = self.url("/health");
        tracing::debug!("Checking API health at {}", url);

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }

        Self::parse_success(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn request() -> GenerateRequest {
        GenerateRequest {
            query: "an upbeat synthpop song about night drives".to_string(),
            top_k: 5,
        }
    }

    fn client_for(server: &MockServer) -> LyricsApiClient {
        LyricsApiClient::new(server.uri(), None).unwrap()
    }

    #[tokio::test]
    async fn test_generate_posts_json_and_parses_response() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/generate"))
            .and(header("content-type", "application/json"))
            .and(body_json(serde_json::json!({
                "query": "an upbeat synthpop song about night drives",
                "top_k": 5
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "lyrics": "Verse 1\nNeon on the highway",
                "reasoning": "Examples use short lines",
                "context": "\n### Example 1\nline\n",
                "prompt": "You are a professional lyrics generator."
            })))
            .expect(1)
            .mount(&server)
            .await;

        let response = client_for(&server).generate(&request()).await.unwrap();
        assert_eq!(response.lyrics, "Verse 1\nNeon on the highway");
        assert_eq!(response.reasoning(), Some("Examples use short lines"));
    }

    #[tokio::test]
    async fn test_error_uses_detail_field() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/generate"))
            .respond_with(
                ResponseTemplate::new(500)
                    .set_body_json(serde_json::json!({ "detail": "RAPTOR not initialized" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let err = client_for(&server).generate(&request()).await.unwrap_err();
        match err {
            Error::Api { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "RAPTOR not initialized");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_error_without_detail_falls_back_to_status() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/generate"))
            .respond_with(ResponseTemplate::new(502).set_body_string("<html>bad gateway</html>"))
            .expect(1)
            .mount(&server)
            .await;

        let err = client_for(&server).generate(&request()).await.unwrap_err();
        assert_eq!(err.to_string(), "HTTP error! status: 502");
    }

    #[tokio::test]
    async fn test_error_with_json_missing_detail_falls_back_to_status() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/generate"))
            .respond_with(
                ResponseTemplate::new(422).set_body_json(serde_json::json!({ "error": "x" })),
            )
            .mount(&server)
            .await;

        let err = client_for(&server).generate(&request()).await.unwrap_err();
        assert_eq!(err.to_string(), "HTTP error! status: 422");
    }

    #[tokio::test]
    async fn test_malformed_success_body_is_serialization_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/generate"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = client_for(&server).generate(&request()).await.unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
    }

    #[tokio::test]
    async fn test_trailing_slash_in_base_url_is_ignored() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "healthy",
                "message": "Server running correctly"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = LyricsApiClient::new(format!("{}/", server.uri()), None).unwrap();
        assert_eq!(client.base_url(), server.uri());

        let health = client.health().await.unwrap();
        assert_eq!(health.status, "healthy");
    }

    #[tokio::test]
    async fn test_network_failure_is_http_error() {
        let client = LyricsApiClient::new(
            "http://127.0.0.1:1".to_string(),
            Some(Duration::from_secs(2)),
        )
        .unwrap();
        let err = client.generate(&request()).await.unwrap_err();
        assert!(matches!(err, Error::Http(_)));
    }
}
