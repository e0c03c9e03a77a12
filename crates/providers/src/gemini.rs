use anyhow::{anyhow, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use shared::settings::ChatSettings;
use std::time::Duration;

use crate::CompletionProvider;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(45);
const MAX_ERROR_BODY: usize = 800;

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    text: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiCandidatePart {
    text: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiCandidateContent {
    #[serde(default)]
    parts: Vec<GeminiCandidatePart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiCandidateContent>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

impl GeminiResponse {
    /// `candidates[0].content.parts[0].text`, if every segment is present.
    fn first_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next())
            .and_then(|p| p.text)
            .filter(|t| !t.trim().is_empty())
    }
}

pub struct GeminiClient {
    http: Client,
    endpoint: String,
    model: String,
}

impl GeminiClient {
    pub fn new(endpoint: &str, model: &str) -> Result<Self> {
        Ok(Self {
            http: Client::builder().timeout(REQUEST_TIMEOUT).build()?,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            model: model.to_string(),
        })
    }

    pub fn from_settings(settings: &ChatSettings) -> Result<Self> {
        Self::new(&settings.endpoint, &settings.model)
    }

    fn url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.endpoint, self.model
        )
    }
}

#[async_trait::async_trait]
impl CompletionProvider for GeminiClient {
    fn id(&self) -> &'static str {
        "gemini"
    }

    async fn generate(&self, prompt: &str, api_key: &str) -> Result<Option<String>> {
        let req = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: prompt.to_string(),
                }],
            }],
        };
        tracing::debug!(model = %self.model, "sending generateContent request");

        let resp = self
            .http
            .post(self.url())
            .query(&[("key", api_key)])
            .json(&req)
            .send()
            .await?;
        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            let body = body.trim();
            if body.is_empty() {
                return Err(anyhow!("gemini error: {}", status));
            }
            let body = if body.chars().count() > MAX_ERROR_BODY {
                format!("{}...", body.chars().take(MAX_ERROR_BODY).collect::<String>())
            } else {
                body.to_string()
            };
            return Err(anyhow!("gemini error: {}\n{}", status, body));
        }
        let body: GeminiResponse = resp.json().await?;
        Ok(body.first_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const MODEL_PATH: &str = "/v1beta/models/gemini-2.0-flash:generateContent";

    async fn client_for(server: &MockServer) -> GeminiClient {
        GeminiClient::new(&server.uri(), "gemini-2.0-flash").unwrap()
    }

    #[tokio::test]
    async fn test_extracts_first_candidate_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(MODEL_PATH))
            .and(query_param("key", "test-key"))
            .and(body_json(json!({
                "contents": [{ "parts": [{ "text": "hello there" }] }]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [
                    { "content": { "parts": [{ "text": "first" }, { "text": "second" }] } },
                    { "content": { "parts": [{ "text": "other candidate" }] } }
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let text = client.generate("hello there", "test-key").await.unwrap();
        assert_eq!(text.as_deref(), Some("first"));
    }

    #[tokio::test]
    async fn test_missing_segments_yield_none() {
        let bodies = [
            json!({}),
            json!({ "candidates": [] }),
            json!({ "candidates": [{}] }),
            json!({ "candidates": [{ "content": { "parts": [] } }] }),
            json!({ "candidates": [{ "content": { "parts": [{}] } }] }),
            json!({ "candidates": [{ "content": { "parts": [{ "text": "" }] } }] }),
        ];

        for body in bodies {
            let server = MockServer::start().await;
            Mock::given(method("POST"))
                .and(path(MODEL_PATH))
                .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
                .mount(&server)
                .await;

            let client = client_for(&server).await;
            let text = client.generate("prompt", "k").await.unwrap();
            assert!(text.is_none(), "expected no text for {}", body);
        }
    }

    #[tokio::test]
    async fn test_http_error_includes_status_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(MODEL_PATH))
            .respond_with(ResponseTemplate::new(403).set_body_string("API key not valid"))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client.generate("prompt", "bad").await.unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("403"));
        assert!(msg.contains("API key not valid"));
    }

    #[tokio::test]
    async fn test_malformed_body_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(MODEL_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        assert!(client.generate("prompt", "k").await.is_err());
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_error() {
        let server = MockServer::start().await;
        let uri = server.uri();
        drop(server);

        let client = GeminiClient::new(&uri, "gemini-2.0-flash").unwrap();
        assert!(client.generate("prompt", "k").await.is_err());
    }

    #[test]
    fn test_url_trims_trailing_slash() {
        let client = GeminiClient::new("https://example.com/", "gemini-2.0-flash").unwrap();
        assert_eq!(
            client.url(),
            "https://example.com/v1beta/models/gemini-2.0-flash:generateContent"
        );
    }
}
