use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shobdo_config::gemini::GeminiConfig;

use crate::{LanguageModel, ProviderMetadata, TranslateError};

#[derive(Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
    model: String,
}

impl GeminiClient {
    pub fn new(config: &GeminiConfig) -> Result<Self, TranslateError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self::with_client(client, config))
    }

    pub fn with_client(client: reqwest::Client, config: &GeminiConfig) -> Self {
        Self {
            client,
            api_key: config.api_key.clone(),
            endpoint: config.endpoint(),
            model: config.model.clone(),
        }
    }
}

#[async_trait]
impl LanguageModel for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, TranslateError> {
        if self.api_key.is_empty() {
            return Err(TranslateError::MissingApiKey);
        }

        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(&self.endpoint)
            .header("X-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status.as_u16() == 429 {
            return Err(TranslateError::RateLimitExceeded);
        }

        if status.as_u16() == 401 || status.as_u16() == 403 {
            return Err(TranslateError::AuthenticationError);
        }

        if !status.is_success() {
            return Err(TranslateError::ApiError(format!("HTTP {}", status)));
        }

        let reply: GenerateResponse = response.json().await.map_err(|e| {
            TranslateError::ApiError(format!("Failed to parse response: {}", e))
        })?;

        reply.into_text()
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "Gemini".to_string(),
            model: self.model.clone(),
            requires_api_key: true,
        }
    }
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ReplyPart>,
}

#[derive(Deserialize)]
struct ReplyPart {
    text: Option<String>,
}

impl GenerateResponse {
    /// `candidates[0].content.parts[0].text`
    fn into_text(self) -> Result<String, TranslateError> {
        self.candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next())
            .and_then(|p| p.text)
            .ok_or_else(|| TranslateError::ApiError("No candidate text in response".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};
    use tokio::task::JoinHandle;

    use super::*;

    /// Accept one connection, answer with `status` and `body`, return the raw request
    async fn serve_once(status: &'static str, body: String) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_request(&mut socket).await;
            let response = format!(
                "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            request
        });

        (format!("http://{addr}/v1beta/models"), handle)
    }

    async fn read_request(socket: &mut TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];

        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);

            if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                let head = String::from_utf8_lossy(&buf[..pos]).to_lowercase();
                let len = head
                    .lines()
                    .find_map(|l| l.strip_prefix("content-length:"))
                    .and_then(|v| v.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if buf.len() >= pos + 4 + len {
                    break;
                }
            }
        }

        String::from_utf8_lossy(&buf).into_owned()
    }

    fn client_for(api_url: String, api_key: &str) -> GeminiClient {
        let config = GeminiConfig {
            api_key: api_key.to_string(),
            api_url,
            ..GeminiConfig::default()
        };
        let http = reqwest::Client::builder().no_proxy().build().unwrap();
        GeminiClient::with_client(http, &config)
    }

    #[tokio::test]
    async fn test_generate_returns_candidate_text() {
        let body = serde_json::json!({
            "candidates": [{
                "content": {
                    "parts": [{ "text": "{\"translation\":\"X\"}" }],
                    "role": "model"
                }
            }]
        })
        .to_string();
        let (url, server) = serve_once("200 OK", body).await;
        let client = client_for(url, "test-key");

        let text = client.generate("hello prompt").await.unwrap();
        let request = server.await.unwrap();

        assert_eq!(text, "{\"translation\":\"X\"}");
        assert!(request.starts_with("POST /v1beta/models/gemini-2.0-flash:generateContent"));
        assert!(request.to_lowercase().contains("x-goog-api-key: test-key"));
        assert!(request.contains(r#"{"contents":[{"parts":[{"text":"hello prompt"}]}]}"#));
    }

    #[tokio::test]
    async fn test_generate_missing_key_fails_before_network() {
        let client = client_for("http://127.0.0.1:9/unused".to_string(), "");

        let err = client.generate("prompt").await.unwrap_err();
        assert!(matches!(err, TranslateError::MissingApiKey));
    }

    #[tokio::test]
    async fn test_generate_server_error() {
        let (url, server) = serve_once("500 Internal Server Error", "{}".to_string()).await;
        let client = client_for(url, "test-key");

        let err = client.generate("prompt").await.unwrap_err();
        server.await.unwrap();

        match err {
            TranslateError::ApiError(msg) => assert!(msg.contains("500")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_generate_rate_limited() {
        let (url, server) = serve_once("429 Too Many Requests", "{}".to_string()).await;
        let client = client_for(url, "test-key");

        let err = client.generate("prompt").await.unwrap_err();
        server.await.unwrap();

        assert!(matches!(err, TranslateError::RateLimitExceeded));
    }

    #[tokio::test]
    async fn test_generate_without_candidates() {
        let (url, server) = serve_once("200 OK", r#"{"candidates":[]}"#.to_string()).await;
        let client = client_for(url, "test-key");

        let err = client.generate("prompt").await.unwrap_err();
        server.await.unwrap();

        assert!(matches!(err, TranslateError::ApiError(_)));
    }

    #[test]
    fn test_metadata() {
        let client = client_for("http://localhost".to_string(), "k");
        let meta = client.metadata();
        assert_eq!(meta.name, "Gemini");
        assert_eq!(meta.model, "gemini-2.0-flash");
        assert!(meta.requires_api_key);
    }
}
