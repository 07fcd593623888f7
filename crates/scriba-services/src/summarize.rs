//! Chat-completion summarization client.
//!
//! A transcription is still useful without a summary, so the public entry
//! point is `summarize_or_fallback`: every failure mode of the remote call
//! (missing credential, transport error, bad status, malformed body) is
//! folded into `Summary::Unavailable` and the pipeline carries on. The
//! underlying `summarize` keeps the typed errors so tests can assert on the
//! exact failure path.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Sentinel persisted in place of a summary when the remote call fails.
pub const SUMMARY_UNAVAILABLE: &str = "Summarization failed.";

const SYSTEM_PROMPT: &str =
    "Summarize the following transcript into concise key points.";

#[derive(Debug, thiserror::Error)]
pub enum SummarizeError {
    #[error("summarization API key is not configured")]
    MissingApiKey,

    #[error("summarization request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("summarization API returned status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("could not parse summarization response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("summarization response missing choices[0].message.content")]
    MalformedResponse,
}

/// Summary outcome: generated text, or the degraded sentinel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Summary {
    Generated(String),
    Unavailable,
}

impl Summary {
    pub fn is_degraded(&self) -> bool {
        matches!(self, Summary::Unavailable)
    }

    /// The text to persist: the generated summary or the fixed sentinel.
    pub fn into_text(self) -> String {
        match self {
            Summary::Generated(text) => text,
            Summary::Unavailable => SUMMARY_UNAVAILABLE.to_string(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct SummarizerConfig {
    pub api_url: String,
    pub model: String,
    /// Bearer credential; `None` degrades summarization at first use rather
    /// than failing startup.
    pub api_key: Option<String>,
    pub timeout: Duration,
}

// Chat completions request/response
#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: Option<ChatChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[derive(Clone)]
pub struct SummarizerService {
    config: SummarizerConfig,
    client: reqwest::Client,
}

impl SummarizerService {
    pub fn new(config: SummarizerConfig) -> Result<Self, SummarizeError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self { config, client })
    }

    /// One summarization request, no retry. Success is a 2xx response with
    /// `choices[0].message.content` present.
    pub async fn summarize(&self, text: &str) -> Result<String, SummarizeError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(SummarizeError::MissingApiKey)?;

        let body = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: text.to_string(),
                },
            ],
        };

        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(api_key)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SummarizeError::Status { status, body });
        }

        let raw = response.text().await?;
        let parsed: ChatResponse = serde_json::from_str(&raw)?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .ok_or(SummarizeError::MalformedResponse)
    }

    /// Summarize with graceful degradation: never fails, substituting the
    /// sentinel on any error so the pipeline can proceed to persistence.
    pub async fn summarize_or_fallback(&self, text: &str) -> Summary {
        match self.summarize(text).await {
            Ok(summary) => {
                tracing::info!(summary_chars = summary.len(), "Summarization completed");
                Summary::Generated(summary)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Summarization failed, substituting sentinel");
                Summary::Unavailable
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{bearer_token, body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn service(api_url: String, api_key: Option<&str>) -> SummarizerService {
        SummarizerService::new(SummarizerConfig {
            api_url,
            model: "mistral-7b-instruct".to_string(),
            api_key: api_key.map(String::from),
            timeout: Duration::from_secs(5),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_summarize_extracts_first_choice() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(bearer_token("test-key"))
            .and(body_partial_json(serde_json::json!({
                "model": "mistral-7b-instruct",
                "messages": [{"role": "system"}, {"role": "user", "content": "long transcript"}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [
                    {"message": {"role": "assistant", "content": "- key point"}},
                    {"message": {"role": "assistant", "content": "ignored"}}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let svc = service(format!("{}/v1/chat/completions", server.uri()), Some("test-key"));
        let summary = svc.summarize("long transcript").await.unwrap();
        assert_eq!(summary, "- key point");
    }

    #[tokio::test]
    async fn test_non_success_status_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("upstream broke"))
            .mount(&server)
            .await;

        let svc = service(server.uri(), Some("test-key"));
        let err = svc.summarize("text").await.unwrap_err();
        match err {
            SummarizeError::Status { status, body } => {
                assert_eq!(status.as_u16(), 500);
                assert_eq!(body, "upstream broke");
            }
            other => panic!("expected Status, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_content_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"choices": [{"message": {}}]})),
            )
            .mount(&server)
            .await;

        let svc = service(server.uri(), Some("test-key"));
        let err = svc.summarize("text").await.unwrap_err();
        assert!(matches!(err, SummarizeError::MalformedResponse));
    }

    #[tokio::test]
    async fn test_fallback_substitutes_sentinel_on_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let svc = service(server.uri(), Some("test-key"));
        let summary = svc.summarize_or_fallback("text").await;
        assert!(summary.is_degraded());
        assert_eq!(summary.into_text(), SUMMARY_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_missing_api_key_degrades_without_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let svc = service(server.uri(), None);
        assert!(matches!(
            svc.summarize("text").await.unwrap_err(),
            SummarizeError::MissingApiKey
        ));

        let summary = svc.summarize_or_fallback("text").await;
        assert_eq!(summary, Summary::Unavailable);
        server.verify().await;
    }

    #[tokio::test]
    async fn test_generated_summary_text_passthrough() {
        let summary = Summary::Generated("- point one".to_string());
        assert!(!summary.is_degraded());
        assert_eq!(summary.into_text(), "- point one");
    }
}
