//! OpenAI-compatible chat-completions provider
//!
//! Works against `api.openai.com` or any server exposing the same
//! `POST {base_url}/chat/completions` contract.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use super::{CoachProvider, CoachRequest};
use crate::error::{TrackerError, TrackerResult};

/// Default endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default model
pub const DEFAULT_MODEL: &str = "gpt-4o";

/// Returned when the model answers with no content
pub const EMPTY_REPLY: &str = "No response from coach";

const CONNECT_TIMEOUT_SECS: u64 = 10;
const REQUEST_TIMEOUT_SECS: u64 = 120;

/// Longest error body echoed into an error message
const ERROR_BODY_LIMIT: usize = 500;

/// Connection settings for the provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
}

impl OpenAiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

/// Coach backed by an OpenAI-compatible endpoint
pub struct OpenAiCoach {
    client: Client,
    config: OpenAiConfig,
}

impl OpenAiCoach {
    pub fn new(config: OpenAiConfig) -> TrackerResult<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &OpenAiConfig {
        &self.config
    }

    fn build_body<'a>(&'a self, request: &'a CoachRequest) -> ChatCompletionRequest<'a> {
        ChatCompletionRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &request.system,
                },
                ChatMessage {
                    role: "user",
                    content: &request.user,
                },
            ],
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        }
    }
}

/// First choice's text, or the placeholder when there is none
fn extract_reply(response: ChatCompletionResponse) -> String {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .filter(|content| !content.trim().is_empty())
        .unwrap_or_else(|| EMPTY_REPLY.to_string())
}

#[async_trait]
impl CoachProvider for OpenAiCoach {
    fn name(&self) -> &str {
        "openai"
    }

    async fn complete(&self, request: &CoachRequest) -> TrackerResult<String> {
        let url = self.config.completions_url();
        debug!(model = %self.config.model, %url, "sending coach request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&self.build_body(request))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let body: String = body.chars().take(ERROR_BODY_LIMIT).collect();
            error!(%status, "coach provider returned an error");
            return Err(TrackerError::Coach(format!("{}: {}", status, body)));
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| TrackerError::Coach(format!("unreadable response: {}", e)))?;
        Ok(extract_reply(parsed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completions_url_trims_slash() {
        let mut config = OpenAiConfig::new("key");
        assert_eq!(config.completions_url(), "https://api.openai.com/v1/chat/completions");

        config.base_url = "http://localhost:11434/v1/".to_string();
        assert_eq!(config.completions_url(), "http://localhost:11434/v1/chat/completions");
    }

    #[test]
    fn test_request_body_shape() {
        let coach = OpenAiCoach::new(OpenAiConfig::new("key")).unwrap();
        let request = CoachRequest::new("be brief", "Total: 5 reps").with_max_tokens(100);

        let body = serde_json::to_value(coach.build_body(&request)).unwrap();
        assert_eq!(body["model"], "gpt-4o");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["content"], "Total: 5 reps");
        assert_eq!(body["max_tokens"], 100);
        assert!(body.get("temperature").is_none());
    }

    #[test]
    fn test_extract_reply() {
        let parsed: ChatCompletionResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"role":"assistant","content":"Keep going"}}]}"#,
        )
        .unwrap();
        assert_eq!(extract_reply(parsed), "Keep going");

        let empty: ChatCompletionResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert_eq!(extract_reply(empty), EMPTY_REPLY);

        let null: ChatCompletionResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"content":null}}]}"#).unwrap();
        assert_eq!(extract_reply(null), EMPTY_REPLY);
    }
}
