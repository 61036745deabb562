/// LLM Client — the single point of entry for all Claude API calls in the tailor.
///
/// ARCHITECTURAL RULE: No other module may call the Anthropic API directly.
/// All LLM interactions MUST go through this module.
///
/// Model: claude-sonnet-4-6 (hardcoded — do not make configurable to prevent drift)
///
/// One request per run. Failures surface to the caller; there is no retry loop.
use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub mod prompts;

const ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com";
const MESSAGES_PATH: &str = "/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
/// The model used for tailoring.
/// This is intentionally hardcoded to prevent accidental drift.
pub const MODEL: &str = "claude-sonnet-4-6";
const MAX_TOKENS: u32 = 4096;
/// Deterministic output: the same posting and master resume should tailor the same way.
const TEMPERATURE: f32 = 0.0;
const REQUEST_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,
}

#[derive(Debug, Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    system: &'a str,
    messages: Vec<AnthropicMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct AnthropicMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct LlmResponse {
    pub content: Vec<ContentBlock>,
    pub usage: Usage,
}

#[derive(Debug, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type")]
    pub block_type: String,
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

impl LlmResponse {
    /// Extracts the text content from the first text block.
    pub fn text(&self) -> Option<&str> {
        self.content
            .iter()
            .find(|b| b.block_type == "text")
            .and_then(|b| b.text.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct AnthropicError {
    error: AnthropicErrorBody,
}

#[derive(Debug, Deserialize)]
struct AnthropicErrorBody {
    message: String,
}

/// Anything that turns a system prompt plus one user message into reply text.
/// `LlmClient` is the production implementation; tests supply canned replies.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str, system: &str) -> Result<String, LlmError>;
}

/// The single LLM client used by the tailoring pipeline.
/// Wraps the Anthropic Messages API.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    messages_url: String,
}

impl LlmClient {
    pub fn new(api_key: String) -> Result<Self, LlmError> {
        Self::with_base_url(api_key, ANTHROPIC_BASE_URL)
    }

    /// Points the client at another Messages API host (a proxy or a local mock).
    pub fn with_base_url(api_key: String, base_url: &str) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            client,
            api_key,
            messages_url: format!("{}{MESSAGES_PATH}", base_url.trim_end_matches('/')),
        })
    }

    /// Makes a raw call to the Claude API, returning the full response object.
    pub async fn call(&self, prompt: &str, system: &str) -> Result<LlmResponse, LlmError> {
        let request_body = AnthropicRequest {
            model: MODEL,
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
            system,
            messages: vec![AnthropicMessage {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(&self.messages_url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                message: api_error_message(body),
            });
        }

        let llm_response: LlmResponse = response.json().await?;

        debug!(
            "LLM call succeeded: input_tokens={}, output_tokens={}",
            llm_response.usage.input_tokens, llm_response.usage.output_tokens
        );

        Ok(llm_response)
    }
}

#[async_trait]
impl TextGenerator for LlmClient {
    async fn generate(&self, prompt: &str, system: &str) -> Result<String, LlmError> {
        let response = self.call(prompt, system).await?;
        response
            .text()
            .map(str::to_string)
            .ok_or(LlmError::EmptyContent)
    }
}

/// Pulls the human-readable message out of an Anthropic error envelope,
/// falling back to the raw body.
fn api_error_message(body: String) -> String {
    serde_json::from_str::<AnthropicError>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body)
}

/// Strips incidental code fences from a reply and decodes it as JSON.
/// The prompt must instruct the model to return valid JSON.
pub fn parse_json_reply<T: DeserializeOwned>(text: &str) -> Result<T, LlmError> {
    let text = strip_json_fences(text);
    if text.is_empty() {
        return Err(LlmError::EmptyContent);
    }
    serde_json::from_str(text).map_err(LlmError::Parse)
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_json_fences_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_without_tag() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_no_fences() {
        let input = "{\"key\": \"value\"}";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_unterminated_fence() {
        let input = "```json\n{\"key\": 1}\n";
        assert_eq!(strip_json_fences(input), "{\"key\": 1}");
    }

    #[test]
    fn test_parse_json_reply_decodes_fenced_object() {
        let value: serde_json::Value =
            parse_json_reply("  ```json\n{\"company\": \"Acme\"}\n```  ").unwrap();
        assert_eq!(value["company"], "Acme");
    }

    #[test]
    fn test_parse_json_reply_rejects_prose() {
        let result: Result<serde_json::Value, _> =
            parse_json_reply("Sure! Here is your resume: {\"company\": \"Acme\"}");
        assert!(matches!(result, Err(LlmError::Parse(_))));
    }

    #[test]
    fn test_parse_json_reply_empty_is_empty_content() {
        let result: Result<serde_json::Value, _> = parse_json_reply("```json\n```");
        assert!(matches!(result, Err(LlmError::EmptyContent)));
    }

    #[test]
    fn test_llm_response_text_picks_first_text_block() {
        let json = r#"{
            "content": [
                {"type": "thinking", "text": null},
                {"type": "text", "text": "{}"}
            ],
            "usage": {"input_tokens": 10, "output_tokens": 2}
        }"#;
        let response: LlmResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.text(), Some("{}"));
    }

    #[test]
    fn test_api_error_message_prefers_envelope() {
        let body = r#"{"type":"error","error":{"type":"overloaded_error","message":"Overloaded"}}"#;
        assert_eq!(api_error_message(body.to_string()), "Overloaded");
        assert_eq!(api_error_message("bad gateway".to_string()), "bad gateway");
    }

    #[test]
    fn test_request_serializes_temperature_and_model() {
        let request = AnthropicRequest {
            model: MODEL,
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
            system: "sys",
            messages: vec![AnthropicMessage {
                role: "user",
                content: "hi",
            }],
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["model"], "claude-sonnet-4-6");
        assert_eq!(value["max_tokens"], 4096);
        assert_eq!(value["temperature"], 0.0);
        assert_eq!(value["messages"][0]["role"], "user");
    }

    mod http {
        use mockito::Matcher;
        use serde_json::json;

        use super::*;

        fn reply_body(content: serde_json::Value) -> String {
            json!({
                "content": content,
                "usage": {"input_tokens": 12, "output_tokens": 3}
            })
            .to_string()
        }

        #[tokio::test]
        async fn test_generate_sends_headers_and_deterministic_body() {
            let mut server = mockito::Server::new_async().await;
            let mock = server
                .mock("POST", "/v1/messages")
                .match_header("x-api-key", "test-key")
                .match_header("anthropic-version", "2023-06-01")
                .match_body(Matcher::PartialJson(json!({
                    "model": "claude-sonnet-4-6",
                    "max_tokens": 4096,
                    "temperature": 0.0,
                    "system": "be terse",
                    "messages": [{"role": "user", "content": "posting"}]
                })))
                .with_status(200)
                .with_header("content-type", "application/json")
                .with_body(reply_body(json!([{"type": "text", "text": "{\"ok\":true}"}])))
                .expect(1)
                .create_async()
                .await;

            let client = LlmClient::with_base_url("test-key".to_string(), &server.url()).unwrap();
            let text = client.generate("posting", "be terse").await.unwrap();

            assert_eq!(text, "{\"ok\":true}");
            mock.assert_async().await;
        }

        #[tokio::test]
        async fn test_server_error_is_not_retried() {
            let mut server = mockito::Server::new_async().await;
            let mock = server
                .mock("POST", "/v1/messages")
                .with_status(500)
                .with_body(
                    r#"{"type":"error","error":{"type":"api_error","message":"Internal server error"}}"#,
                )
                .expect(1)
                .create_async()
                .await;

            let client = LlmClient::with_base_url("k".to_string(), &server.url()).unwrap();
            let err = client.generate("posting", "system").await.unwrap_err();

            match err {
                LlmError::Api { status, message } => {
                    assert_eq!(status, 500);
                    assert_eq!(message, "Internal server error");
                }
                other => panic!("expected Api error, got {other:?}"),
            }
            mock.assert_async().await;
        }

        #[tokio::test]
        async fn test_non_envelope_error_body_is_passed_through() {
            let mut server = mockito::Server::new_async().await;
            let _mock = server
                .mock("POST", "/v1/messages")
                .with_status(502)
                .with_body("bad gateway")
                .create_async()
                .await;

            let client = LlmClient::with_base_url("k".to_string(), &server.url()).unwrap();
            let err = client.generate("posting", "system").await.unwrap_err();

            assert!(matches!(
                err,
                LlmError::Api { status: 502, ref message } if message == "bad gateway"
            ));
        }

        #[tokio::test]
        async fn test_reply_without_text_block_is_empty_content() {
            let mut server = mockito::Server::new_async().await;
            let _mock = server
                .mock("POST", "/v1/messages")
                .with_status(200)
                .with_header("content-type", "application/json")
                .with_body(reply_body(json!([{"type": "tool_use"}])))
                .create_async()
                .await;

            let client = LlmClient::with_base_url("k".to_string(), &server.url()).unwrap();
            let err = client.generate("posting", "system").await.unwrap_err();

            assert!(matches!(err, LlmError::EmptyContent));
        }

        #[tokio::test]
        async fn test_base_url_trailing_slash_is_tolerated() {
            let mut server = mockito::Server::new_async().await;
            let mock = server
                .mock("POST", "/v1/messages")
                .with_status(200)
                .with_body(reply_body(json!([{"type": "text", "text": "hi"}])))
                .expect(1)
                .create_async()
                .await;

            let base = format!("{}/", server.url());
            let client = LlmClient::with_base_url("k".to_string(), &base).unwrap();
            assert_eq!(client.generate("p", "s").await.unwrap(), "hi");
            mock.assert_async().await;
        }
    }
}
