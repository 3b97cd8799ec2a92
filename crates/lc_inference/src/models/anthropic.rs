use async_trait::async_trait;
use futures_util::{future, stream, StreamExt};
use lc_core::{Error, GenerationRequest, Result, TextModel, TextStream};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use super::sse::{SseDecoder, SseEvent};

pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";
const DEFAULT_BASE_URL: &str = "https://api.anthropic.com/v1";
const API_VERSION: &str = "2023-06-01";

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    stream: bool,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
#[serde(tag = "type")]
enum ContentBlock {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(other)]
    Other,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(rename = "type")]
    kind: String,
    message: String,
}

#[derive(Deserialize)]
#[serde(tag = "type")]
enum StreamEvent {
    #[serde(rename = "content_block_delta")]
    ContentBlockDelta { delta: Delta },
    #[serde(rename = "error")]
    Failure { error: ErrorBody },
    #[serde(other)]
    Other,
}

#[derive(Deserialize)]
#[serde(tag = "type")]
enum Delta {
    #[serde(rename = "text_delta")]
    Text { text: String },
    #[serde(other)]
    Other,
}

/// Client for the Anthropic Messages API.
pub struct AnthropicModel {
    client: Client,
    api_key: String,
    model_name: String,
    base_url: String,
}

impl fmt::Debug for AnthropicModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnthropicModel")
            .field("client", &"<reqwest::Client>")
            .field("api_key", &"<redacted>")
            .field("model_name", &self.model_name)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl AnthropicModel {
    pub fn new(api_key: Option<String>, model_name: Option<String>) -> Result<Self> {
        let api_key = api_key
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| Error::Config("Anthropic API key is required".to_string()))?;
        // Long drafts stream for minutes; only the connect phase gets a timeout.
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            client,
            api_key,
            model_name: model_name.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    async fn send(&self, request: &GenerationRequest, stream: bool) -> Result<reqwest::Response> {
        let body = MessagesRequest {
            model: &self.model_name,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            messages: vec![ChatMessage {
                role: "user",
                content: &request.prompt,
            }],
            stream,
        };

        let response = self
            .client
            .post(format!("{}/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Anthropic error {}: {}", status, body);
            return Err(api_error(status, &body));
        }
        Ok(response)
    }
}

#[async_trait]
impl TextModel for AnthropicModel {
    fn name(&self) -> &str {
        &self.model_name
    }

    async fn complete(&self, request: &GenerationRequest) -> Result<String> {
        let response = self.send(request, false).await?.json::<MessagesResponse>().await?;

        let text = response
            .content
            .into_iter()
            .filter_map(|block| match block {
                ContentBlock::Text { text } => Some(text),
                ContentBlock::Other => None,
            })
            .collect::<String>();

        if text.trim().is_empty() {
            return Err(Error::Inference("Empty response from Anthropic".to_string()));
        }
        Ok(text)
    }

    async fn stream(&self, request: &GenerationRequest) -> Result<TextStream> {
        let response = self.send(request, true).await?;

        let chunks = response
            .bytes_stream()
            .scan(SseDecoder::default(), |decoder, chunk| {
                let items: Vec<Result<String>> = match chunk {
                    Ok(bytes) => decoder.push(&bytes).iter().filter_map(text_from_event).collect(),
                    Err(e) => vec![Err(Error::from(e))],
                };
                future::ready(Some(stream::iter(items)))
            })
            .flatten();

        Ok(Box::pin(chunks))
    }
}

/// Map a non-success response to a structured error.
pub(crate) fn api_error(status: u16, body: &str) -> Error {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => classify(status, envelope.error),
        Err(_) if status == 429 => Error::RateLimited(body.trim().to_string()),
        Err(_) => Error::Api {
            status,
            message: body.trim().to_string(),
        },
    }
}

fn classify(status: u16, error: ErrorBody) -> Error {
    if status == 429 || error.kind == "rate_limit_error" {
        Error::RateLimited(error.message)
    } else {
        Error::Api {
            status,
            message: format!("{}: {}", error.kind, error.message),
        }
    }
}

fn text_from_event(event: &SseEvent) -> Option<Result<String>> {
    if event.data.is_empty() {
        return None;
    }
    match serde_json::from_str::<StreamEvent>(&event.data) {
        Ok(StreamEvent::ContentBlockDelta {
            delta: Delta::Text { text },
        }) => Some(Ok(text)),
        Ok(StreamEvent::Failure { error }) => Some(Err(classify(200, error))),
        Ok(_) => None,
        Err(e) => {
            tracing::debug!("Skipping unparseable stream event {:?}: {}", event.event, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_requires_api_key() {
        let result = AnthropicModel::new(None, None);
        assert!(matches!(result, Err(Error::Config(_))));

        let result = AnthropicModel::new(Some("  ".to_string()), None);
        assert!(result.is_err());

        let model = AnthropicModel::new(Some("test-key".to_string()), None).unwrap();
        assert_eq!(model.name(), DEFAULT_MODEL);
        assert!(!format!("{:?}", model).contains("test-key"));
    }

    #[test]
    fn test_rate_limit_classification() {
        let body = r#"{"type":"error","error":{"type":"rate_limit_error","message":"Number of request tokens has exceeded your per-minute rate limit"}}"#;
        assert!(api_error(429, body).is_rate_limited());
        assert!(api_error(429, "Too Many Requests").is_rate_limited());

        let overloaded = r#"{"type":"error","error":{"type":"overloaded_error","message":"Overloaded"}}"#;
        let err = api_error(529, overloaded);
        assert!(!err.is_rate_limited());
        assert!(matches!(err, Error::Api { status: 529, .. }));
    }

    #[test]
    fn test_stream_events_to_text() {
        let delta = SseEvent {
            event: Some("content_block_delta".to_string()),
            data: r#"{"type":"content_block_delta","index":0,"delta":{"type":"text_delta","text":"§ 223 StGB"}}"#.to_string(),
        };
        assert_eq!(text_from_event(&delta).unwrap().unwrap(), "§ 223 StGB");

        let ping = SseEvent {
            event: Some("ping".to_string()),
            data: r#"{"type":"ping"}"#.to_string(),
        };
        assert!(text_from_event(&ping).is_none());

        let failure = SseEvent {
            event: Some("error".to_string()),
            data: r#"{"type":"error","error":{"type":"rate_limit_error","message":"slow down"}}"#.to_string(),
        };
        assert!(text_from_event(&failure).unwrap().unwrap_err().is_rate_limited());
    }
}
