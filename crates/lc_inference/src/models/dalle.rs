use async_trait::async_trait;
use lc_core::{Error, ImageModel, ImageRequest, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const IMAGE_MODEL: &str = "dall-e-3";

#[derive(Serialize)]
struct ImageGenerationRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    size: &'a str,
    quality: &'a str,
    n: u32,
}

#[derive(Deserialize)]
struct ImageGenerationResponse {
    data: Vec<ImageData>,
}

#[derive(Deserialize)]
struct ImageData {
    url: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
    #[serde(rename = "type")]
    kind: Option<String>,
}

pub struct DallEModel {
    client: Client,
    api_key: String,
    base_url: String,
}

impl fmt::Debug for DallEModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DallEModel")
            .field("client", &"<reqwest::Client>")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl DallEModel {
    pub fn new(api_key: Option<String>) -> Result<Self> {
        let api_key = api_key
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| Error::Config("OpenAI API key is required".to_string()))?;
        let client = Client::builder().timeout(Duration::from_secs(120)).build()?;
        Ok(Self {
            client,
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}

#[async_trait]
impl ImageModel for DallEModel {
    fn name(&self) -> &str {
        IMAGE_MODEL
    }

    async fn generate_image(&self, request: &ImageRequest) -> Result<String> {
        let body = ImageGenerationRequest {
            model: IMAGE_MODEL,
            prompt: &request.prompt,
            size: request.size.as_str(),
            quality: request.quality.as_str(),
            n: 1,
        };

        let response = self
            .client
            .post(format!("{}/images/generations", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(api_error(status, &body));
        }

        let response = response.json::<ImageGenerationResponse>().await?;
        response
            .data
            .into_iter()
            .find_map(|image| image.url)
            .ok_or_else(|| Error::Inference("Image response contained no URL".to_string()))
    }
}

fn api_error(status: u16, body: &str) -> Error {
    let message = serde_json::from_str::<ErrorEnvelope>(body)
        .map(|envelope| match envelope.error.kind {
            Some(kind) => format!("{}: {}", kind, envelope.error.message),
            None => envelope.error.message,
        })
        .unwrap_or_else(|_| body.trim().to_string());
    if status == 429 {
        Error::RateLimited(message)
    } else {
        Error::Api { status, message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requires_api_key() {
        assert!(DallEModel::new(None).is_err());
        assert!(DallEModel::new(Some("sk-test".to_string())).is_ok());
    }

    #[test]
    fn test_api_error_mapping() {
        let body = r#"{"error":{"message":"Your request was rejected","type":"invalid_request_error"}}"#;
        match api_error(400, body) {
            Error::Api { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "invalid_request_error: Your request was rejected");
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(api_error(429, "{}").is_rate_limited());
    }
}
