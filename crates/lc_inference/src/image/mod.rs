use lc_core::{
    Error, GenerationRequest, ImageModel, ImageQuality, ImageRequest, ImageSize, ImageStyle, Result,
    TextModel,
};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

use crate::prompts;

const SUGGESTION_TEMPERATURE: f32 = 0.5;
const SUGGESTION_MAX_TOKENS: u32 = 100;
const SUGGESTION_COUNT: usize = 5;

/// Visual suggestions and illustration generation for an article.
pub struct ImageService {
    text_model: Arc<dyn TextModel>,
    image_model: Option<Arc<dyn ImageModel>>,
    client: reqwest::Client,
}

impl fmt::Debug for ImageService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageService")
            .field("text_model", &self.text_model.name())
            .field("image_model", &self.image_model.as_ref().map(|m| m.name().to_string()))
            .finish()
    }
}

impl ImageService {
    pub fn new(text_model: Arc<dyn TextModel>, image_model: Option<Arc<dyn ImageModel>>) -> Self {
        Self {
            text_model,
            image_model,
            client: reqwest::Client::new(),
        }
    }

    pub async fn suggest_visuals(&self, topic: &str) -> Result<Vec<String>> {
        let request = GenerationRequest::new(
            prompts::image_suggestion_prompt(topic),
            SUGGESTION_MAX_TOKENS,
            SUGGESTION_TEMPERATURE,
        );
        let response = self.text_model.complete(&request).await?;
        Ok(parse_suggestions(&response))
    }

    /// Returns the generated image URL, or `None` when generation fails.
    pub async fn generate(
        &self,
        prompt: &str,
        style: ImageStyle,
        size: ImageSize,
        quality: ImageQuality,
    ) -> Option<String> {
        let Some(model) = &self.image_model else {
            error!("❌ No image model configured");
            return None;
        };

        let prompt = match style {
            ImageStyle::Realistic => prompts::realistic_image_prompt(prompt),
            ImageStyle::Iconic => prompts::iconic_image_prompt(prompt),
        };
        let request = ImageRequest { prompt, size, quality };

        match model.generate_image(&request).await {
            Ok(url) => {
                info!("🖼️ Image generated: {}", url);
                Some(url)
            }
            Err(e) => {
                error!("❌ Image generation failed: {}", e);
                None
            }
        }
    }

    pub async fn download(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .timeout(Duration::from_secs(60))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Error::Api {
                status: response.status().as_u16(),
                message: format!("image download from {} failed", url),
            });
        }
        Ok(response.bytes().await?.to_vec())
    }
}

fn parse_suggestions(response: &str) -> Vec<String> {
    response
        .lines()
        .map(|line| {
            line.trim()
                .trim_start_matches(|c: char| c.is_ascii_digit() || matches!(c, '.' | ')' | '-' | '•' | '*'))
                .trim()
        })
        .filter(|line| !line.is_empty())
        .take(SUGGESTION_COUNT)
        .map(str::to_string)
        .collect()
}
