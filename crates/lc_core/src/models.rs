use async_trait::async_trait;
use futures_util::stream::{self, Stream, StreamExt};
use std::fmt;
use std::pin::Pin;

use crate::types::{GenerationRequest, ImageRequest};
use crate::Result;

/// Incremental text chunks as delivered by a streaming model call.
pub type TextStream = Pin<Box<dyn Stream<Item = Result<String>> + Send>>;

#[async_trait]
pub trait TextModel: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    /// Generate the whole response in one call
    async fn complete(&self, request: &GenerationRequest) -> Result<String>;

    /// Generate the response as a stream of text chunks.
    ///
    /// Models without a streaming transport fall back to a single chunk.
    async fn stream(&self, request: &GenerationRequest) -> Result<TextStream> {
        let text = self.complete(request).await?;
        Ok(Box::pin(stream::once(async move { Ok(text) })))
    }
}

#[async_trait]
pub trait ImageModel: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    /// Generate an image and return the URL it is served from
    async fn generate_image(&self, request: &ImageRequest) -> Result<String>;
}

/// Drain a text stream into one string, failing on the first broken chunk.
pub async fn collect_stream(mut stream: TextStream) -> Result<String> {
    let mut text = String::new();
    let mut reported = 0;
    while let Some(chunk) = stream.next().await {
        text.push_str(&chunk?);
        if text.len() - reported >= 1000 {
            reported = text.len();
            tracing::debug!("  ... {} characters generated", text.chars().count());
        }
    }
    Ok(text)
}
