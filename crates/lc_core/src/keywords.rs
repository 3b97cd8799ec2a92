use async_trait::async_trait;

use crate::Result;

#[async_trait]
pub trait KeywordProvider: Send + Sync {
    /// Returns the name of the keyword data provider
    fn name(&self) -> &str;

    /// Fetch the raw `phrase;volume` report (header row first) for a topic
    async fn fetch_report(&self, topic: &str, limit: usize) -> Result<String>;
}
