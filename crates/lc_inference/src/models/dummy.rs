use std::fmt;
use lc_core::{GenerationRequest, Result, TextModel};

use crate::prompts::{TEXT_CLOSE, TEXT_OPEN};

/// Offline stand-in for a hosted model.
///
/// Rewrite prompts get the embedded text echoed back, so a whole pipeline
/// run degrades to an identity transform. Other prompts get their first
/// words back.
pub struct DummyModel;

impl fmt::Debug for DummyModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DummyModel").finish()
    }
}

impl DummyModel {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DummyModel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl TextModel for DummyModel {
    fn name(&self) -> &str {
        "Dummy"
    }

    async fn complete(&self, request: &GenerationRequest) -> Result<String> {
        if let Some(embedded) = embedded_text(&request.prompt) {
            return Ok(embedded.to_string());
        }
        let words: Vec<&str> = request.prompt.split_whitespace().take(20).collect();
        Ok(words.join(" "))
    }
}

fn embedded_text(prompt: &str) -> Option<&str> {
    let start = prompt.find(TEXT_OPEN)? + TEXT_OPEN.len();
    let end = start + prompt[start..].find(TEXT_CLOSE)?;
    Some(prompt[start..end].trim())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompts;

    #[tokio::test]
    async fn test_dummy_model() {
        let model = DummyModel::new();

        let prompt = prompts::humanize_prompt("# § 223 StGB\n\nDie einfache Körperverletzung.", false);
        let result = model.complete(&GenerationRequest::new(prompt, 100, 0.7)).await.unwrap();
        assert_eq!(result, "# § 223 StGB\n\nDie einfache Körperverletzung.");

        let request = GenerationRequest::new("one two three", 100, 0.7);
        assert_eq!(model.complete(&request).await.unwrap(), "one two three");
    }
}
