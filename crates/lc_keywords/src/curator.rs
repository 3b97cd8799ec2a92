use lc_core::{GenerationRequest, KeywordCandidate, TextModel};
use lc_inference::prompts;
use std::fmt;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::source::{KeywordSource, DEFAULT_REPORT_LIMIT};

pub const DEFAULT_KEYWORD_CAP: usize = 20;
const GROUPING_TEMPERATURE: f32 = 0.3;
const GROUPING_MAX_TOKENS: u32 = 800;

/// Merges near-duplicate phrases through the text model and keeps the best groups.
pub struct KeywordCurator {
    model: Arc<dyn TextModel>,
    cap: usize,
}

impl fmt::Debug for KeywordCurator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeywordCurator")
            .field("model", &self.model.name())
            .field("cap", &self.cap)
            .finish()
    }
}

impl KeywordCurator {
    pub fn new(model: Arc<dyn TextModel>) -> Self {
        Self {
            model,
            cap: DEFAULT_KEYWORD_CAP,
        }
    }

    pub fn with_cap(mut self, cap: usize) -> Self {
        self.cap = cap;
        self
    }

    /// Empty when there is nothing to curate or the model call fails.
    pub async fn curate(&self, topic: &str, candidates: &[KeywordCandidate]) -> Vec<String> {
        if candidates.is_empty() {
            return Vec::new();
        }

        let request = GenerationRequest::new(
            prompts::keyword_grouping_prompt(topic, candidates, self.cap),
            GROUPING_MAX_TOKENS,
            GROUPING_TEMPERATURE,
        );
        let response = match self.model.complete(&request).await {
            Ok(response) => response,
            Err(e) => {
                error!("❌ Keyword grouping failed: {}", e);
                return Vec::new();
            }
        };

        let mut curated: Vec<String> = response
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
        if curated.len() > self.cap {
            warn!("Model returned {} keywords, keeping the first {}", curated.len(), self.cap);
            curated.truncate(self.cap);
        }
        info!("🏷️ {} curated keywords for '{}'", curated.len(), topic);
        curated
    }
}

/// Source and curator chained: topic in, curated phrases out.
#[derive(Debug)]
pub struct KeywordResearch {
    source: KeywordSource,
    curator: KeywordCurator,
    limit: usize,
}

impl KeywordResearch {
    pub fn new(source: KeywordSource, curator: KeywordCurator) -> Self {
        Self {
            source,
            curator,
            limit: DEFAULT_REPORT_LIMIT,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub async fn keywords_for_topic(&self, topic: &str) -> Vec<String> {
        let candidates = self.source.fetch_raw_keywords(topic, self.limit).await;
        if candidates.is_empty() {
            warn!("⚠️ No keywords found for '{}'", topic);
            return Vec::new();
        }
        self.curator.curate(topic, &candidates).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use lc_core::{Error, KeywordProvider, Result};
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug)]
    struct ScriptedModel {
        reply: Option<String>,
        calls: AtomicUsize,
    }

    impl ScriptedModel {
        fn replying(reply: &str) -> Self {
            Self {
                reply: Some(reply.to_string()),
                calls: AtomicUsize::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                reply: None,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl TextModel for ScriptedModel {
        fn name(&self) -> &str {
            "Scripted"
        }

        async fn complete(&self, request: &GenerationRequest) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            assert_eq!(request.max_tokens, GROUPING_MAX_TOKENS);
            self.reply
                .clone()
                .ok_or_else(|| Error::Inference("model unavailable".to_string()))
        }
    }

    #[derive(Debug)]
    struct StaticProvider(&'static str);

    #[async_trait]
    impl KeywordProvider for StaticProvider {
        fn name(&self) -> &str {
            "Static"
        }

        async fn fetch_report(&self, _topic: &str, _limit: usize) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    fn candidates() -> Vec<KeywordCandidate> {
        vec![
            KeywordCandidate::new("körperverletzung", 500),
            KeywordCandidate::new("koerperverletzung", 90),
        ]
    }

    #[tokio::test]
    async fn test_empty_candidates_skip_model() {
        let model = Arc::new(ScriptedModel::replying("egal"));
        let curator = KeywordCurator::new(model.clone());
        assert!(curator.curate("Körperverletzung", &[]).await.is_empty());
        assert_eq!(model.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_curate_splits_lines() {
        let model = Arc::new(ScriptedModel::replying("  körperverletzung \n\n anzeige körperverletzung\n"));
        let curator = KeywordCurator::new(model);
        assert_eq!(
            curator.curate("Körperverletzung", &candidates()).await,
            vec!["körperverletzung", "anzeige körperverletzung"]
        );
    }

    #[tokio::test]
    async fn test_curate_truncates_to_cap() {
        let reply = (1..=25).map(|i| format!("keyword {}", i)).collect::<Vec<_>>().join("\n");
        let curator = KeywordCurator::new(Arc::new(ScriptedModel::replying(&reply)));
        let curated = curator.curate("Körperverletzung", &candidates()).await;
        assert_eq!(curated.len(), DEFAULT_KEYWORD_CAP);
        assert_eq!(curated[19], "keyword 20");

        let small = KeywordCurator::new(Arc::new(ScriptedModel::replying(&reply))).with_cap(3);
        assert_eq!(small.curate("Körperverletzung", &candidates()).await.len(), 3);
    }

    #[tokio::test]
    async fn test_curate_failure_is_empty() {
        let curator = KeywordCurator::new(Arc::new(ScriptedModel::failing()));
        assert!(curator.curate("Körperverletzung", &candidates()).await.is_empty());
    }

    #[tokio::test]
    async fn test_keywords_for_topic() {
        let report = "Keyword;Search Volume\nKörperverletzung;500\nKörperverletzung Berlin;80\nAnzeige;5";
        let source = KeywordSource::new(Arc::new(StaticProvider(report)));
        let model = Arc::new(ScriptedModel::replying("Körperverletzung"));
        let research = KeywordResearch::new(source, KeywordCurator::new(model.clone()));
        assert_eq!(research.keywords_for_topic("Körperverletzung").await, vec!["Körperverletzung"]);

        let empty = KeywordResearch::new(
            KeywordSource::new(Arc::new(StaticProvider("Keyword;Search Volume"))),
            KeywordCurator::new(model.clone()),
        );
        assert!(empty.keywords_for_topic("Körperverletzung").await.is_empty());
        assert_eq!(model.calls.load(Ordering::SeqCst), 1);
    }
}
