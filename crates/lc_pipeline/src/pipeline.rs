use lc_core::{collect_stream, Error, GenerationRequest, LengthMode, Result, TextModel, Topic};
use lc_inference::prompts::{self, DraftPrompt};
use lc_inference::ReferenceAnalyzer;
use lc_keywords::KeywordResearch;
use std::fmt;
use std::sync::Arc;
use tracing::info;

use crate::config::PipelineConfig;
use crate::logging::StageLogger;
use crate::retry::RetryPolicy;
use crate::session::{SessionContext, Stage};

/// Outline, draft, legal correction, keyword integration and humanization,
/// each one templated call to the text model.
pub struct ArticlePipeline {
    model: Arc<dyn TextModel>,
    reference: ReferenceAnalyzer,
    config: PipelineConfig,
}

impl fmt::Debug for ArticlePipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArticlePipeline")
            .field("model", &self.model.name())
            .field("config", &self.config)
            .finish()
    }
}

impl ArticlePipeline {
    pub fn new(model: Arc<dyn TextModel>, config: PipelineConfig) -> Self {
        Self {
            reference: ReferenceAnalyzer::new(model.clone()),
            model,
            config,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.config.rate_limit_attempts, self.config.rate_limit_delay)
    }

    async fn stream_text(&self, request: &GenerationRequest) -> Result<String> {
        let stream = self.model.stream(request).await?;
        let text = collect_stream(stream).await?;
        let text = text.trim();
        if text.is_empty() {
            return Err(Error::Inference("model returned an empty response".to_string()));
        }
        Ok(text.to_string())
    }

    pub async fn generate_outline(&self, topic: &Topic) -> Result<String> {
        let log = StageLogger::for_stage(Stage::Outline);
        log.info(&format!("📝 Generating outline for '{}'", topic));
        let request = GenerationRequest::new(
            prompts::outline_prompt(topic.as_str()),
            self.config.outline.max_tokens,
            self.config.outline.temperature,
        );
        let outline = self.model.complete(&request).await.map_err(|e| {
            log.error(&format!("❌ Outline generation failed: {}", e));
            e
        })?;
        let outline = outline.trim().to_string();
        log.stats("Outline", &outline);
        Ok(outline)
    }

    /// Streams the draft; a broken stream gets one non-streaming retry with a
    /// larger budget. If that fails too, the stream's error is returned.
    pub async fn generate_draft(
        &self,
        topic: &Topic,
        outline: &str,
        length: Option<LengthMode>,
        reference_information: Option<&str>,
    ) -> Result<String> {
        let log = StageLogger::for_stage(Stage::Draft);
        log.info(&format!("✍️ Writing draft for '{}'", topic));
        if let Some(length) = length {
            let (min, max) = length.word_range();
            log.info(&format!("📏 Target length {}-{} words", min, max));
        }
        if reference_information.is_some() {
            log.info("📚 Using reference information");
        }

        let prompt = prompts::draft_prompt(&DraftPrompt {
            topic: topic.as_str(),
            outline,
            length,
            reference_information,
            tone_reference: &self.config.tone_reference,
        });
        let request = GenerationRequest::new(prompt, self.config.draft.max_tokens, self.config.draft.temperature);

        let stream_error = match self.stream_text(&request).await {
            Ok(draft) => {
                log.stats("Draft", &draft);
                return Ok(draft);
            }
            Err(e) => e,
        };

        log.warn(&format!("⚠️ Streaming failed ({}), retrying without streaming", stream_error));
        let fallback = GenerationRequest {
            max_tokens: self.config.draft_fallback_max_tokens,
            ..request
        };
        match self.model.complete(&fallback).await {
            Ok(draft) if !draft.trim().is_empty() => {
                let draft = draft.trim().to_string();
                log.stats("Draft", &draft);
                Ok(draft)
            }
            Ok(_) => {
                log.error("❌ Fallback returned an empty draft");
                Err(stream_error)
            }
            Err(e) => {
                log.error(&format!("❌ Fallback failed: {}", e));
                Err(stream_error)
            }
        }
    }

    /// Fixes legal errors in place. Any failure leaves the text unchanged.
    pub async fn correct(&self, topic: &Topic, text: &str) -> String {
        let log = StageLogger::for_stage(Stage::LegalCorrection);
        log.info("⚖️ Checking legal accuracy");
        let request = GenerationRequest::new(
            prompts::correction_prompt(topic.as_str(), text),
            self.config.correction.max_tokens,
            self.config.correction.temperature,
        );
        match self.stream_text(&request).await {
            Ok(corrected) => {
                log.stats("Corrected", &corrected);
                if corrected == text {
                    log.info("✅ No corrections needed");
                } else {
                    let delta = corrected.chars().count() as i64 - text.chars().count() as i64;
                    log.info(&format!("🔧 Text corrected ({:+} characters)", delta));
                }
                corrected
            }
            Err(e) => {
                log.warn(&format!("⚠️ Correction failed, keeping draft: {}", e));
                text.to_string()
            }
        }
    }

    /// Weaves the keywords into the text. Identity for an empty list.
    pub async fn integrate_keywords(&self, text: &str, keywords: &[String]) -> String {
        let log = StageLogger::for_stage(Stage::SeoIntegration);
        if keywords.is_empty() {
            log.info("⏭️ No keywords selected, skipping");
            return text.to_string();
        }

        log.info(&format!("🏷️ Integrating {} keywords: {}", keywords.len(), keywords.join(", ")));
        tokio::time::sleep(self.config.seo_pause).await;
        let request = GenerationRequest::new(
            prompts::seo_prompt(text, keywords),
            self.config.seo.max_tokens,
            self.config.seo.temperature,
        );
        match self.retry_policy().run(|| self.stream_text(&request)).await {
            Ok(optimized) => {
                log.stats("SEO", &optimized);
                optimized
            }
            Err(e) => {
                log.warn(&format!("⚠️ Keyword integration failed, keeping text: {}", e));
                text.to_string()
            }
        }
    }

    /// Rewrites the text to read less machine-made. `deep` asks for a
    /// heavier rewrite at a higher temperature.
    pub async fn humanize(&self, text: &str, deep: bool) -> String {
        let log = StageLogger::for_stage(Stage::Humanize);
        let temperature = if deep {
            log.info("🔁 Deep humanization pass");
            self.config.deep_humanize_temperature
        } else {
            log.info("🧑 Humanizing text");
            self.config.humanize.temperature
        };
        let request = GenerationRequest::new(
            prompts::humanize_prompt(text, deep),
            self.config.humanize.max_tokens,
            temperature,
        );
        match self.retry_policy().run(|| self.stream_text(&request)).await {
            Ok(humanized) => {
                log.stats("Humanized", &humanized);
                humanized
            }
            Err(e) => {
                log.warn(&format!("⚠️ Humanization failed, keeping text: {}", e));
                text.to_string()
            }
        }
    }

    /// Condense reference material into the session's reference information.
    pub async fn analyze_reference(&self, session: &mut SessionContext, raw_text: &str) -> Option<String> {
        let topic = session.topic().ok()?.clone();
        let summary = self.reference.analyze(raw_text, topic.as_str()).await;
        session.reference_information = summary.clone();
        summary
    }

    /// Research keywords for the session and start them all out included.
    pub async fn research_keywords(&self, session: &mut SessionContext, research: &KeywordResearch) -> Result<Vec<String>> {
        let search_topic = session.keyword_search_topic()?;
        let keywords = research.keywords_for_topic(&search_topic).await;
        session.set_curated_keywords(keywords.clone());
        Ok(keywords)
    }

    /// Generate an outline for the user to edit before drafting.
    pub async fn prepare_outline(&self, session: &mut SessionContext) -> Result<String> {
        let topic = session.topic()?.clone();
        let outline = self.generate_outline(&topic).await?;
        session.set_generated_outline(outline.clone());
        Ok(outline)
    }

    /// Run all five stages, storing every intermediate text on the session.
    pub async fn run(&self, session: &mut SessionContext) -> Result<String> {
        let topic = session.topic()?.clone();
        info!("🚀 Generating article for '{}'", topic);

        let outline = match session.edited_outline() {
            Some(edited) => {
                StageLogger::for_stage(Stage::Outline).info("📋 Using edited outline");
                edited.to_string()
            }
            None => self.generate_outline(&topic).await?,
        };
        session.outline = Some(outline.clone());
        session.last_stage = Some(Stage::Outline);

        let draft = self
            .generate_draft(&topic, &outline, session.length, session.reference_information.as_deref())
            .await?;
        session.draft = Some(draft.clone());
        session.last_stage = Some(Stage::Draft);

        let corrected = self.correct(&topic, &draft).await;
        session.corrected = Some(corrected.clone());
        session.last_stage = Some(Stage::LegalCorrection);

        let keywords = session.selected_keywords();
        let seo = self.integrate_keywords(&corrected, &keywords).await;
        session.seo = Some(seo.clone());
        session.last_stage = Some(Stage::SeoIntegration);

        let humanized = self.humanize(&seo, false).await;
        session.humanized = Some(humanized.clone());
        session.deep_humanized = false;
        session.last_stage = Some(Stage::Humanize);

        info!("🎉 Article complete: {} words", humanized.split_whitespace().count());
        Ok(humanized)
    }

    /// Deep-humanize the session's finished article and overwrite it.
    pub async fn rehumanize(&self, session: &mut SessionContext) -> Result<String> {
        let current = session
            .humanized
            .clone()
            .ok_or_else(|| Error::Pipeline("no humanized article to rework".to_string()))?;
        let humanized = self.humanize(&current, true).await;
        session.humanized = Some(humanized.clone());
        session.deep_humanized = true;
        Ok(humanized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use futures_util::stream;
    use lc_core::TextStream;
    use std::sync::Mutex;

    /// Streams fail with the scripted errors first, `complete` always answers.
    #[derive(Debug)]
    struct FlakyModel {
        stream_errors: Mutex<Vec<Error>>,
        complete_reply: Option<String>,
        requests: Mutex<Vec<GenerationRequest>>,
    }

    impl FlakyModel {
        fn new(stream_errors: Vec<Error>, complete_reply: Option<&str>) -> Self {
            Self {
                stream_errors: Mutex::new(stream_errors),
                complete_reply: complete_reply.map(str::to_string),
                requests: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl TextModel for FlakyModel {
        fn name(&self) -> &str {
            "Flaky"
        }

        async fn complete(&self, request: &GenerationRequest) -> Result<String> {
            self.requests.lock().unwrap().push(request.clone());
            self.complete_reply
                .clone()
                .ok_or_else(|| Error::Inference("complete failed".to_string()))
        }

        async fn stream(&self, request: &GenerationRequest) -> Result<TextStream> {
            self.requests.lock().unwrap().push(request.clone());
            let mut errors = self.stream_errors.lock().unwrap();
            if !errors.is_empty() {
                return Err(errors.remove(0));
            }
            let chunks: Vec<Result<String>> = vec![Ok("gestreamter ".to_string()), Ok("Text".to_string())];
            Ok(Box::pin(stream::iter(chunks)))
        }
    }

    /// Pads every streamed reply with surrounding whitespace.
    #[derive(Debug)]
    struct WhitespaceModel;

    #[async_trait]
    impl TextModel for WhitespaceModel {
        fn name(&self) -> &str {
            "Whitespace"
        }

        async fn complete(&self, _request: &GenerationRequest) -> Result<String> {
            Ok("gestreamter Text".to_string())
        }

        async fn stream(&self, _request: &GenerationRequest) -> Result<TextStream> {
            let chunks: Vec<Result<String>> = vec![Ok("\n gestreamter ".to_string()), Ok("Text\n\n".to_string())];
            Ok(Box::pin(stream::iter(chunks)))
        }
    }

    fn pipeline(model: Arc<FlakyModel>) -> ArticlePipeline {
        ArticlePipeline::new(model, PipelineConfig::default().without_delays())
    }

    fn topic() -> Topic {
        Topic::new("§ 263 StGB").unwrap()
    }

    #[tokio::test]
    async fn test_draft_falls_back_to_complete() {
        let model = Arc::new(FlakyModel::new(vec![Error::Inference("stream broke".to_string())], Some("Entwurf")));
        let draft = pipeline(model.clone())
            .generate_draft(&topic(), "# Betrug", None, None)
            .await
            .unwrap();
        assert_eq!(draft, "Entwurf");
        let requests = model.requests.lock().unwrap();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].max_tokens, 15_000);
        assert_eq!(requests[1].max_tokens, 20_000);
    }

    #[tokio::test]
    async fn test_stage_outputs_are_trimmed() {
        let model = Arc::new(FlakyModel::new(vec![Error::Inference("stream broke".to_string())], Some("\n  Entwurf \n\n")));
        let pipeline = pipeline(model);
        let draft = pipeline.generate_draft(&topic(), "# Betrug", None, None).await.unwrap();
        assert_eq!(draft, "Entwurf");
        assert_eq!(pipeline.generate_outline(&topic()).await.unwrap(), "Entwurf");
    }

    #[tokio::test]
    async fn test_correction_ignores_trailing_whitespace() {
        let model = Arc::new(WhitespaceModel);
        let pipeline = ArticlePipeline::new(model, PipelineConfig::default().without_delays());
        assert_eq!(pipeline.correct(&topic(), "gestreamter Text").await, "gestreamter Text");
        assert_eq!(pipeline.humanize("Text", false).await, "gestreamter Text");
    }

    #[tokio::test]
    async fn test_draft_returns_stream_error_when_fallback_fails() {
        let model = Arc::new(FlakyModel::new(vec![Error::Inference("stream broke".to_string())], None));
        let err = pipeline(model)
            .generate_draft(&topic(), "# Betrug", None, None)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("stream broke"));
    }

    #[tokio::test]
    async fn test_correction_failure_keeps_input() {
        let model = Arc::new(FlakyModel::new(vec![Error::Api { status: 500, message: "down".to_string() }], None));
        assert_eq!(pipeline(model).correct(&topic(), "Original").await, "Original");
    }

    #[tokio::test]
    async fn test_seo_retries_rate_limits() {
        let model = Arc::new(FlakyModel::new(vec![Error::RateLimited("429".to_string())], None));
        let text = pipeline(model.clone())
            .integrate_keywords("Original", &["betrug anwalt".to_string()])
            .await;
        assert_eq!(text, "gestreamter Text");
        assert_eq!(model.requests.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_seo_gives_up_after_bounded_retries() {
        let errors = (0..5).map(|_| Error::RateLimited("429".to_string())).collect();
        let model = Arc::new(FlakyModel::new(errors, None));
        let text = pipeline(model.clone())
            .integrate_keywords("Original", &["betrug anwalt".to_string()])
            .await;
        assert_eq!(text, "Original");
        assert_eq!(model.requests.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_humanize_does_not_retry_other_errors() {
        let model = Arc::new(FlakyModel::new(vec![Error::Inference("overloaded".to_string())], None));
        assert_eq!(pipeline(model.clone()).humanize("Original", false).await, "Original");
        assert_eq!(model.requests.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_deep_humanize_raises_temperature() {
        let model = Arc::new(FlakyModel::new(vec![], None));
        let pipeline = pipeline(model.clone());
        pipeline.humanize("Text", false).await;
        pipeline.humanize("Text", true).await;
        let requests = model.requests.lock().unwrap();
        assert_eq!(requests[0].temperature, 0.7);
        assert_eq!(requests[1].temperature, 0.9);
    }

    #[tokio::test]
    async fn test_rehumanize_requires_article() {
        let model = Arc::new(FlakyModel::new(vec![], None));
        let pipeline = pipeline(model);
        let mut session = SessionContext::new(topic());
        assert!(pipeline.rehumanize(&mut session).await.is_err());

        session.humanized = Some("Erster Durchgang".to_string());
        assert_eq!(pipeline.rehumanize(&mut session).await.unwrap(), "gestreamter Text");
        assert!(session.deep_humanized);
        assert_eq!(session.humanized.as_deref(), Some("gestreamter Text"));
    }
}
