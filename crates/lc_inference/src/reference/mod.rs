use lc_core::{Error, GenerationRequest, Result, TextModel};
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

use crate::prompts;

const REFERENCE_TEMPERATURE: f32 = 0.2;
const REFERENCE_MAX_TOKENS: u32 = 2000;
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Condenses arbitrary source material into the legal facts relevant to a topic.
pub struct ReferenceAnalyzer {
    model: Arc<dyn TextModel>,
}

impl fmt::Debug for ReferenceAnalyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReferenceAnalyzer")
            .field("model", &self.model.name())
            .finish()
    }
}

impl ReferenceAnalyzer {
    pub fn new(model: Arc<dyn TextModel>) -> Self {
        Self { model }
    }

    /// Returns `None` for blank input or when the model call fails.
    pub async fn analyze(&self, raw_text: &str, topic: &str) -> Option<String> {
        if raw_text.trim().is_empty() {
            return None;
        }

        let request = GenerationRequest::new(
            prompts::reference_prompt(topic, raw_text),
            REFERENCE_MAX_TOKENS,
            REFERENCE_TEMPERATURE,
        );
        match self.model.complete(&request).await {
            Ok(summary) => {
                info!("📚 Extracted {} characters of reference information", summary.chars().count());
                Some(summary)
            }
            Err(e) => {
                error!("❌ Reference analysis failed: {}", e);
                None
            }
        }
    }
}

/// Read reference material from an `http(s)` URL or a local file.
pub async fn load_reference_source(source: &str) -> Result<String> {
    let source = source.trim();
    if source.is_empty() {
        return Err(Error::Config("reference source must not be empty".to_string()));
    }

    if let Ok(url) = url::Url::parse(source) {
        if matches!(url.scheme(), "http" | "https") {
            info!("🌐 Fetching reference from {}", url);
            let client = reqwest::Client::builder().timeout(FETCH_TIMEOUT).build()?;
            let response = client.get(url).send().await?.error_for_status()?;
            return Ok(response.text().await?);
        }
    }

    info!("📄 Reading reference from {}", source);
    Ok(tokio::fs::read_to_string(Path::new(source)).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::io::Write;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, Default)]
    struct CountingModel {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl TextModel for CountingModel {
        fn name(&self) -> &str {
            "Counting"
        }

        async fn complete(&self, request: &GenerationRequest) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            assert_eq!(request.max_tokens, REFERENCE_MAX_TOKENS);
            if self.fail {
                return Err(Error::Inference("boom".to_string()));
            }
            Ok("§ 263 StGB: Betrug".to_string())
        }
    }

    #[tokio::test]
    async fn test_blank_input_skips_model() {
        let model = Arc::new(CountingModel::default());
        let analyzer = ReferenceAnalyzer::new(model.clone());
        assert_eq!(analyzer.analyze("   \n\t", "Betrug").await, None);
        assert_eq!(model.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_analyze_returns_summary_or_none() {
        let model = Arc::new(CountingModel::default());
        let analyzer = ReferenceAnalyzer::new(model.clone());
        assert_eq!(
            analyzer.analyze("Langer Quelltext", "Betrug").await.as_deref(),
            Some("§ 263 StGB: Betrug")
        );
        assert_eq!(model.calls.load(Ordering::SeqCst), 1);

        let failing = ReferenceAnalyzer::new(Arc::new(CountingModel {
            fail: true,
            ..Default::default()
        }));
        assert_eq!(failing.analyze("Langer Quelltext", "Betrug").await, None);
    }

    #[tokio::test]
    async fn test_load_reference_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "Gesetzestext § 242 StGB").unwrap();
        let text = load_reference_source(file.path().to_str().unwrap()).await.unwrap();
        assert_eq!(text, "Gesetzestext § 242 StGB");

        assert!(load_reference_source("").await.is_err());
        assert!(load_reference_source("/does/not/exist.txt").await.is_err());
    }
}
