use std::sync::Once;
use tracing_subscriber::EnvFilter;

use crate::session::Stage;

static INIT: Once = Once::new();

/// Prefixes every message with the stage it belongs to.
#[derive(Debug, Clone)]
pub struct StageLogger {
    prefix: String,
}

impl StageLogger {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self { prefix: prefix.into() }
    }

    pub fn for_stage(stage: Stage) -> Self {
        Self::new(stage.to_string())
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn info(&self, message: &str) {
        tracing::info!("{} {}", self.prefix, message);
    }

    pub fn warn(&self, message: &str) {
        tracing::warn!("{} {}", self.prefix, message);
    }

    pub fn error(&self, message: &str) {
        tracing::error!("{} {}", self.prefix, message);
    }

    pub fn debug(&self, message: &str) {
        tracing::debug!("{} {}", self.prefix, message);
    }

    /// Word and character counts of a stage result.
    pub fn stats(&self, label: &str, text: &str) {
        self.info(&format!(
            "📊 {}: {} words, {} characters",
            label,
            text.split_whitespace().count(),
            text.chars().count()
        ));
    }
}

/// Install the global fmt subscriber once. `RUST_LOG` overrides `default_level`.
pub fn init_logging(default_level: &str) {
    if !tracing::dispatcher::has_been_set() {
        INIT.call_once(|| {
            let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
            let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
        });
    }
}
