use lc_inference::prompts::REFERENCE_TONE_TEXT;
use std::time::Duration;

/// Sampling settings for one model call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StageSettings {
    pub temperature: f32,
    pub max_tokens: u32,
}

impl StageSettings {
    pub const fn new(temperature: f32, max_tokens: u32) -> Self {
        Self {
            temperature,
            max_tokens,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub outline: StageSettings,
    pub draft: StageSettings,
    /// Token budget for the non-streaming retry after a failed draft stream.
    pub draft_fallback_max_tokens: u32,
    pub correction: StageSettings,
    pub seo: StageSettings,
    pub humanize: StageSettings,
    pub deep_humanize_temperature: f32,
    /// Courtesy pause before the keyword integration call.
    pub seo_pause: Duration,
    pub rate_limit_delay: Duration,
    pub rate_limit_attempts: u32,
    pub tone_reference: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            outline: StageSettings::new(0.4, 2500),
            draft: StageSettings::new(0.4, 15_000),
            draft_fallback_max_tokens: 20_000,
            correction: StageSettings::new(0.2, 20_000),
            seo: StageSettings::new(0.6, 20_000),
            humanize: StageSettings::new(0.7, 20_000),
            deep_humanize_temperature: 0.9,
            seo_pause: Duration::from_secs(3),
            rate_limit_delay: Duration::from_secs(10),
            rate_limit_attempts: 2,
            tone_reference: REFERENCE_TONE_TEXT.to_string(),
        }
    }
}

impl PipelineConfig {
    /// Same settings with every pause removed.
    pub fn without_delays(mut self) -> Self {
        self.seo_pause = Duration::ZERO;
        self.rate_limit_delay = Duration::ZERO;
        self
    }

    pub fn with_tone_reference(mut self, tone_reference: impl Into<String>) -> Self {
        self.tone_reference = tone_reference.into();
        self
    }
}
