use std::fmt;

pub mod image;
pub mod models;
pub mod prompts;
pub mod reference;

/// Credentials and endpoints for the hosted models.
#[derive(Clone, Default)]
pub struct Config {
    pub anthropic_api_key: Option<String>,
    pub openai_api_key: Option<String>,
    pub model_name: Option<String>,
    pub anthropic_base_url: Option<String>,
    pub openai_base_url: Option<String>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("anthropic_api_key", &self.anthropic_api_key.as_ref().map(|_| "<redacted>"))
            .field("openai_api_key", &self.openai_api_key.as_ref().map(|_| "<redacted>"))
            .field("model_name", &self.model_name)
            .field("anthropic_base_url", &self.anthropic_base_url)
            .field("openai_base_url", &self.openai_base_url)
            .finish()
    }
}

pub mod prelude {
    pub use super::image::ImageService;
    pub use super::models::{create_image_model, create_model, ModelKind};
    pub use super::reference::{load_reference_source, ReferenceAnalyzer};
    pub use super::Config;
    pub use lc_core::{Error, Result, TextModel};
}

pub use image::ImageService;
pub use models::{create_image_model, create_model, ModelKind};
pub use reference::{load_reference_source, ReferenceAnalyzer};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_debug_redacts_keys() {
        let config = Config {
            anthropic_api_key: Some("sk-ant-secret".to_string()),
            openai_api_key: Some("sk-openai-secret".to_string()),
            ..Config::default()
        };
        let debug = format!("{:?}", config);
        assert!(!debug.contains("secret"));
        assert!(debug.contains("<redacted>"));
    }
}
