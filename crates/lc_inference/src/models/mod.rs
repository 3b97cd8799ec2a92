use std::str::FromStr;
use std::sync::Arc;

use lc_core::{ImageModel, Result, TextModel};

use crate::Config;

pub mod anthropic;
pub mod dalle;
pub mod dummy;
pub(crate) mod sse;

pub use anthropic::AnthropicModel;
pub use dalle::DallEModel;
pub use dummy::DummyModel;

/// Which text model backend to talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelKind {
    Anthropic,
    Dummy,
}

impl FromStr for ModelKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "anthropic" | "claude" => Ok(ModelKind::Anthropic),
            "dummy" => Ok(ModelKind::Dummy),
            _ => Err(format!("Unknown model: {} (available: anthropic, dummy)", s)),
        }
    }
}

pub fn create_model(kind: ModelKind, config: &Config) -> Result<Arc<dyn TextModel>> {
    let model: Arc<dyn TextModel> = match kind {
        ModelKind::Anthropic => {
            let mut model = AnthropicModel::new(config.anthropic_api_key.clone(), config.model_name.clone())?;
            if let Some(url) = &config.anthropic_base_url {
                model = model.with_base_url(url.as_str());
            }
            Arc::new(model)
        }
        ModelKind::Dummy => Arc::new(DummyModel::new()),
    };
    tracing::debug!("Created text model {:?}", model);
    Ok(model)
}

pub fn create_image_model(config: &Config) -> Result<Arc<dyn ImageModel>> {
    let mut model = DallEModel::new(config.openai_api_key.clone())?;
    if let Some(url) = &config.openai_base_url {
        model = model.with_base_url(url.as_str());
    }
    Ok(Arc::new(model))
}
