pub mod config;
pub mod logging;
pub mod pipeline;
pub mod retry;
pub mod session;

pub use config::{PipelineConfig, StageSettings};
pub use logging::{init_logging, StageLogger};
pub use pipeline::ArticlePipeline;
pub use retry::RetryPolicy;
pub use session::{SessionContext, Stage};

pub mod prelude {
    pub use super::{ArticlePipeline, PipelineConfig, SessionContext, Stage};
    pub use lc_core::{Error, LengthMode, Result, Topic};
}
