pub mod error;
pub mod keywords;
pub mod models;
pub mod types;

pub use error::Error;
pub use keywords::KeywordProvider;
pub use models::{collect_stream, ImageModel, TextModel, TextStream};
pub use types::{
    GenerationRequest, ImageQuality, ImageRequest, ImageSize, ImageStyle, KeywordCandidate,
    KeywordSelection, LengthMode, Topic,
};

pub type Result<T> = std::result::Result<T, Error>;
