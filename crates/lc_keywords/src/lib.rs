pub mod curator;
pub mod filter;
pub mod semrush;
pub mod source;

pub use curator::{KeywordCurator, KeywordResearch, DEFAULT_KEYWORD_CAP};
pub use filter::{filter_candidates, CityBlocklist, MIN_SEARCH_VOLUME};
pub use semrush::{SemrushConfig, SemrushProvider};
pub use source::{parse_keyword_rows, KeywordSource, DEFAULT_REPORT_LIMIT};

pub mod prelude {
    pub use super::{KeywordCurator, KeywordResearch, KeywordSource, SemrushConfig, SemrushProvider};
    pub use lc_core::{KeywordCandidate, Result, Error};
}
