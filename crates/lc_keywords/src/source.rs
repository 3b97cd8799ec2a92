use lc_core::{KeywordCandidate, KeywordProvider};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, error, info};

use crate::filter::{filter_candidates, CityBlocklist};

pub const DEFAULT_REPORT_LIMIT: usize = 50;

/// Raw keyword/volume pairs for a topic, filtered and ranked.
pub struct KeywordSource {
    provider: Arc<dyn KeywordProvider>,
    blocklist: CityBlocklist,
}

impl fmt::Debug for KeywordSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeywordSource")
            .field("provider", &self.provider.name())
            .field("blocklist", &self.blocklist)
            .finish()
    }
}

impl KeywordSource {
    pub fn new(provider: Arc<dyn KeywordProvider>) -> Self {
        Self {
            provider,
            blocklist: CityBlocklist::default(),
        }
    }

    pub fn with_blocklist(mut self, blocklist: CityBlocklist) -> Self {
        self.blocklist = blocklist;
        self
    }

    /// Any provider failure yields an empty list.
    pub async fn fetch_raw_keywords(&self, topic: &str, limit: usize) -> Vec<KeywordCandidate> {
        info!("🔎 Fetching keywords for '{}' from {}", topic, self.provider.name());
        let report = match self.provider.fetch_report(topic, limit).await {
            Ok(report) => report,
            Err(e) => {
                error!("❌ Keyword report for '{}' failed: {}", topic, e);
                return Vec::new();
            }
        };

        let parsed = parse_keyword_rows(&report);
        let total = parsed.len();
        let kept = filter_candidates(parsed, &self.blocklist);
        info!("✅ {} of {} keywords kept after filtering", kept.len(), total);
        kept
    }
}

/// Parse a `phrase;volume` report. The first row is a header.
pub fn parse_keyword_rows(report: &str) -> Vec<KeywordCandidate> {
    let rows: Vec<&str> = report.lines().filter(|line| !line.trim().is_empty()).collect();
    if rows.len() < 2 {
        return Vec::new();
    }

    rows[1..]
        .iter()
        .filter_map(|row| {
            let columns: Vec<&str> = row.split(';').collect();
            if columns.len() != 2 {
                debug!("Skipping malformed keyword row: {}", row);
                return None;
            }
            match columns[1].trim().parse::<u64>() {
                Ok(volume) => Some(KeywordCandidate::new(columns[0].trim(), volume)),
                Err(_) => {
                    debug!("Skipping keyword row with invalid volume: {}", row);
                    None
                }
            }
        })
        .collect()
}
