use lc_core::KeywordCandidate;

pub const MIN_SEARCH_VOLUME: u64 = 10;

/// Cities outside the firm's service region.
pub const DEFAULT_BLOCKED_CITIES: &[&str] = &[
    "berlin",
    "bonn",
    "duisburg",
    "augsburg",
    "aachen",
    "köln",
    "leipzig",
    "stuttgart",
    "bremen",
    "düsseldorf",
    "hannover",
    "kiel",
    "saarbrücken",
    "potsdam",
    "erfurt",
    "mainz",
    "wiesbaden",
    "dortmund",
    "essen",
];

/// Service-region cities. Never blocked, whatever the caller passes in.
pub const EXEMPT_CITIES: &[&str] = &["hamburg", "frankfurt", "münchen", "neumünster"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityBlocklist {
    cities: Vec<String>,
}

impl CityBlocklist {
    pub fn new<I, S>(cities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let cities = cities
            .into_iter()
            .map(|city| city.as_ref().trim().to_lowercase())
            .filter(|city| !city.is_empty() && !EXEMPT_CITIES.contains(&city.as_str()))
            .collect();
        Self { cities }
    }

    /// Case-insensitive substring match against every blocked city.
    pub fn blocks(&self, phrase: &str) -> bool {
        let phrase = phrase.to_lowercase();
        self.cities.iter().any(|city| phrase.contains(city.as_str()))
    }
}

impl Default for CityBlocklist {
    fn default() -> Self {
        Self::new(DEFAULT_BLOCKED_CITIES)
    }
}

/// Drop low-volume and blocked phrases, then sort by volume, highest first.
pub fn filter_candidates(candidates: Vec<KeywordCandidate>, blocklist: &CityBlocklist) -> Vec<KeywordCandidate> {
    let mut kept: Vec<KeywordCandidate> = candidates
        .into_iter()
        .filter(|c| c.search_volume >= MIN_SEARCH_VOLUME && !blocklist.blocks(&c.phrase))
        .collect();
    kept.sort_by(|a, b| b.search_volume.cmp(&a.search_volume));
    kept
}
