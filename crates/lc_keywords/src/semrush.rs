use async_trait::async_trait;
use lc_core::{Error, KeywordProvider, Result};
use reqwest::Client;
use std::fmt;
use std::time::Duration;
use url::Url;

const DEFAULT_BASE_URL: &str = "https://api.semrush.com/";
const DEFAULT_DATABASE: &str = "de";
const REPORT_TYPE: &str = "phrase_related";
const EXPORT_COLUMNS: &str = "Ph,Nq";

#[derive(Clone)]
pub struct SemrushConfig {
    pub api_key: Option<String>,
    pub database: String,
    pub base_url: String,
}

impl Default for SemrushConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            database: DEFAULT_DATABASE.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl fmt::Debug for SemrushConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SemrushConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("database", &self.database)
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Related-phrase report from the SEMrush analytics API.
pub struct SemrushProvider {
    client: Client,
    api_key: String,
    database: String,
    base_url: Url,
}

impl fmt::Debug for SemrushProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SemrushProvider")
            .field("api_key", &"<redacted>")
            .field("database", &self.database)
            .field("base_url", &self.base_url.as_str())
            .finish()
    }
}

impl SemrushProvider {
    pub fn new(config: SemrushConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| Error::Config("SEMrush API key is required".to_string()))?;
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| Error::Config(format!("Invalid SEMrush base URL {}: {}", config.base_url, e)))?;
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;
        Ok(Self {
            client,
            api_key,
            database: config.database,
            base_url,
        })
    }

    pub(crate) fn report_url(&self, topic: &str, limit: usize) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("type", REPORT_TYPE)
            .append_pair("key", &self.api_key)
            .append_pair("phrase", topic)
            .append_pair("database", &self.database)
            .append_pair("export_columns", EXPORT_COLUMNS)
            .append_pair("display_limit", &limit.to_string());
        url
    }
}

#[async_trait]
impl KeywordProvider for SemrushProvider {
    fn name(&self) -> &str {
        "SEMrush"
    }

    async fn fetch_report(&self, topic: &str, limit: usize) -> Result<String> {
        let response = self.client.get(self.report_url(topic, limit)).send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(Error::Api {
                status: status.as_u16(),
                message: body.trim().to_string(),
            });
        }
        // Errors such as "ERROR 50 :: NOTHING FOUND" arrive with status 200.
        if body.starts_with("ERROR") {
            return Err(Error::Keywords(body.trim().to_string()));
        }
        Ok(body)
    }
}
