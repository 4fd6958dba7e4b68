use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use hl_core::{EverythingQuery, Error, HeadlinesQuery, NewsSource, Result, UpstreamResponse};
use reqwest::Client;
use url::Url;

use crate::keys::KeyRing;

pub const DEFAULT_BASE_URL: &str = "https://newsapi.org/v2";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(8);

#[derive(Debug, Clone)]
pub struct NewsApiConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for NewsApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: concat!("hl-proxy/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

pub struct NewsApiClient {
    client: Client,
    base_url: String,
    keys: KeyRing,
}

impl fmt::Debug for NewsApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewsApiClient")
            .field("client", &"<reqwest::Client>")
            .field("base_url", &self.base_url)
            .field("keys", &self.keys)
            .finish()
    }
}

impl NewsApiClient {
    pub fn new(config: NewsApiConfig, keys: KeyRing) -> Result<Self> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        Url::parse(&base_url).map_err(|e| Error::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if config.timeout.is_zero() {
            return Err(Error::Config("upstream timeout must be greater than zero".to_string()));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent)
            .build()?;
        Ok(Self {
            client,
            base_url,
            keys,
        })
    }

    /// Endpoint URL with the query parameters but without credentials.
    pub fn endpoint_url(&self, path: &str, params: &[(&'static str, String)]) -> Result<Url> {
        let url = format!("{}/{}", self.base_url, path);
        Url::parse_with_params(&url, params.iter().map(|(k, v)| (*k, v.as_str())))
            .map_err(|e| Error::InvalidUrl(format!("{}: {}", url, e)))
    }

    async fn get(&self, path: &str, params: Vec<(&'static str, String)>) -> Result<UpstreamResponse> {
        let mut url = self.endpoint_url(path, &params)?;
        tracing::debug!("GET {}", url);
        url.query_pairs_mut().append_pair("apiKey", self.keys.next_key());

        // reqwest errors carry the request URL, which now includes the key.
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::Http(e.without_url()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::Http(e.without_url()))?;

        // NewsAPI reports most failures as a JSON body with `status: "error"`.
        match serde_json::from_str::<UpstreamResponse>(&body) {
            Ok(parsed) => Ok(parsed),
            Err(e) if status.is_success() => Err(e.into()),
            Err(_) => Err(Error::Status(status.as_u16())),
        }
    }
}

#[async_trait]
impl NewsSource for NewsApiClient {
    fn name(&self) -> &str {
        "NewsAPI"
    }

    async fn everything(&self, query: &EverythingQuery) -> Result<UpstreamResponse> {
        self.get("everything", query.params()).await
    }

    async fn top_headlines(&self, query: &HeadlinesQuery) -> Result<UpstreamResponse> {
        self.get("top-headlines", query.params()).await
    }
}
