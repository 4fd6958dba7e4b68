//! The request flow: query the upstream, scan the results, fall back on failure.

use chrono::{DateTime, Duration, Utc};
use tracing::{error, info, warn};

use crate::fallback::{FallbackArticle, HEADLINES_FALLBACK, SEARCH_FALLBACK};
use crate::lookup::{country_name, Category};
use crate::selection::{Selection, SelectionPolicy, SEARCH_WINDOW_HOURS};
use crate::source::{EverythingQuery, HeadlinesQuery, NewsSource};
use crate::types::{NewsArticle, RequestParams, UpstreamResponse};
use crate::{Error, Result};

pub const SEARCH_PAGE_SIZE: u32 = 20;
pub const HEADLINES_PAGE_SIZE: u32 = 10;

/// How the upstream is queried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionStrategy {
    /// Time-windowed full-text search, then top headlines if the search comes back empty.
    SearchThenHeadlines,
    /// Top headlines only.
    HeadlinesOnly,
}

/// Everything that differs between the served endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndpointProfile {
    pub name: &'static str,
    pub strategy: SelectionStrategy,
    pub policy: SelectionPolicy,
    pub fallback: FallbackArticle,
    /// Reject methods other than GET and OPTIONS with 405.
    pub strict_methods: bool,
    pub allow_headers: &'static str,
}

impl EndpointProfile {
    pub fn search() -> Self {
        Self {
            name: "search",
            strategy: SelectionStrategy::SearchThenHeadlines,
            policy: SelectionPolicy::windowed(),
            fallback: SEARCH_FALLBACK,
            strict_methods: false,
            allow_headers: "Content-Type",
        }
    }

    pub fn headlines() -> Self {
        Self {
            name: "headlines",
            strategy: SelectionStrategy::HeadlinesOnly,
            policy: SelectionPolicy::complete(),
            fallback: HEADLINES_FALLBACK,
            strict_methods: true,
            allow_headers: "Content-Type, Authorization",
        }
    }

    pub fn by_name(name: &str) -> Option<Self> {
        match name {
            "search" => Some(Self::search()),
            "headlines" => Some(Self::headlines()),
            _ => None,
        }
    }

    /// Produces the response body. Failures become the profile's fallback article.
    pub async fn respond(
        &self,
        source: &dyn NewsSource,
        params: &RequestParams,
        now: DateTime<Utc>,
    ) -> NewsArticle {
        match self.resolve(source, params, now).await {
            Ok(article) => article,
            Err(e) => {
                error!("❌ [{}] {}", self.name, e);
                self.fallback.render(params, &e.to_string(), now)
            }
        }
    }

    pub async fn resolve(
        &self,
        source: &dyn NewsSource,
        params: &RequestParams,
        now: DateTime<Utc>,
    ) -> Result<NewsArticle> {
        info!(
            "📡 [{}] Fetching news for {}/{}{}",
            self.name,
            params.country,
            params.topic,
            params.city().map(|c| format!(" ({})", c)).unwrap_or_default()
        );

        let response = fetch(source, self.strategy, params, now).await?;
        if !response.is_ok() {
            let message = response.message.unwrap_or_else(|| "Unknown error".to_string());
            return Err(Error::Upstream(message));
        }
        let articles = response
            .articles
            .filter(|articles| !articles.is_empty())
            .ok_or(Error::NoArticles)?;
        info!("Found {} articles in {} response", articles.len(), source.name());

        match self.policy.select(&articles, params, now) {
            Selection::Found(article) => Ok(article),
            Selection::NotFound(reason) => Err(Error::NoQualifyingArticle(reason)),
        }
    }
}

/// Full-text query: a quoted city when given, otherwise the country's display name.
pub fn search_query(params: &RequestParams, category: Category) -> String {
    match params.city() {
        Some(city) => format!("\"{}\" AND {}", city, category),
        None => format!("{} AND {}", country_name(&params.country), category),
    }
}

/// Issues the strategy's calls. At most two, strictly one after the other.
pub async fn fetch(
    source: &dyn NewsSource,
    strategy: SelectionStrategy,
    params: &RequestParams,
    now: DateTime<Utc>,
) -> Result<UpstreamResponse> {
    let category = Category::from_topic(&params.topic);

    match strategy {
        SelectionStrategy::HeadlinesOnly => {
            let query = HeadlinesQuery {
                country: params.country.clone(),
                category,
                page_size: HEADLINES_PAGE_SIZE,
                q: None,
                sort_by_published: true,
            };
            let response = source.top_headlines(&query).await?;
            info!(
                "Top Headlines response status: {}, total results: {:?}",
                response.status, response.total_results
            );
            Ok(response)
        }
        SelectionStrategy::SearchThenHeadlines => {
            let query = EverythingQuery {
                q: search_query(params, category),
                from: now - Duration::hours(SEARCH_WINDOW_HOURS),
                to: now,
                page_size: SEARCH_PAGE_SIZE,
            };
            info!("Search query: {}", query.q);

            match source.everything(&query).await {
                Ok(response) if response.has_results() => {
                    info!(
                        "Everything response status: {}, total results: {:?}",
                        response.status, response.total_results
                    );
                    return Ok(response);
                }
                Ok(response) => info!(
                    "Everything returned status {} with {:?} results, trying Top Headlines",
                    response.status, response.total_results
                ),
                Err(e) => warn!("Everything request failed ({}), trying Top Headlines", e),
            }

            let query = HeadlinesQuery {
                country: params.country.clone(),
                category,
                page_size: SEARCH_PAGE_SIZE,
                q: params.city().map(str::to_string),
                sort_by_published: false,
            };
            let response = source.top_headlines(&query).await?;
            info!(
                "Top Headlines response status: {}, total results: {:?}",
                response.status, response.total_results
            );
            Ok(response)
        }
    }
}
