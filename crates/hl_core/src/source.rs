use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::lookup::Category;
use crate::types::{iso_millis, UpstreamResponse};
use crate::Result;

/// `GET /everything`: full-text search over a time window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EverythingQuery {
    pub q: String,
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
    pub page_size: u32,
}

impl EverythingQuery {
    pub fn params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("q", self.q.clone()),
            ("from", iso_millis(self.from)),
            ("to", iso_millis(self.to)),
            ("language", "en".to_string()),
            ("sortBy", "publishedAt".to_string()),
            ("pageSize", self.page_size.to_string()),
        ]
    }
}

/// `GET /top-headlines`: the current headlines for a country and category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadlinesQuery {
    pub country: String,
    pub category: Category,
    pub page_size: u32,
    pub q: Option<String>,
    pub sort_by_published: bool,
}

impl HeadlinesQuery {
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("country", self.country.clone()),
            ("category", self.category.to_string()),
            ("pageSize", self.page_size.to_string()),
        ];
        if let Some(q) = &self.q {
            params.push(("q", q.clone()));
        }
        if self.sort_by_published {
            params.push(("sortBy", "publishedAt".to_string()));
        }
        params
    }
}

/// An upstream news API. Implementations attach credentials themselves.
#[async_trait]
pub trait NewsSource: Send + Sync {
    /// Returns the name of the upstream service
    fn name(&self) -> &str;

    /// Full-text search constrained to a time window
    async fn everything(&self, query: &EverythingQuery) -> Result<UpstreamResponse>;

    /// Top headlines for a country and category
    async fn top_headlines(&self, query: &HeadlinesQuery) -> Result<UpstreamResponse>;
}
