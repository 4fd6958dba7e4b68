use std::collections::HashMap;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// ISO-8601 in UTC with millisecond precision, e.g. `2024-05-01T08:00:00.000Z`.
pub fn iso_millis(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpstreamSource {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// An article exactly as NewsAPI returns it. Every field is untrusted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpstreamArticle {
    #[serde(default)]
    pub source: Option<UpstreamSource>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub url_to_image: Option<String>,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

impl UpstreamArticle {
    pub fn source_name(&self) -> Option<&str> {
        self.source.as_ref().and_then(|s| s.name.as_deref())
    }

    pub fn published(&self) -> Option<DateTime<Utc>> {
        self.published_at
            .as_deref()
            .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
            .map(|at| at.with_timezone(&Utc))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpstreamResponse {
    pub status: String,
    #[serde(default)]
    pub total_results: Option<u64>,
    #[serde(default)]
    pub articles: Option<Vec<UpstreamArticle>>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl UpstreamResponse {
    pub fn ok(articles: Vec<UpstreamArticle>) -> Self {
        Self {
            status: "ok".to_string(),
            total_results: Some(articles.len() as u64),
            articles: Some(articles),
            code: None,
            message: None,
        }
    }

    pub fn error(code: &str, message: &str) -> Self {
        Self {
            status: "error".to_string(),
            total_results: None,
            articles: None,
            code: Some(code.to_string()),
            message: Some(message.to_string()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }

    /// True when the response is worth scanning without asking another endpoint.
    pub fn has_results(&self) -> bool {
        self.is_ok()
            && self.total_results != Some(0)
            && self.articles.as_ref().is_some_and(|a| !a.is_empty())
    }
}

/// The handler's output contract. Optional fields are left out of the body when unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsArticle {
    pub title: String,
    pub link: String,
    #[serde(rename = "pubDate")]
    pub pub_date: String,
    pub author: String,
    pub full_content: String,
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug_error: Option<String>,
}

/// Query parameters after defaulting.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RequestParams {
    #[serde(default = "default_country")]
    pub country: String,
    #[serde(default = "default_topic")]
    pub topic: String,
    #[serde(default)]
    pub city: String,
}

fn default_country() -> String {
    "us".to_string()
}

fn default_topic() -> String {
    "general".to_string()
}

impl Default for RequestParams {
    fn default() -> Self {
        Self {
            country: default_country(),
            topic: default_topic(),
            city: String::new(),
        }
    }
}

impl RequestParams {
    /// Defaults apply only to absent keys; an explicitly empty value is kept.
    pub fn from_query(query: &HashMap<String, String>) -> Self {
        let defaults = Self::default();
        Self {
            country: query.get("country").cloned().unwrap_or(defaults.country),
            topic: query.get("topic").cloned().unwrap_or(defaults.topic),
            city: query.get("city").cloned().unwrap_or(defaults.city),
        }
    }

    pub fn city(&self) -> Option<&str> {
        let city = self.city.trim();
        (!city.is_empty()).then_some(city)
    }
}
