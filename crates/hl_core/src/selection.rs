//! Picks the first upstream article that satisfies a policy and normalizes it.

use std::fmt;

use chrono::{DateTime, Duration, Utc};

use crate::types::{iso_millis, NewsArticle, RequestParams, UpstreamArticle};

/// Only this many candidates are looked at, in upstream order.
pub const MAX_CANDIDATES: usize = 10;

pub const SEARCH_WINDOW_HOURS: i64 = 4;
pub const HEADLINE_MAX_AGE_HOURS: i64 = 48;

/// Windowed content must be strictly longer than this.
pub const MIN_CONTENT_CHARS: usize = 50;
/// Windowed content shorter than this gets [`LIMITED_CONTENT_NOTICE`] appended.
pub const SHORT_CONTENT_CHARS: usize = 100;

pub const LIMITED_CONTENT_NOTICE: &str = "\n\n[Note: Limited content available for this article. The system will attempt to expand on this topic.]";

/// NewsAPI's marker for articles pulled by the publisher.
pub const REMOVED_MARKER: &str = "[Removed]";

#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    Found(NewsArticle),
    NotFound(String),
}

/// Why a candidate was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    BadDate,
    Stale(DateTime<Utc>),
    ContentTooShort(usize),
    Removed,
    Missing(&'static str),
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::BadDate => write!(f, "unparseable publish date"),
            Rejection::Stale(at) => write!(f, "too old: {}", iso_millis(*at)),
            Rejection::ContentTooShort(len) => write!(f, "content too short: {} characters", len),
            Rejection::Removed => write!(f, "content was removed"),
            Rejection::Missing(field) => write!(f, "missing {}", field),
        }
    }
}

/// Which candidates qualify and how they are normalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionPolicy {
    /// Recent articles with enough body text; used after a time-windowed search.
    Windowed { window: Duration },
    /// Articles with every display field present.
    Complete { max_age: Option<Duration> },
}

impl SelectionPolicy {
    pub fn windowed() -> Self {
        SelectionPolicy::Windowed {
            window: Duration::hours(SEARCH_WINDOW_HOURS),
        }
    }

    pub fn complete() -> Self {
        SelectionPolicy::Complete {
            max_age: Some(Duration::hours(HEADLINE_MAX_AGE_HOURS)),
        }
    }

    pub fn select(
        &self,
        articles: &[UpstreamArticle],
        params: &RequestParams,
        now: DateTime<Utc>,
    ) -> Selection {
        let attempts = articles.len().min(MAX_CANDIDATES);
        for (i, article) in articles.iter().take(MAX_CANDIDATES).enumerate() {
            let title = article.title.as_deref().unwrap_or("<untitled>");
            tracing::debug!("Processing article {}/{}: {}", i + 1, attempts, title);
            match self.check(article, params, now) {
                Ok(found) => {
                    tracing::info!("✅ Article selected: {}", found.title);
                    return Selection::Found(found);
                }
                Err(reason) => tracing::debug!("Skipping article {}: {}", i + 1, reason),
            }
        }

        let reason = match self {
            SelectionPolicy::Windowed { .. } => {
                "No suitable articles found with recent date and sufficient content"
            }
            SelectionPolicy::Complete { .. } => "No valid articles found",
        };
        Selection::NotFound(reason.to_string())
    }

    /// Applies the policy's predicates to a single candidate.
    pub fn check(
        &self,
        article: &UpstreamArticle,
        params: &RequestParams,
        now: DateTime<Utc>,
    ) -> Result<NewsArticle, Rejection> {
        match *self {
            SelectionPolicy::Windowed { window } => check_windowed(article, window, now),
            SelectionPolicy::Complete { max_age } => check_complete(article, max_age, params, now),
        }
    }
}

/// Collapses every whitespace run to a single space and trims the ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Image used when an upstream article has none, seeded by the current time.
pub fn placeholder_image(now: DateTime<Utc>) -> String {
    format!("https://picsum.photos/seed/{}/640/360.jpg", now.timestamp_millis())
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn check_windowed(
    article: &UpstreamArticle,
    window: Duration,
    now: DateTime<Utc>,
) -> Result<NewsArticle, Rejection> {
    let published = article.published().ok_or(Rejection::BadDate)?;
    if published < now - window {
        return Err(Rejection::Stale(published));
    }

    let mut content = collapse_whitespace(article.content.as_deref().unwrap_or_default());
    let len = content.chars().count();
    if len <= MIN_CONTENT_CHARS {
        return Err(Rejection::ContentTooShort(len));
    }
    if len < SHORT_CONTENT_CHARS {
        content.push_str(LIMITED_CONTENT_NOTICE);
    }

    let image = match non_empty(&article.url_to_image) {
        Some(url) => url.to_string(),
        None => {
            let url = placeholder_image(now);
            tracing::debug!("Using placeholder image: {}", url);
            url
        }
    };

    Ok(NewsArticle {
        title: article.title.clone().unwrap_or_default(),
        link: article.url.clone().unwrap_or_default(),
        pub_date: iso_millis(published),
        author: non_empty(&article.author)
            .or(article.source_name())
            .unwrap_or_default()
            .to_string(),
        full_content: content,
        image,
        country: None,
        topic: None,
        success: None,
        fallback: None,
        timestamp: None,
        debug_error: None,
    })
}

fn check_complete(
    article: &UpstreamArticle,
    max_age: Option<Duration>,
    params: &RequestParams,
    now: DateTime<Utc>,
) -> Result<NewsArticle, Rejection> {
    let content = non_empty(&article.content).ok_or(Rejection::Missing("content"))?;
    if content == REMOVED_MARKER {
        return Err(Rejection::Removed);
    }
    let image = non_empty(&article.url_to_image).ok_or(Rejection::Missing("image"))?;
    let title = non_empty(&article.title).ok_or(Rejection::Missing("title"))?;
    non_empty(&article.description).ok_or(Rejection::Missing("description"))?;

    if let Some(max_age) = max_age {
        let published = article.published().ok_or(Rejection::BadDate)?;
        if now - published > max_age {
            return Err(Rejection::Stale(published));
        }
    }

    Ok(NewsArticle {
        title: title.to_string(),
        link: article.url.clone().unwrap_or_default(),
        pub_date: article.published_at.clone().unwrap_or_default(),
        author: article.source_name().unwrap_or_default().to_string(),
        full_content: content.to_string(),
        image: image.to_string(),
        country: Some(params.country.clone()),
        topic: Some(params.topic.clone()),
        success: Some(true),
        fallback: None,
        timestamp: Some(iso_millis(now)),
        debug_error: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::UpstreamSource;

    fn article(hours_ago: i64, content: &str, now: DateTime<Utc>) -> UpstreamArticle {
        UpstreamArticle {
            source: Some(UpstreamSource {
                id: None,
                name: Some("Daily Planet".to_string()),
            }),
            author: Some("Lois Lane".to_string()),
            title: Some("Bridge reopens".to_string()),
            description: Some("The bridge is open again".to_string()),
            url: Some("https://example.com/bridge".to_string()),
            url_to_image: Some("https://example.com/bridge.jpg".to_string()),
            published_at: Some(iso_millis(now - Duration::hours(hours_ago))),
            content: Some(content.to_string()),
        }
    }

    fn long_text() -> String {
        "The city council voted on Tuesday to reopen the bridge after months of repairs. ".repeat(3)
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  a \n\t b   c  "), "a b c");
        assert_eq!(collapse_whitespace(""), "");
    }

    #[test]
    fn test_windowed_picks_first_recent_article() {
        let now = Utc::now();
        let mut second = article(1, &long_text(), now);
        second.title = Some("Second".to_string());
        let articles = vec![article(1, &long_text(), now), second];

        match SelectionPolicy::windowed().select(&articles, &RequestParams::default(), now) {
            Selection::Found(found) => {
                assert_eq!(found.title, "Bridge reopens");
                assert_eq!(found.author, "Lois Lane");
                assert!(!found.full_content.contains(LIMITED_CONTENT_NOTICE));
            }
            other => panic!("expected an article, got {:?}", other),
        }
    }

    #[test]
    fn test_windowed_skips_stale_article() {
        let now = Utc::now();
        let stale = article(5, &long_text(), now);
        let result = SelectionPolicy::windowed().check(&stale, &RequestParams::default(), now);
        assert!(matches!(result, Err(Rejection::Stale(_))));
    }

    #[test]
    fn test_windowed_short_content() {
        let now = Utc::now();
        // 60 characters once the whitespace is collapsed
        let raw = format!("{}   \n\n  {}", "a".repeat(30), "b".repeat(29));
        let mut candidate = article(1, &raw, now);
        candidate.url_to_image = None;
        candidate.author = None;

        let found = SelectionPolicy::windowed()
            .check(&candidate, &RequestParams::default(), now)
            .unwrap();
        let expected = format!("{} {}{}", "a".repeat(30), "b".repeat(29), LIMITED_CONTENT_NOTICE);
        assert_eq!(found.full_content, expected);
        assert_eq!(found.image, placeholder_image(now));
        assert_eq!(found.author, "Daily Planet");
    }

    #[test]
    fn test_windowed_rejects_fifty_characters() {
        let now = Utc::now();
        let candidate = article(1, &"x".repeat(50), now);
        assert_eq!(
            SelectionPolicy::windowed().check(&candidate, &RequestParams::default(), now),
            Err(Rejection::ContentTooShort(50))
        );
    }

    #[test]
    fn test_windowed_rejects_bad_date() {
        let now = Utc::now();
        let mut candidate = article(1, &long_text(), now);
        candidate.published_at = Some("yesterday".to_string());
        assert_eq!(
            SelectionPolicy::windowed().check(&candidate, &RequestParams::default(), now),
            Err(Rejection::BadDate)
        );
    }

    #[test]
    fn test_complete_skips_removed_content() {
        let now = Utc::now();
        let removed = article(1, REMOVED_MARKER, now);
        let mut kept = article(1, "Full story", now);
        kept.title = Some("Kept".to_string());
        let params = RequestParams {
            country: "ke".to_string(),
            topic: "SPORTS".to_string(),
            city: String::new(),
        };

        match SelectionPolicy::complete().select(&[removed, kept], &params, now) {
            Selection::Found(found) => {
                assert_eq!(found.title, "Kept");
                assert_eq!(found.author, "Daily Planet");
                assert_eq!(found.country.as_deref(), Some("ke"));
                assert_eq!(found.topic.as_deref(), Some("SPORTS"));
                assert_eq!(found.success, Some(true));
            }
            other => panic!("expected an article, got {:?}", other),
        }
    }

    #[test]
    fn test_complete_requires_every_field() {
        let now = Utc::now();
        let params = RequestParams::default();
        let policy = SelectionPolicy::complete();

        let mut no_image = article(1, "Body", now);
        no_image.url_to_image = Some(String::new());
        assert_eq!(policy.check(&no_image, &params, now), Err(Rejection::Missing("image")));

        let mut no_description = article(1, "Body", now);
        no_description.description = None;
        assert_eq!(
            policy.check(&no_description, &params, now),
            Err(Rejection::Missing("description"))
        );
    }

    #[test]
    fn test_complete_skips_articles_older_than_two_days() {
        let now = Utc::now();
        let old = article(50, "Body", now);
        let result = SelectionPolicy::complete().check(&old, &RequestParams::default(), now);
        assert!(matches!(result, Err(Rejection::Stale(_))));

        let unbounded = SelectionPolicy::Complete { max_age: None };
        assert!(unbounded.check(&old, &RequestParams::default(), now).is_ok());
    }

    #[test]
    fn test_only_first_ten_candidates_are_scanned() {
        let now = Utc::now();
        let mut articles = vec![article(10, &long_text(), now); MAX_CANDIDATES];
        articles.push(article(1, &long_text(), now));

        let selection = SelectionPolicy::windowed().select(&articles, &RequestParams::default(), now);
        assert_eq!(
            selection,
            Selection::NotFound(
                "No suitable articles found with recent date and sufficient content".to_string()
            )
        );
    }
}
