//! Placeholder articles returned when nothing usable came back.

use chrono::{DateTime, Utc};

use crate::types::{iso_millis, NewsArticle, RequestParams};

/// The constant part of a fallback article.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FallbackArticle {
    pub title: &'static str,
    pub link: &'static str,
    pub author: &'static str,
    pub full_content: &'static str,
    pub image: &'static str,
    /// Whether the request echo and the `success`/`fallback` flags are included.
    pub annotated: bool,
}

pub const SEARCH_FALLBACK: FallbackArticle = FallbackArticle {
    title: "Latest News Update",
    link: "https://newsapi.org",
    author: "News Service",
    full_content: "Unable to fetch specific news at this time. This is a placeholder article while the system resolves the issue.",
    image: "https://picsum.photos/seed/fallback/640/360.jpg",
    annotated: false,
};

pub const HEADLINES_FALLBACK: FallbackArticle = FallbackArticle {
    title: "Breaking: Latest Technology and Innovation News",
    link: "https://newsapi.org",
    author: "Global News Network",
    full_content: "Stay informed with the latest developments in technology, business, and innovation. Our platform brings you breaking news and in-depth analysis from trusted sources worldwide. From cutting-edge tech breakthroughs to market trends, we keep you connected to what matters most in today's fast-paced digital landscape.",
    image: "https://images.unsplash.com/photo-1504711434969-e33886168f5c?w=800&h=400&fit=crop",
    annotated: true,
};

impl FallbackArticle {
    pub fn render(&self, params: &RequestParams, error: &str, now: DateTime<Utc>) -> NewsArticle {
        let stamp = iso_millis(now);
        let mut article = NewsArticle {
            title: self.title.to_string(),
            link: self.link.to_string(),
            pub_date: stamp.clone(),
            author: self.author.to_string(),
            full_content: self.full_content.to_string(),
            image: self.image.to_string(),
            country: None,
            topic: None,
            success: None,
            fallback: None,
            timestamp: None,
            debug_error: Some(error.to_string()),
        };
        if self.annotated {
            article.country = Some(params.country.clone());
            article.topic = Some(params.topic.clone());
            article.success = Some(false);
            article.fallback = Some(true);
            article.timestamp = Some(stamp);
        }
        article
    }
}
