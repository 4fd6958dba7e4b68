use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use hl_core::{EndpointProfile, NewsArticle, RequestParams};
use serde_json::json;

use crate::AppState;

/// Always answers 200; upstream failures come back as the profile's fallback article.
pub async fn get_news(
    profile: EndpointProfile,
    state: Arc<AppState>,
    query: HashMap<String, String>,
) -> Json<NewsArticle> {
    let params = RequestParams::from_query(&query);
    let article = profile.respond(state.source.as_ref(), &params, Utc::now()).await;
    Json(article)
}

pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

pub async fn method_not_allowed() -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(json!({ "error": "Method not allowed" })),
    )
}

pub async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}
