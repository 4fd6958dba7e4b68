use axum::{
    extract::{Query, State},
    routing::{get, MethodRouter},
    Router,
};
use hl_core::EndpointProfile;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub mod cors;
pub mod handlers;
pub mod state;

pub use state::AppState;

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/api", news_route(EndpointProfile::search()))
        .route("/api/news", news_route(EndpointProfile::headlines()))
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// GET serves the profile, OPTIONS answers the preflight. Other methods get a
/// 405 on strict profiles and are served like GET otherwise.
fn news_route(profile: EndpointProfile) -> MethodRouter<Arc<AppState>> {
    let handler = move |State(state): State<Arc<AppState>>,
                        Query(query): Query<HashMap<String, String>>| {
        handlers::get_news(profile, state, query)
    };

    let route = get(handler.clone()).options(handlers::preflight);
    let route = if profile.strict_methods {
        route.fallback(handlers::method_not_allowed)
    } else {
        route.fallback(handler)
    };
    route.layer(cors::headers(profile.allow_headers))
}

pub async fn serve(addr: SocketAddr, state: AppState) -> hl_core::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("🌐 Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, create_app(state)).await?;
    Ok(())
}

pub mod prelude {
    pub use hl_core::{EndpointProfile, Error, NewsArticle, Result};
    pub use crate::AppState;
}
