//! Route definitions for the prerender service.
//!
//! ## Routes
//!
//! - `GET /health` - Health check (JSON)
//! - everything else - the SPA build, with `index.html` for unknown paths
//!
//! Every request first passes the [`prerender`] middleware, which answers
//! crawlers asking for posts and profiles directly.

mod health;

use axum::Router;
use axum::extract::{Request, State};
use axum::http::header;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use tower_http::services::{ServeDir, ServeFile};

use crate::dispatch::{self, Dispatch};
use crate::state::AppState;

/// Build the complete service router.
pub fn router(state: AppState) -> Router {
    let spa_dir = &state.config.spa_dir;
    let spa = ServeDir::new(spa_dir).fallback(ServeFile::new(spa_dir.join("index.html")));

    Router::new()
        .route("/health", get(health::health_check))
        .fallback_service(spa)
        .layer(middleware::from_fn_with_state(state, prerender))
}

/// Serve a pre-rendered document to crawlers, pass everyone else through.
///
/// `next` is the SPA; its response is returned unmodified.
pub async fn prerender(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let user_agent = request
        .headers()
        .get(header::USER_AGENT)
        .and_then(|value| value.to_str().ok());

    let decision = dispatch::dispatch(
        &state,
        request.method(),
        request.uri().path(),
        user_agent,
    )
    .await;

    match decision {
        Dispatch::Rendered(document) => document.into_response(),
        Dispatch::Fallback(reason) => {
            tracing::debug!(reason = reason.as_str(), "passing request to SPA");
            next.run(request).await
        }
    }
}
