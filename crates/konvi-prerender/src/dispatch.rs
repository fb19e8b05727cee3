//! Per-request decision between a pre-rendered document and the SPA.
//!
//! 1. Non-crawlers go straight to the SPA, without touching the store.
//! 2. Crawlers asking for `/post/{id}` or `/profile/{id}` get a rendered
//!    document when the entity exists.
//! 3. Everything else, including render failures, falls back to the SPA.

use axum::http::Method;

use crate::classify::{Resource, classify_path, is_crawler};
use crate::render::{self, Document, RenderOutcome};
use crate::state::AppState;

/// What to answer a request with.
#[derive(Debug)]
pub enum Dispatch {
    /// Serve this document.
    Rendered(Document),
    /// Hand the request to the SPA.
    Fallback(FallbackReason),
}

/// Why a request was handed to the SPA.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    /// The user agent is not a known crawler.
    NotCrawler,
    /// Only GET and HEAD are pre-rendered.
    Method,
    /// The path is not a renderable resource.
    NoRoute,
    /// The resource does not exist in the store.
    NotFound,
    /// Fetching or rendering failed.
    Failed,
}

impl FallbackReason {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotCrawler => "not_crawler",
            Self::Method => "method",
            Self::NoRoute => "no_route",
            Self::NotFound => "not_found",
            Self::Failed => "failed",
        }
    }
}

/// Decide how to answer a request.
///
/// Never fails: store errors are logged and turned into
/// [`FallbackReason::Failed`].
pub async fn dispatch(
    state: &AppState,
    method: &Method,
    path: &str,
    user_agent: Option<&str>,
) -> Dispatch {
    if !is_crawler(
        user_agent.unwrap_or_default(),
        &state.config.crawler_signatures,
    ) {
        return Dispatch::Fallback(FallbackReason::NotCrawler);
    }

    if method != Method::GET && method != Method::HEAD {
        return Dispatch::Fallback(FallbackReason::Method);
    }

    let Some(resource) = classify_path(path) else {
        return Dispatch::Fallback(FallbackReason::NoRoute);
    };

    let outcome = match resource {
        Resource::Post(id) => render::post::render(state, id).await,
        Resource::Profile(id) => render::profile::render(state, id).await,
    };

    match outcome {
        Ok(RenderOutcome::Rendered(document)) => {
            tracing::debug!(path = %path, "serving pre-rendered document");
            Dispatch::Rendered(document)
        }
        Ok(RenderOutcome::NotFound) => Dispatch::Fallback(FallbackReason::NotFound),
        Err(err) => {
            tracing::error!(error = %err, path = %path, "prerender failed");
            Dispatch::Fallback(FallbackReason::Failed)
        }
    }
}
