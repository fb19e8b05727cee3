//! Complete HTML documents with Open Graph and Twitter Card metadata.

use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use maud::{DOCTYPE, Markup, PreEscaped, html};

use crate::config::Config;
use crate::escape::escape_html;

/// Content type of every rendered document.
pub const CONTENT_TYPE: &str = "text/html; charset=utf-8";

/// Page-level fields produced by a renderer.
#[derive(Debug, Clone)]
pub struct PageMeta {
    /// Page title without the site suffix. `None` uses the site name.
    pub title: Option<String>,
    pub description: String,
    /// Site-relative canonical path, e.g. `/post/abc`. Defaults to `/`.
    pub path: Option<String>,
    /// Absolute preview image URL. Defaults to the site logo.
    pub image: Option<String>,
    /// Body markup, inserted as is.
    pub body: Markup,
}

/// A rendered HTML document, ready to be served.
#[derive(Debug, Clone)]
pub struct Document {
    html: String,
}

impl Document {
    pub fn as_str(&self) -> &str {
        &self.html
    }

    pub fn into_string(self) -> String {
        self.html
    }
}

impl IntoResponse for Document {
    fn into_response(self) -> Response {
        let mut headers = HeaderMap::new();

        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(CONTENT_TYPE));
        // The same URL serves the SPA to everyone else.
        headers.insert(header::VARY, HeaderValue::from_static("User-Agent"));
        headers.insert(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        );

        (StatusCode::OK, headers, self.html).into_response()
    }
}

/// Build a full HTML document from page metadata.
///
/// maud escapes every interpolated value. The canonical URL inside the
/// redirect script is escaped explicitly since script contents are raw text.
pub fn build_document(config: &Config, meta: PageMeta) -> Document {
    let full_title = match meta.title.as_deref().filter(|t| !t.is_empty()) {
        Some(title) => format!("{title} — {}", config.brand),
        None => config.site_name.clone(),
    };
    let canonical = format!(
        "{}{}",
        config.site_url,
        meta.path.as_deref().filter(|p| !p.is_empty()).unwrap_or("/")
    );
    let image = meta
        .image
        .filter(|i| !i.is_empty())
        .unwrap_or_else(|| format!("{}{}", config.site_url, config.default_image_path));

    let markup = html! {
        (DOCTYPE)
        html lang="uk" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (full_title) }
                meta name="description" content=(meta.description);

                // Open Graph
                meta property="og:type" content="article";
                meta property="og:title" content=(full_title);
                meta property="og:description" content=(meta.description);
                meta property="og:url" content=(canonical);
                meta property="og:image" content=(image);

                // Twitter Card
                meta name="twitter:card" content="summary";
                meta name="twitter:title" content=(full_title);
                meta name="twitter:description" content=(meta.description);

                link rel="canonical" href=(canonical);
                script { (redirect_guard(&config.redirect_guard_pattern, &canonical)) }
            }
            body {
                (meta.body)
            }
        }
    };

    Document {
        html: markup.into_string(),
    }
}

/// Inline script sending script-capable visitors that aren't crawlers to the SPA.
fn redirect_guard(pattern: &str, canonical: &str) -> PreEscaped<String> {
    PreEscaped(format!(
        "if(!/{pattern}/i.test(navigator.userAgent)){{window.location.href=\"{}\";}}",
        escape_html(canonical)
    ))
}
