//! Application configuration loaded from environment variables.

use std::path::PathBuf;

/// Remote store holding the `posts` and `users` trees.
const DEFAULT_STORE_URL: &str =
    "https://poetry-blog-ff72f-default-rtdb.europe-west1.firebasedatabase.app";

/// Public origin of the SPA, used for canonical and OG URLs.
const DEFAULT_SITE_URL: &str = "https://konvi.space";

const DEFAULT_SITE_NAME: &str = "Поетична платформа KonVi";

const DEFAULT_BRAND: &str = "KonVi";

const DEFAULT_IMAGE_PATH: &str = "/logo.webp";

/// User-agent fragments of crawlers and link-preview fetchers (lowercase).
pub const DEFAULT_CRAWLER_SIGNATURES: [&str; 10] = [
    "googlebot",
    "bingbot",
    "yandex",
    "duckduckbot",
    "facebookexternalhit",
    "twitterbot",
    "linkedinbot",
    "whatsapp",
    "telegrambot",
    "slackbot",
];

/// JavaScript regex source used by the in-page redirect guard. Clients that
/// execute scripts and don't match it are sent on to the SPA.
pub const REDIRECT_GUARD_PATTERN: &str = "bot|crawler|spider|googlebot|bingbot|yandex";

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address (e.g., "0.0.0.0:8788").
    pub bind_addr: String,

    /// Base URL of the JSON store. Reads go to `{store_url}/{path}.json`.
    pub store_url: String,

    /// Public site URL without a trailing slash.
    pub site_url: String,

    /// Page title used when a document has no title of its own.
    pub site_name: String,

    /// Short name appended to document titles ("{title} — {brand}").
    pub brand: String,

    /// Site-relative path of the default preview image.
    pub default_image_path: String,

    /// Lowercase user-agent fragments that identify crawlers.
    pub crawler_signatures: Vec<String>,

    /// Regex source for the client-side redirect guard.
    pub redirect_guard_pattern: String,

    /// Directory holding the SPA build served to everyone else.
    pub spa_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8788".to_string(),
            store_url: DEFAULT_STORE_URL.to_string(),
            site_url: DEFAULT_SITE_URL.to_string(),
            site_name: DEFAULT_SITE_NAME.to_string(),
            brand: DEFAULT_BRAND.to_string(),
            default_image_path: DEFAULT_IMAGE_PATH.to_string(),
            crawler_signatures: DEFAULT_CRAWLER_SIGNATURES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            redirect_guard_pattern: REDIRECT_GUARD_PATTERN.to_string(),
            spa_dir: PathBuf::from("dist"),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// All variables are optional and fall back to the production values:
    /// - `PRERENDER_BIND_ADDR`: Server bind address (default: "0.0.0.0:8788")
    /// - `PRERENDER_STORE_URL`: JSON store base URL
    /// - `PRERENDER_SITE_URL`: Public site URL (default: "https://konvi.space")
    /// - `PRERENDER_SITE_NAME`: Fallback page title
    /// - `PRERENDER_BRAND`: Title suffix (default: "KonVi")
    /// - `PRERENDER_DEFAULT_IMAGE`: Default OG image path (default: "/logo.webp")
    /// - `PRERENDER_CRAWLERS`: Comma-separated crawler signatures
    /// - `PRERENDER_SPA_DIR`: SPA build directory (default: "dist")
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = Self::default();

        let bind_addr = std::env::var("PRERENDER_BIND_ADDR").unwrap_or(defaults.bind_addr);

        let store_url = std::env::var("PRERENDER_STORE_URL")
            .unwrap_or(defaults.store_url)
            .trim_end_matches('/')
            .to_string();

        let site_url = std::env::var("PRERENDER_SITE_URL")
            .unwrap_or(defaults.site_url)
            .trim_end_matches('/')
            .to_string();

        let site_name = std::env::var("PRERENDER_SITE_NAME").unwrap_or(defaults.site_name);
        let brand = std::env::var("PRERENDER_BRAND").unwrap_or(defaults.brand);

        let default_image_path =
            std::env::var("PRERENDER_DEFAULT_IMAGE").unwrap_or(defaults.default_image_path);

        let crawler_signatures = match std::env::var("PRERENDER_CRAWLERS") {
            Ok(list) => parse_signatures(&list),
            Err(_) => defaults.crawler_signatures,
        };
        if crawler_signatures.is_empty() {
            anyhow::bail!("PRERENDER_CRAWLERS must name at least one crawler signature");
        }

        let spa_dir = std::env::var("PRERENDER_SPA_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.spa_dir);

        tracing::info!(
            bind_addr = %bind_addr,
            store_url = %store_url,
            site_url = %site_url,
            spa_dir = %spa_dir.display(),
            crawler_count = crawler_signatures.len(),
            "prerender configuration loaded"
        );

        Ok(Self {
            bind_addr,
            store_url,
            site_url,
            site_name,
            brand,
            default_image_path,
            crawler_signatures,
            redirect_guard_pattern: defaults.redirect_guard_pattern,
            spa_dir,
        })
    }
}

fn parse_signatures(list: &str) -> Vec<String> {
    list.split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}
