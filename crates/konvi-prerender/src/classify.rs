//! Request classification: who is asking, and for what.
//!
//! Both checks are plain functions over strings so they can be exercised
//! without building a request.

use std::sync::LazyLock;

use regex::Regex;

/// `/post/{id}` or `/profile/{id}` with a single non-empty segment as id.
static RESOURCE_PATH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/(post|profile)/([^/]+)$").unwrap());

/// A renderable resource addressed by the request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource<'a> {
    Post(&'a str),
    Profile(&'a str),
}

/// Check whether a user agent belongs to a known crawler.
///
/// Case-insensitive substring match; `signatures` must be lowercase.
pub fn is_crawler(user_agent: &str, signatures: &[String]) -> bool {
    let user_agent = user_agent.to_lowercase();
    signatures
        .iter()
        .any(|signature| user_agent.contains(signature.as_str()))
}

/// Match a request path against the renderable resource patterns.
pub fn classify_path(path: &str) -> Option<Resource<'_>> {
    let caps = RESOURCE_PATH_RE.captures(path)?;
    let id = caps.get(2)?.as_str();

    match caps.get(1)?.as_str() {
        "post" => Some(Resource::Post(id)),
        "profile" => Some(Resource::Profile(id)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_CRAWLER_SIGNATURES;

    fn signatures() -> Vec<String> {
        DEFAULT_CRAWLER_SIGNATURES
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    // -- is_crawler() tests --

    #[test]
    fn crawler_known_agents() {
        let sigs = signatures();
        for ua in [
            "Mozilla/5.0 (compatible; Googlebot/2.1; +http://www.google.com/bot.html)",
            "Mozilla/5.0 (compatible; bingbot/2.0; +http://www.bing.com/bingbot.htm)",
            "Mozilla/5.0 (compatible; YandexBot/3.0; +http://yandex.com/bots)",
            "DuckDuckBot/1.1; (+http://duckduckgo.com/duckduckbot.html)",
            "facebookexternalhit/1.1 (+http://www.facebook.com/externalhit_uatext.php)",
            "Twitterbot/1.0",
            "LinkedInBot/1.0 (compatible; Mozilla/5.0; Apache-HttpClient +http://www.linkedin.com)",
            "WhatsApp/2.23.20.0",
            "TelegramBot (like TwitterBot)",
            "Slackbot-LinkExpanding 1.0 (+https://api.slack.com/robots)",
        ] {
            assert!(is_crawler(ua, &sigs), "{ua}");
        }
    }

    #[test]
    fn crawler_match_is_case_insensitive() {
        let sigs = signatures();
        assert!(is_crawler("GOOGLEBOT", &sigs));
        assert!(is_crawler("gOoGlEbOt", &sigs));
    }

    #[test]
    fn crawler_browsers_rejected() {
        let sigs = signatures();
        for ua in [
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36",
            "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) AppleWebKit/605.1.15 Version/17.0 Mobile Safari/604.1",
            "curl/8.4.0",
            "",
        ] {
            assert!(!is_crawler(ua, &sigs), "{ua}");
        }
    }

    #[test]
    fn crawler_empty_signature_list() {
        assert!(!is_crawler("Googlebot", &[]));
    }

    // -- classify_path() tests --

    #[test]
    fn path_post() {
        assert_eq!(classify_path("/post/-NxA1b2"), Some(Resource::Post("-NxA1b2")));
    }

    #[test]
    fn path_profile() {
        assert_eq!(classify_path("/profile/u1"), Some(Resource::Profile("u1")));
    }

    #[test]
    fn path_unmatched() {
        for path in [
            "/",
            "/post",
            "/post/",
            "/post/a/b",
            "/profile/u1/",
            "/posts/a",
            "/feed",
            "/api/post/a",
            "post/a",
        ] {
            assert_eq!(classify_path(path), None, "{path}");
        }
    }
}
