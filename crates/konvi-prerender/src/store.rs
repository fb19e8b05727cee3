//! Read-only client for the remote JSON store.
//!
//! The store exposes every node of its tree at `{base}/{path}.json`. Missing
//! keys come back either as a non-2xx status or as a literal `null` body;
//! both are reported as `None`.
//!
//! Records are decoded field by field: a field holding the wrong JSON type
//! is treated as absent so a partially broken record still renders.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::PrerenderError;

/// All posts keyed by post id.
pub type PostCollection = BTreeMap<String, Post>;

/// A post record from `posts/{id}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(default, deserialize_with = "lenient")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub content: Option<String>,
    /// Publication time; stored as epoch milliseconds or a date string.
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub date: Option<DateTime<Utc>>,
    /// Id of the author in `users/`.
    #[serde(default, deserialize_with = "lenient")]
    pub user_id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub hashtags: Option<Hashtags>,
}

/// Hashtags as stored by the different client versions.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Hashtags {
    /// A single pre-joined string, e.g. `"#весна #love"`.
    Text(String),
    /// One entry per tag.
    List(Vec<String>),
}

impl Hashtags {
    /// Render as one space-separated line.
    pub fn joined(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::List(tags) => tags.join(" "),
        }
    }
}

/// A user record from `users/{id}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub bio: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub avatar_url: Option<String>,
    /// Post count as maintained by the SPA. Not recomputed here.
    #[serde(default, deserialize_with = "lenient_count")]
    pub posts_count: Option<u64>,
}

/// HTTP client for the JSON store.
#[derive(Debug, Clone)]
pub struct StoreClient {
    http: reqwest::Client,
    base_url: String,
}

impl StoreClient {
    /// Create a client for the store rooted at `base_url`.
    pub fn new(base_url: &str) -> Result<Self, PrerenderError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("konvi-prerender/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch the JSON subtree at `path`.
    ///
    /// Issues exactly one GET. Returns `Ok(None)` for non-success statuses
    /// and for a `null` body; transport and decode failures are errors.
    pub async fn fetch_json(&self, path: &str) -> Result<Option<Value>, PrerenderError> {
        let url = format!("{}/{path}.json", self.base_url);
        let response = self.http.get(&url).send().await?;
        let status = response.status();

        tracing::debug!(path = %path, status = status.as_u16(), "store read");

        if !status.is_success() {
            return Ok(None);
        }

        let body = response.bytes().await?;
        let value: Value = serde_json::from_slice(&body)?;

        Ok((!value.is_null()).then_some(value))
    }

    /// Fetch the whole post collection.
    ///
    /// Entries that are not JSON objects are skipped. A collection that is
    /// not an object is reported as absent.
    pub async fn fetch_posts(&self) -> Result<Option<PostCollection>, PrerenderError> {
        let Some(value) = self.fetch_json("posts").await? else {
            return Ok(None);
        };
        Ok(parse_posts(value))
    }

    /// Fetch a single user record.
    pub async fn fetch_user(&self, user_id: &str) -> Result<Option<User>, PrerenderError> {
        let Some(value) = self.fetch_json(&format!("users/{user_id}")).await? else {
            return Ok(None);
        };
        Ok(parse_record(value))
    }
}

/// Decode a post collection, dropping entries that aren't records.
pub fn parse_posts(value: Value) -> Option<PostCollection> {
    let Value::Object(entries) = value else {
        return None;
    };

    let posts = entries
        .into_iter()
        .filter_map(|(id, entry)| parse_record(entry).map(|post| (id, post)))
        .collect();

    Some(posts)
}

fn parse_record<T: DeserializeOwned>(value: Value) -> Option<T> {
    if !value.is_object() {
        return None;
    }
    serde_json::from_value(value).ok()
}

/// Decode a field, treating a value of the wrong type as absent.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(parse_timestamp(&value))
}

/// Accepts whole non-negative numbers, including `5.0`.
fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let count = match &value {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| *f >= 0.0 && f.fract() == 0.0)
                .map(|f| f as u64)
        }),
        _ => None,
    };
    Ok(count)
}

/// Parse a stored timestamp: epoch milliseconds, RFC 3339, or `YYYY-MM-DD`.
pub fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64))
            .and_then(DateTime::from_timestamp_millis),
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
            .or_else(|| {
                NaiveDate::parse_from_str(s, "%Y-%m-%d")
                    .ok()
                    .and_then(|d| d.and_hms_opt(0, 0, 0))
                    .map(|dt| dt.and_utc())
            }),
        _ => None,
    }
}
