//! KonVi Prerender - HTML snapshots of KonVi pages for crawlers.
//!
//! The KonVi site is a single-page application: posts and profiles are
//! rendered in the browser from a remote JSON store. Crawlers and link
//! preview fetchers don't run that code, so this service sits in front of
//! the SPA and answers them with a small pre-rendered document instead.
//!
//! # Architecture
//!
//! - **Classify**: Recognises crawler user agents and `/post/{id}`,
//!   `/profile/{id}` paths
//! - **Store**: Reads posts and users from the JSON store over HTTP
//! - **Render**: Builds the document with Open Graph / Twitter tags using maud
//! - **Dispatch**: Decides per request between a document and the SPA
//!
//! Any failure on the crawler path degrades to the SPA response; a crawler
//! never sees an error page from this service.
//!
//! # Security
//!
//! - All store-derived text is HTML-escaped exactly once
//! - Documents carry a script that sends script-capable non-crawlers to the SPA

pub mod classify;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod escape;
pub mod render;
pub mod routes;
pub mod state;
pub mod store;

pub use config::Config;
pub use error::PrerenderError;
pub use routes::router;
pub use state::AppState;
