//! HTML rendering for crawler-facing snapshots.
//!
//! Each renderer resolves one entity from the store and turns it into a
//! [`PageMeta`](document::PageMeta) for the document builder.
//!
//! All markup uses [maud](https://maud.lambda.xyz/), which escapes every
//! interpolated value.

pub mod components;
pub mod document;
pub mod post;
pub mod profile;

pub use document::{Document, PageMeta, build_document};

/// Result of resolving a renderable resource.
#[derive(Debug)]
pub enum RenderOutcome {
    /// The entity exists and was rendered.
    Rendered(Document),
    /// The entity, or the collection it lives in, is missing.
    NotFound,
}
