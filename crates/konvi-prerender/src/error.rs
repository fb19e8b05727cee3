//! Error types for the prerender service.
//!
//! None of these reach a client: the dispatcher logs them and hands the
//! request to the SPA.

/// Prerender error type.
#[derive(Debug, thiserror::Error)]
pub enum PrerenderError {
    /// The store request could not be sent or its body could not be read.
    #[error("store request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The store answered with a body that is not JSON.
    #[error("invalid store response: {0}")]
    Decode(#[from] serde_json::Error),
}
