use thiserror::Error;

/// Errors returned by the theme asset client.
#[derive(Debug, Error)]
pub enum ThemeApiError {
    /// Network, TLS, or timeout failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A read returned a non-success status outside the expected probe misses.
    #[error("upstream returned {status}: {body}")]
    UpstreamUnavailable { status: u16, body: String },

    /// An asset write returned a non-success status. The write is not retried.
    #[error("asset write failed with {status}: {body}")]
    WriteFailed { status: u16, body: String },

    /// None of the recognized homepage asset keys exist in the theme.
    #[error("theme has no recognized homepage asset")]
    NoHomepageAsset,

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The client was constructed with an unusable base URL.
    #[error("invalid client configuration: {0}")]
    Config(String),
}
