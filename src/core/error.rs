use thiserror::Error;

/// The primary error type for all fallible operations in this crate.
///
/// Upstream faults (timeouts, bad status codes, malformed bodies) never reach
/// callers of [`Collector::collect`](crate::Collector::collect): strategies turn
/// them into "no result" and the collector turns anything left into a failure
/// [`CollectionResult`](crate::CollectionResult). `DsError` is what the internal
/// plumbing, the router and the export helpers speak.
#[derive(Debug, Error)]
pub enum DsError {
    /// An error occurred during an HTTP request.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A provided URL could not be parsed.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// The server returned an unexpected or unsuccessful HTTP status code.
    #[error("Unexpected response status: {status} at {url}")]
    Status {
        /// The HTTP status code.
        status: u16,
        /// The URL that returned the error.
        url: String,
    },

    /// The body received from an upstream was in an unexpected format.
    #[error("Data format unexpected or missing field: {0}")]
    Data(String),

    /// A text extraction pattern failed to compile.
    #[error("Invalid extraction pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// A source profile or client setting is unusable.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// The caller supplied invalid or missing parameters.
    #[error("Invalid parameters: {0}")]
    InvalidParams(String),

    /// No collector is registered under the requested source key.
    #[error("Unknown data source: {0}")]
    UnknownSource(String),

    /// Records could not be written in the requested export format.
    #[error("Export failed: {0}")]
    Export(String),
}

impl From<csv::Error> for DsError {
    fn from(e: csv::Error) -> Self {
        DsError::Export(e.to_string())
    }
}
