use std::time::Duration;

use thiserror::Error;

/// Failure of a single HTTP fetch or of a whole candidate-URL list.
///
/// `NotFound` is kept separate from other statuses so callers can tell
/// "not present on any mirror" apart from "every mirror errored".
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("resource not found (404)")]
    NotFound,
    #[error("server returned status code {0}")]
    Status(u16),
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    #[error("network error: {0}")]
    Network(String),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A required structural element was present but unreadable after
    /// placeholder resolution.
    #[error("malformed descriptor for {coordinate}: {detail}")]
    MalformedDescriptor { coordinate: String, detail: String },

    /// Version metadata could not be fetched from any configured repository
    /// and the local-cache fallback did not help either.
    #[error("could not resolve version metadata for {coordinate}")]
    MetadataUnavailable {
        coordinate: String,
        #[source]
        source: FetchError,
    },

    /// An explicitly requested download (jar or pom) failed on every URL.
    #[error("could not fetch {coordinate}")]
    Fetch {
        coordinate: String,
        #[source]
        source: FetchError,
    },

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("jar injection failed: {0}")]
    Inject(String),
}
