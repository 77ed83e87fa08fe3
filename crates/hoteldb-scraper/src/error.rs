use thiserror::Error;

use crate::sink::SinkError;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("invalid URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("malformed {field} value: {value}")]
    MalformedField { field: &'static str, value: String },

    #[error("I/O error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("persistence failure: {0}")]
    Persistence(#[from] SinkError),
}

/// A script fragment carried the payload marker but the captured object was
/// not valid JSON.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("embedded payload in fragment {fragment_index} is not valid JSON: {source}")]
    Parse {
        fragment_index: usize,
        #[source]
        source: serde_json::Error,
    },
}
