//! Error type shared by the library and the `jolt` binary.

use thiserror::Error;

/// Errors returned by library functions.
///
/// String payloads are boxed to keep the enum small; every `Result` in the
/// crate carries this type.
#[derive(Error, Debug)]
#[allow(clippy::module_name_repetitions, reason = "exported for tests")]
pub enum JoltError {
    #[error("request failed when running {context}: {source}")]
    Request {
        context: Box<str>,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("malformed response (status {status}): {message}; snippet: {snippet}")]
    BadResponseSerde {
        status: u16,
        message: Box<str>,
        snippet: Box<str>,
    },
    #[error("empty response for {operation} (status {status}): no data or errors; snippet: {snippet}")]
    EmptyResponse {
        status: u16,
        operation: Box<str>,
        snippet: Box<str>,
    },
    #[error("missing configuration: {0} is not set")]
    MissingConfig(&'static str),
    #[error("invalid header value for {name}: {source}")]
    InvalidHeader {
        name: &'static str,
        #[source]
        source: reqwest::header::InvalidHeaderValue,
    },
    #[error("io error: {0}")]
    Io(#[from] Box<std::io::Error>),
    #[error("configuration error: {0}")]
    Config(#[from] Box<figment::Error>),
    #[error("configuration error: invalid endpoint '{endpoint}': {source}")]
    InvalidEndpoint {
        endpoint: Box<str>,
        #[source]
        source: url::ParseError,
    },
    #[error("configuration error: http_timeout must be at least 1 second")]
    InvalidTimeout,
}

impl From<std::io::Error> for JoltError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(Box::new(e))
    }
}

impl From<figment::Error> for JoltError {
    fn from(e: figment::Error) -> Self {
        Self::Config(Box::new(e))
    }
}
