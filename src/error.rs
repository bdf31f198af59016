use thiserror::Error;

/// Why an exchange with the chat backend did not produce a reply.
///
/// Callers only ever show the user the fallback text; the variant is kept for
/// the diagnostic log line.
#[derive(Debug, Error)]
pub enum ExchangeFailure {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("backend returned HTTP {0}")]
    Status(reqwest::StatusCode),

    #[error("malformed response body: {0}")]
    MalformedBody(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid chat endpoint '{endpoint}': {source}")]
    InvalidEndpoint {
        endpoint: String,
        #[source]
        source: url::ParseError,
    },

    #[error("unsupported endpoint scheme '{0}' (expected http or https)")]
    UnsupportedScheme(String),

    #[error("greeting must not be empty")]
    EmptyGreeting,
}
