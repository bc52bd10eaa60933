/// Failures of a single job search invocation.
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    #[error("job search provider error: {0}")]
    Upstream(#[from] UpstreamError),
}

#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("provider returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed response body: {0}")]
    Malformed(String),
}

/// Failures of the text completion service.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),

    #[error("completion request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("completion service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("completion response contained no text")]
    EmptyResponse,
}

/// Startup-time configuration failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing credential: {0} is not configured")]
    MissingCredential(&'static str),

    #[error("invalid endpoint URL {url}: {reason}")]
    InvalidEndpoint { url: String, reason: String },

    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}
