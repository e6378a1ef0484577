/// Message relayed verbatim to the caller when a hostname is not allowlisted.
pub const ACCESS_DENIED_MESSAGE: &str =
    "Access denied: this tool can only query blogs from pre-approved domains";

/// Failures of a single blog query. None of these is fatal to the process.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BloggerError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Access denied: this tool can only query blogs from pre-approved domains")]
    DomainNotAllowed { host: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Blogger API error: {status} - {message}")]
    Upstream { status: u16, message: String },

    #[error("Blogger API unavailable: {0}")]
    UpstreamUnavailable(String),
}

impl BloggerError {
    /// Whether a retry may succeed without any change on the caller's side.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::UpstreamUnavailable(_))
    }
}

impl From<reqwest::Error> for BloggerError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() || err.is_connect() || err.is_request() {
            return Self::UpstreamUnavailable(err.to_string());
        }
        match err.status() {
            Some(status) => Self::Upstream {
                status: status.as_u16(),
                message: err.to_string(),
            },
            None => Self::UpstreamUnavailable(err.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, BloggerError>;
