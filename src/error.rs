use source_interface::TransportError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Transport failure or a non-success status. Never retried here.
    #[error("fetching {url} failed: {reason}")]
    Fetch { url: String, reason: String },

    #[error("{url} answered with a cloudflare challenge")]
    CloudflareChallenge { url: String },

    /// The page parsed but the region we extract from is absent or empty.
    #[error("missing content: {0}")]
    MissingContent(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("operation cancelled")]
    Cancelled,

    #[error("config error: {0}")]
    Config(String),

    #[error("bad selector `{css}`: {reason}")]
    Selector { css: &'static str, reason: String },
}

impl Error {
    pub(crate) fn missing(what: impl Into<String>) -> Self { Error::MissingContent(what.into()) }
}

impl From<TransportError> for Error {
    fn from(e: TransportError) -> Self {
        match e {
            TransportError::Cancelled => Error::Cancelled,
            TransportError::Timeout { url } => Error::Fetch { url, reason: "timed out".into() },
            TransportError::Network { url, reason } => Error::Fetch { url, reason },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_cancellation_maps_to_cancelled() {
        assert!(matches!(Error::from(TransportError::Cancelled), Error::Cancelled));
    }

    #[test]
    fn transport_timeout_is_a_fetch_error() {
        let e = Error::from(TransportError::Timeout { url: "https://x/".into() });
        assert!(matches!(e, Error::Fetch { ref url, .. } if url == "https://x/"));
        assert_eq!(e.to_string(), "fetching https://x/ failed: timed out");
    }
}
