use async_trait::async_trait;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cookie {
    pub name: String,
    pub value: String,
    pub domain: String,
}

/// Outbound request as handed to the host transport. Only GET is ever issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub cookies: Vec<Cookie>,
}

impl Request {
    pub fn get(url: impl Into<String>) -> Self {
        Self { url: url.into(), headers: Vec::new(), cookies: Vec::new() }
    }

    /// Set a header, replacing any existing value with the same (case-insensitive) name.
    pub fn set_header(&mut self, name: &str, value: impl Into<String>) {
        self.headers.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        self.headers.push((name.to_ascii_lowercase(), value.into()));
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// `Cookie` header value for the cookies whose domain matches `host`.
    pub fn cookie_header(&self, host: &str) -> Option<String> {
        let pairs: Vec<String> = self
            .cookies
            .iter()
            .filter(|c| c.domain.eq_ignore_ascii_case(host))
            .map(|c| format!("{}={}", c.name, c.value))
            .collect();
        if pairs.is_empty() { None } else { Some(pairs.join("; ")) }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// Final URL after redirects.
    pub url: String,
    pub status: u16,
    pub body: String,
}

impl Response {
    pub fn is_success(&self) -> bool { (200..300).contains(&self.status) }
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("request to {url} timed out")]
    Timeout { url: String },
    #[error("request was cancelled")]
    Cancelled,
    #[error("request to {url} failed: {reason}")]
    Network { url: String, reason: String },
}

/// Pre-request / post-response transform run by the transport on every call.
pub trait Interceptor: Send + Sync {
    fn intercept_request(&self, request: Request) -> Request;

    fn intercept_response(&self, response: Response) -> Response { response }
}

/// Host-provided request scheduler. Rate limiting, timeouts and interception
/// are its business, not the adapter's.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn schedule(&self, request: Request) -> Result<Response, TransportError>;
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct TransportConfig {
    pub requests_per_second: u32,
    pub request_timeout_ms: u64,
    pub user_agent: Option<String>,
    pub slow_warn_ms: u64,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            requests_per_second: 10,
            request_timeout_ms: 20_000,
            user_agent: None,
            slow_warn_ms: 5_000,
        }
    }
}
