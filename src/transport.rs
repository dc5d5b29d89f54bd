use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use source_interface::{Interceptor, Request, Response, Transport, TransportConfig, TransportError};
use tokio::sync::Mutex;
use url::Url;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

/// reqwest-backed transport: spaces requests to the configured rate, applies
/// the request timeout and runs the interceptor over every call.
pub struct HttpTransport {
    client: reqwest::Client,
    interceptor: Option<Arc<dyn Interceptor>>,
    min_interval: Duration,
    slow_warn: Duration,
    timeout: Duration,
    last_call: Mutex<Option<Instant>>,
}

impl HttpTransport {
    pub fn new(config: &TransportConfig) -> Result<Self, TransportError> {
        let timeout = Duration::from_millis(config.request_timeout_ms.max(1));
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .map_err(|e| TransportError::Network { url: String::new(), reason: e.to_string() })?;
        let min_interval = match config.requests_per_second {
            0 => Duration::ZERO,
            n => Duration::from_secs(1) / n,
        };
        Ok(Self {
            client,
            interceptor: None,
            min_interval,
            slow_warn: Duration::from_millis(config.slow_warn_ms),
            timeout,
            last_call: Mutex::new(None),
        })
    }

    pub fn with_interceptor(mut self, interceptor: Arc<dyn Interceptor>) -> Self {
        self.interceptor = Some(interceptor);
        self
    }

    async fn throttle(&self) {
        let mut last = self.last_call.lock().await;
        if let Some(prev) = *last {
            let elapsed = prev.elapsed();
            if elapsed < self.min_interval {
                tokio::time::sleep(self.min_interval - elapsed).await;
            }
        }
        *last = Some(Instant::now());
    }

    fn warn_if_slow(&self, start: Instant, url: &str) {
        let elapsed = start.elapsed();
        if elapsed > self.slow_warn {
            tracing::warn!(url, ?elapsed, "slow request");
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn schedule(&self, request: Request) -> Result<Response, TransportError> {
        let request = match &self.interceptor {
            Some(i) => i.intercept_request(request),
            None => request,
        };
        let url = request.url.clone();
        let host = Url::parse(&url)
            .ok()
            .and_then(|u| u.host_str().map(str::to_string))
            .unwrap_or_default();

        let mut builder = self.client.get(&url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(cookies) = request.cookie_header(&host) {
            builder = builder.header(reqwest::header::COOKIE, cookies);
        }

        self.throttle().await;
        let start = Instant::now();
        tracing::debug!(url = %url, "GET");

        let resp = builder.send().await.map_err(|e| classify(&url, e))?;
        let status = resp.status().as_u16();
        let final_url = resp.url().to_string();
        let body = resp.text().await.map_err(|e| classify(&url, e))?;
        self.warn_if_slow(start, &url);
        tracing::debug!(url = %url, status, bytes = body.len(), elapsed = ?start.elapsed(), "response");

        let response = Response { url: final_url, status, body };
        Ok(match &self.interceptor {
            Some(i) => i.intercept_response(response),
            None => response,
        })
    }
}

fn classify(url: &str, e: reqwest::Error) -> TransportError {
    if e.is_timeout() {
        TransportError::Timeout { url: url.to_string() }
    } else {
        TransportError::Network { url: url.to_string(), reason: e.to_string() }
    }
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("min_interval", &self.min_interval)
            .field("timeout", &self.timeout)
            .field("interceptor", &self.interceptor.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_cap_becomes_min_interval() {
        let t = HttpTransport::new(&TransportConfig { requests_per_second: 4, ..Default::default() }).unwrap();
        assert_eq!(t.min_interval, Duration::from_millis(250));
        let t = HttpTransport::new(&TransportConfig { requests_per_second: 0, ..Default::default() }).unwrap();
        assert_eq!(t.min_interval, Duration::ZERO);
    }

    #[tokio::test]
    async fn throttle_spaces_consecutive_calls() {
        let t = HttpTransport::new(&TransportConfig { requests_per_second: 20, ..Default::default() }).unwrap();
        let start = Instant::now();
        t.throttle().await;
        t.throttle().await;
        t.throttle().await;
        assert!(start.elapsed() >= Duration::from_millis(95));
    }
}
