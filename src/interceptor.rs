use source_interface::{Cookie, Interceptor, Request};

use crate::transport::DEFAULT_USER_AGENT;
use crate::urls::{BASE_URL, HOST};

/// Stamps every outgoing request with the site referer, a browser user agent
/// and the `isAdult=1` cookie the site wants before it serves mature series.
#[derive(Debug, Clone)]
pub struct SiteInterceptor {
    user_agent: String,
}

impl SiteInterceptor {
    pub fn new(user_agent: Option<String>) -> Self {
        Self { user_agent: user_agent.unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()) }
    }
}

impl Default for SiteInterceptor {
    fn default() -> Self { Self::new(None) }
}

impl Interceptor for SiteInterceptor {
    fn intercept_request(&self, mut request: Request) -> Request {
        request.set_header("referer", format!("{BASE_URL}/"));
        request.set_header("user-agent", self.user_agent.clone());
        request.cookies.retain(|c| !(c.name == "isAdult" && c.domain == HOST));
        request.cookies.push(Cookie { name: "isAdult".into(), value: "1".into(), domain: HOST.into() });
        request
    }
}
