//! Shared bounded HTTP transport.
//!
//! Every request carries an explicit per-call deadline and a correlation id,
//! so a slow remote can never hang a caller and every log line ties back to
//! one request.

use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use tracing::debug;
use uuid::Uuid;

const CORRELATION_HEADER: &str = "x-correlation-id";

/// A `reqwest::Client` wrapper pinned to one API base URL. Cloning is cheap;
/// the underlying connection pool is shared.
#[derive(Clone, Debug)]
pub struct BoundedClient {
    client: Client,
    base_url: String,
}

impl BoundedClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        let base_url = base_url.trim_end_matches('/').to_string();
        Self { client: Client::new(), base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Builds a GET with the per-call deadline and a fresh correlation id.
    /// `path` is joined under the base URL and must start with `/`.
    pub fn get(&self, path: &str, timeout: Duration) -> RequestBuilder {
        self.request(reqwest::Method::GET, path, timeout)
    }

    pub fn post(&self, path: &str, timeout: Duration) -> RequestBuilder {
        self.request(reqwest::Method::POST, path, timeout)
    }

    fn request(&self, method: reqwest::Method, path: &str, timeout: Duration) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let correlation_id = Uuid::new_v4().simple().to_string();
        debug!(%method, %url, correlation_id, timeout_secs = timeout.as_secs(), "dispatching request");
        self.client
            .request(method, url)
            .timeout(timeout)
            .header(CORRELATION_HEADER, correlation_id)
    }
}
