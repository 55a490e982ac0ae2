use crate::fetch::client::HttpClient;
use anyhow::Result;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

/// Header Entur uses to identify API consumers.
pub const ENTUR_CLIENT_NAME_HEADER: &str = "ET-Client-Name";

/// An [`HttpClient`] wrapper that adds fixed headers to every request.
///
/// Header names and values are validated once at construction, so
/// [`execute`](HttpClient::execute) cannot fail on a malformed header.
pub struct ClientHeaders<C> {
    pub inner: C,
    headers: HeaderMap,
}

impl<C> ClientHeaders<C> {
    pub fn new(inner: C, headers: &[(&str, &str)]) -> Result<Self> {
        let mut map = HeaderMap::new();
        for (name, value) in headers {
            map.insert(
                HeaderName::from_bytes(name.as_bytes())?,
                HeaderValue::from_str(value)?,
            );
        }
        Ok(Self {
            inner,
            headers: map,
        })
    }

    /// Identifies this client to the Entur API as `<client_name>`.
    pub fn entur(inner: C, client_name: &str) -> Result<Self> {
        Self::new(inner, &[(ENTUR_CLIENT_NAME_HEADER, client_name)])
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }
}

#[async_trait]
impl<C: HttpClient> HttpClient for ClientHeaders<C> {
    async fn execute(&self, mut req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
        for (name, value) in &self.headers {
            req.headers_mut().insert(name.clone(), value.clone());
        }
        self.inner.execute(req).await
    }
}
