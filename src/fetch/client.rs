use async_trait::async_trait;
use reqwest::{Method, Request, Response, Url};

/// Transport seam for feed downloads.
///
/// Decorators such as [`ClientHeaders`](super::ClientHeaders) wrap another
/// client and adjust the request before delegating to it.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn execute(&self, req: Request) -> reqwest::Result<Response>;

    /// Issues a bare GET for `url` through [`execute`](Self::execute).
    async fn get(&self, url: Url) -> reqwest::Result<Response> {
        self.execute(Request::new(Method::GET, url)).await
    }
}
