mod basic;
mod client;
mod headers;

pub use basic::BasicClient;
pub use client::HttpClient;
pub use headers::{ClientHeaders, ENTUR_CLIENT_NAME_HEADER};

use bytes::{Bytes, BytesMut};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

use crate::error::SourceUnavailable;
use crate::gtfs_rt::FeedMessage;
use crate::parser::parse_feed;

/// Maximum accepted feed response size (50 MB).
pub const MAX_FEED_BYTES: usize = 50 * 1024 * 1024;

/// Builds the production client: request timeout plus the Entur
/// `ET-Client-Name` header.
pub fn entur_client(
    client_name: &str,
    timeout: Duration,
) -> Result<ClientHeaders<BasicClient>, SourceUnavailable> {
    let inner = BasicClient::with_timeout(timeout)
        .map_err(|e| SourceUnavailable::ClientSetup(e.to_string()))?;
    ClientHeaders::entur(inner, client_name)
        .map_err(|e| SourceUnavailable::ClientSetup(format!("{ENTUR_CLIENT_NAME_HEADER}: {e}")))
}

pub async fn fetch_bytes<C: HttpClient>(client: &C, url: &str) -> Result<Bytes, SourceUnavailable> {
    fetch_bytes_limited(client, url, MAX_FEED_BYTES).await
}

/// Downloads `url`, giving up as soon as the body is known to exceed `max`
/// bytes. The declared `Content-Length` is checked before reading; bodies
/// without one are read chunk by chunk.
pub async fn fetch_bytes_limited<C: HttpClient>(
    client: &C,
    url: &str,
    max: usize,
) -> Result<Bytes, SourceUnavailable> {
    let parsed = url
        .parse::<reqwest::Url>()
        .map_err(|e| SourceUnavailable::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

    let mut resp = client.get(parsed).await?;
    if !resp.status().is_success() {
        return Err(SourceUnavailable::Status(resp.status().as_u16()));
    }

    if let Some(declared) = resp.content_length() {
        let size = usize::try_from(declared).unwrap_or(usize::MAX);
        if size > max {
            return Err(SourceUnavailable::TooLarge { size, max });
        }
    }

    let mut body = BytesMut::new();
    while let Some(chunk) = resp.chunk().await? {
        let size = body.len() + chunk.len();
        if size > max {
            return Err(SourceUnavailable::TooLarge { size, max });
        }
        body.extend_from_slice(&chunk);
    }

    Ok(body.freeze())
}

/// Downloads and decodes a GTFS-RT feed.
#[tracing::instrument(skip(client))]
pub async fn fetch_feed<C: HttpClient>(client: &C, url: &str) -> Result<FeedMessage, SourceUnavailable> {
    let bytes = fetch_bytes(client, url).await?;
    debug!(bytes = bytes.len(), "Feed bytes received, parsing");
    parse_feed(&bytes)
}

/// Reads and decodes a GTFS-RT feed saved to disk.
pub fn load_feed(path: impl AsRef<Path>) -> Result<FeedMessage, SourceUnavailable> {
    let bytes = std::fs::read(path)?;
    parse_feed(&bytes)
}

/// Loads a feed from a local file path or fetches it over HTTP.
pub async fn fetch_source<C: HttpClient>(client: &C, source: &str) -> Result<FeedMessage, SourceUnavailable> {
    if source.starts_with("http") {
        fetch_feed(client, source).await
    } else {
        load_feed(source)
    }
}
