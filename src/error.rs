use thiserror::Error;

/// The live feed could not be obtained or decoded.
///
/// The pipeline recovers from every variant by switching to synthetic data.
#[derive(Debug, Error)]
pub enum SourceUnavailable {
    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Feed returned HTTP {0}")]
    Status(u16),
    #[error("Feed response too large: {size} bytes (max {max} bytes)")]
    TooLarge { size: usize, max: usize },
    #[error("Protobuf decode error: {0}")]
    Decode(#[from] prost::DecodeError),
    #[error("Invalid feed URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Feed client setup failed: {0}")]
    ClientSetup(String),
}
