//! Logo and image resolution.
//!
//! A logo reference comes in one of three flavours (see [`LogoReference`]):
//!
//! | Source                       | Resolution                                  |
//! |------------------------------|---------------------------------------------|
//! | `file:` URL                  | synchronous read from disk                  |
//! | any other absolute URL       | asynchronous fetch via [`RemoteFetcher`]    |
//! | bare name / relative URI     | synchronous read from the [`ResourceCatalog`] |
//!
//! Failures of any kind are absorbed: they are logged at `warn` and the
//! session proceeds without a logo.  They never surface to the host.

pub mod catalog;
pub mod fetch;
pub mod resolver;

use std::path::PathBuf;

use thiserror::Error;

pub use catalog::{DirectoryCatalog, ResourceCatalog};
pub use fetch::{HttpFetcher, RemoteFetcher};
pub use resolver::{AssetResolver, LogoReference};

/// Error type for loading and decoding image assets.
#[derive(Debug, Error)]
pub enum AssetError {
    /// A local file could not be read.
    #[error("I/O error reading asset at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No bundled resource exists under this name.
    #[error("no bundled resource named {0:?}")]
    NotFound(String),

    /// The HTTP request failed (connection, timeout, TLS, …).
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// The server answered with a non-success status.
    #[error("HTTP status {0}")]
    Status(u16),

    /// The body exceeded `assets.max_logo_bytes`.
    #[error("asset exceeds the {limit} byte limit")]
    TooLarge { limit: u64 },

    /// The bytes are not a decodable image.
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
}

impl From<reqwest::Error> for AssetError {
    fn from(error: reqwest::Error) -> Self {
        match error.status() {
            Some(status) => AssetError::Status(status.as_u16()),
            None => AssetError::Http(error.to_string()),
        }
    }
}
