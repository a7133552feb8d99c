//! Remote logo fetching.
//!
//! [`RemoteFetcher`] is the seam between the asset resolver and the network.
//! Production code uses [`HttpFetcher`] (a `reqwest` client with a timeout and
//! a body-size cap); unit tests substitute a `mockall` mock.

use async_trait::async_trait;
use tracing::debug;
use url::Url;

use super::AssetError;
use crate::domain::AssetSettings;

/// Downloads the raw bytes behind a URL.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RemoteFetcher: Send + Sync {
    async fn fetch(&self, url: &Url) -> Result<Vec<u8>, AssetError>;
}

/// HTTP(S) fetcher backed by a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    max_bytes: u64,
}

impl HttpFetcher {
    /// Builds a fetcher honouring the timeout and size cap in `settings`.
    ///
    /// # Errors
    ///
    /// Returns [`AssetError::Http`] if the TLS backend cannot be initialised.
    pub fn new(settings: &AssetSettings) -> Result<Self, AssetError> {
        let client = reqwest::Client::builder()
            .timeout(settings.fetch_timeout())
            .build()?;
        Ok(Self {
            client,
            max_bytes: settings.max_logo_bytes,
        })
    }
}

#[async_trait]
impl RemoteFetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<Vec<u8>, AssetError> {
        let mut response = self
            .client
            .get(url.clone())
            .send()
            .await?
            .error_for_status()?;

        // Refuse early when the server announces an oversized body.
        if let Some(length) = response.content_length() {
            if length > self.max_bytes {
                return Err(AssetError::TooLarge {
                    limit: self.max_bytes,
                });
            }
        }

        // Without a length up front, stop reading as soon as the cap is passed.
        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            if (body.len() + chunk.len()) as u64 > self.max_bytes {
                return Err(AssetError::TooLarge {
                    limit: self.max_bytes,
                });
            }
            body.extend_from_slice(&chunk);
        }

        debug!("fetched {} bytes from {url}", body.len());
        Ok(body)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    use super::*;

    /// Serves exactly one canned HTTP response on an ephemeral port.
    async fn serve_once(status_line: &'static str, body: Vec<u8>) -> Url {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut request = vec![0u8; 4096];
            let _ = stream.read(&mut request).await;
            let head = format!(
                "HTTP/1.1 {status_line}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                body.len()
            );
            stream.write_all(head.as_bytes()).await.unwrap();
            stream.write_all(&body).await.unwrap();
            stream.shutdown().await.unwrap();
        });
        Url::parse(&format!("http://{addr}/logo.png")).unwrap()
    }

    /// Serves one chunked response of `chunks` chunks of `chunk_len` bytes,
    /// with no `Content-Length`.  Reports how many chunks were written.
    async fn serve_chunked(
        chunks: usize,
        chunk_len: usize,
    ) -> (Url, tokio::task::JoinHandle<usize>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut request = vec![0u8; 4096];
            let _ = stream.read(&mut request).await;
            let head = "HTTP/1.1 200 OK\r\nTransfer-Encoding: chunked\r\nConnection: close\r\n\r\n";
            if stream.write_all(head.as_bytes()).await.is_err() {
                return 0;
            }
            let chunk = vec![b'x'; chunk_len];
            let mut written = 0;
            for _ in 0..chunks {
                let mut frame = format!("{chunk_len:x}\r\n").into_bytes();
                frame.extend_from_slice(&chunk);
                frame.extend_from_slice(b"\r\n");
                if stream.write_all(&frame).await.is_err() || stream.flush().await.is_err() {
                    break;
                }
                written += 1;
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
            let _ = stream.write_all(b"0\r\n\r\n").await;
            written
        });
        (Url::parse(&format!("http://{addr}/logo.png")).unwrap(), server)
    }

    fn settings(max_logo_bytes: u64) -> AssetSettings {
        AssetSettings {
            max_logo_bytes,
            fetch_timeout_secs: 5,
            ..AssetSettings::default()
        }
    }

    #[tokio::test]
    async fn test_fetch_returns_body() {
        // Arrange
        let url = serve_once("200 OK", b"image-bytes".to_vec()).await;
        let fetcher = HttpFetcher::new(&settings(1024)).unwrap();

        // Act
        let body = fetcher.fetch(&url).await.unwrap();

        // Assert
        assert_eq!(body, b"image-bytes");
    }

    #[tokio::test]
    async fn test_fetch_maps_error_status() {
        let url = serve_once("404 Not Found", Vec::new()).await;
        let fetcher = HttpFetcher::new(&settings(1024)).unwrap();

        let result = fetcher.fetch(&url).await;

        assert!(matches!(result, Err(AssetError::Status(404))));
    }

    #[tokio::test]
    async fn test_fetch_refuses_oversized_body() {
        let url = serve_once("200 OK", vec![0u8; 64]).await;
        let fetcher = HttpFetcher::new(&settings(16)).unwrap();

        let result = fetcher.fetch(&url).await;

        assert!(matches!(result, Err(AssetError::TooLarge { limit: 16 })));
    }

    #[tokio::test]
    async fn test_fetch_reads_chunked_body_under_cap() {
        let (url, _server) = serve_chunked(3, 4).await;
        let fetcher = HttpFetcher::new(&settings(64)).unwrap();

        let body = fetcher.fetch(&url).await.unwrap();

        assert_eq!(body, b"xxxxxxxxxxxx");
    }

    #[tokio::test]
    async fn test_fetch_stops_reading_unsized_body_at_cap() {
        // Arrange: no Content-Length, far more data than the cap
        let (url, server) = serve_chunked(200, 16).await;
        let fetcher = HttpFetcher::new(&settings(40)).unwrap();

        // Act
        let result = fetcher.fetch(&url).await;

        // Assert
        assert!(matches!(result, Err(AssetError::TooLarge { limit: 40 })));
        assert!(server.await.unwrap() < 200, "fetch must not drain the whole body");
    }

    #[tokio::test]
    async fn test_fetch_connection_refused_is_http_error() {
        // Bind then drop to obtain a port with nothing listening.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let url = Url::parse(&format!("http://{addr}/logo.png")).unwrap();
        let fetcher = HttpFetcher::new(&settings(1024)).unwrap();

        let result = tokio::time::timeout(Duration::from_secs(10), fetcher.fetch(&url))
            .await
            .expect("refused connection must fail fast");

        assert!(matches!(result, Err(AssetError::Http(_))));
    }
}
