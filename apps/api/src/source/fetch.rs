//! Remote source retrieval. A failed fetch is `SourceUnavailable`; callers are
//! expected to retry with the raw bytes instead of a reference.

use async_trait::async_trait;
use bytes::BytesMut;
use reqwest::{Client, Url};
use tracing::{info, warn};

use crate::extraction::error::ExtractError;
use crate::source::blob::{SourceBlob, SourceOrigin};

#[async_trait]
pub trait SourceFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<SourceBlob, ExtractError>;
}

/// Fetches documents over HTTP(S) with a size cap.
pub struct HttpFetcher {
    client: Client,
    max_bytes: usize,
}

impl HttpFetcher {
    pub fn new(client: Client, max_bytes: usize) -> Self {
        Self { client, max_bytes }
    }

    fn too_large(&self, bytes: u64) -> ExtractError {
        ExtractError::SourceUnavailable(format!(
            "remote document exceeds the limit of {} bytes (got at least {bytes})",
            self.max_bytes
        ))
    }
}

#[async_trait]
impl SourceFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<SourceBlob, ExtractError> {
        let url = Url::parse(url)
            .map_err(|e| ExtractError::SourceUnavailable(format!("invalid URL: {e}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ExtractError::SourceUnavailable(format!(
                "unsupported URL scheme '{}'",
                url.scheme()
            )));
        }

        let mut response = self.client.get(url.clone()).send().await.map_err(|e| {
            warn!(%url, "source fetch failed: {e}");
            ExtractError::SourceUnavailable(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExtractError::SourceUnavailable(format!(
                "remote returned status {status}"
            )));
        }

        if let Some(declared) = response.content_length() {
            if declared > self.max_bytes as u64 {
                return Err(self.too_large(declared));
            }
        }

        // The declared length may be absent or wrong; the running total is authoritative.
        let mut data = BytesMut::new();
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| ExtractError::SourceUnavailable(e.to_string()))?
        {
            let total = data.len() + chunk.len();
            if total > self.max_bytes {
                warn!(%url, "source fetch aborted past the size limit");
                return Err(self.too_large(total as u64));
            }
            data.extend_from_slice(&chunk);
        }
        let data = data.freeze();

        info!(%url, bytes = data.len(), "source fetched");
        Ok(SourceBlob::new(
            data,
            SourceOrigin::Remote {
                url: url.to_string(),
            },
        ))
    }
}
