use crate::core::{LpmError, LpmResult};
use crate::di::ArtifactFetcher;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Total time allowed for one download
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
/// Time allowed to establish the connection
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Check whether a locator needs network access (`http://` or `https://`)
pub fn is_remote(locator: &str) -> bool {
    let lower = locator.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// HTTP implementation of [`ArtifactFetcher`]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> LpmResult<Self> {
        let client = Client::builder()
            .user_agent(concat!("lpm/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|e| LpmError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl ArtifactFetcher for HttpFetcher {
    async fn fetch(&self, locator: &str) -> LpmResult<Vec<u8>> {
        tracing::debug!("Downloading {}", locator);

        let failed = |e: reqwest::Error| LpmError::FetchFailed {
            locator: locator.to_string(),
            cause: e.to_string(),
        };

        let response = self.client.get(locator).send().await.map_err(failed)?;

        let status = response.status();
        if !status.is_success() {
            return Err(LpmError::FetchStatus {
                locator: locator.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await.map_err(failed)?;
        tracing::debug!("Downloaded {} bytes from {}", bytes.len(), locator);
        Ok(bytes.to_vec())
    }
}
