use std::future::Future;
use std::time::Duration;

use crate::foundation::error::{UnboxError, UnboxResult};

/// Source of raw (still encoded) thumbnail bytes.
///
/// Implementations are shared across acquisition tasks, so they must be cheap to call
/// concurrently.
pub trait ThumbnailFetcher: Send + Sync + 'static {
    /// Fetch the encoded image behind `url`.
    fn fetch(&self, url: &str) -> impl Future<Output = UnboxResult<Vec<u8>>> + Send;
}

/// Plain HTTP(S) GET fetcher.
#[derive(Clone, Debug)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Build a fetcher whose requests give up after `timeout`.
    pub fn new(timeout: Duration) -> UnboxResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("crate-unbox/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| UnboxError::acquisition(format!("build http client: {e}")))?;
        Ok(Self { client })
    }

    /// Wrap an existing client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl ThumbnailFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> impl Future<Output = UnboxResult<Vec<u8>>> + Send {
        let client = self.client.clone();
        let url = url.to_owned();
        async move {
            let resp = client
                .get(&url)
                .send()
                .await
                .and_then(|r| r.error_for_status())
                .map_err(|e| UnboxError::acquisition(format!("GET '{url}': {e}")))?;
            let body = resp
                .bytes()
                .await
                .map_err(|e| UnboxError::acquisition(format!("read body of '{url}': {e}")))?;
            Ok(body.to_vec())
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/fetch.rs"]
mod tests;
