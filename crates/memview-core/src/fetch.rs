use crate::error::{Result, ViewerError};
use reqwest::StatusCode;
use std::future::Future;
use std::time::Duration;

/// Source of raw memory pages. `host` is whatever the user connected to,
/// with or without a scheme.
pub trait PageFetch: Send + Sync + 'static {
    fn fetch_page(
        &self,
        host: &str,
        offset: u64,
        length: usize,
    ) -> impl Future<Output = Result<Vec<u8>>> + Send;
}

/// `http://` is assumed when the host carries no scheme.
pub fn devmem_url(host: &str) -> String {
    let host = host.trim().trim_end_matches('/');
    if host.contains("://") {
        format!("{}/devmem", host)
    } else {
        format!("http://{}/devmem", host)
    }
}

pub struct HttpPageFetcher {
    client: reqwest::Client,
}

impl HttpPageFetcher {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ViewerError::TransportFailure(e.to_string()))?;
        Ok(Self { client })
    }
}

impl PageFetch for HttpPageFetcher {
    async fn fetch_page(&self, host: &str, offset: u64, length: usize) -> Result<Vec<u8>> {
        let url = devmem_url(host);
        log::debug!("GET {}?offset={}&length={}", url, offset, length);

        let response = self
            .client
            .get(&url)
            .query(&[("offset", offset), ("length", length as u64)])
            .send()
            .await
            .map_err(|e| ViewerError::TransportFailure(e.to_string()))?;

        if response.status() != StatusCode::OK {
            return Err(ViewerError::TransportFailure(format!(
                "HTTP {}",
                response.status()
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ViewerError::TransportFailure(e.to_string()))?;
        Ok(body.to_vec())
    }
}
