use std::time::Duration;

use reqwest::{Client, Response};
use tracing::debug;

use crate::config::defaults::DEFAULT_USER_AGENT;
use crate::errors::{SourceError, SourceResult};
use crate::utils::decompression::DecompressionService;
use crate::utils::url::UrlUtils;

/// HTTP client for fetching XMLTV feeds with automatic decompression
///
/// Only the connection phase is bounded; the transfer of a large guide is
/// allowed to take as long as it needs. Requests are never retried.
pub struct StandardHttpClient {
    client: Client,
}

impl StandardHttpClient {
    /// Create new HTTP client with only connection timeout (no total request timeout)
    pub fn with_connection_timeout(connect_timeout: Duration) -> SourceResult<Self> {
        let client = Client::builder()
            .connect_timeout(connect_timeout)
            .user_agent(DEFAULT_USER_AGENT)
            .build()
            .map_err(|e| SourceError::request("<client>", e.to_string()))?;

        Ok(Self { client })
    }

    /// Fetch URL and return raw decompressed bytes
    pub async fn fetch_bytes(&self, url: &str) -> SourceResult<Vec<u8>> {
        let safe_url = UrlUtils::obfuscate_credentials(url);
        let parsed = UrlUtils::parse_feed_url(url)
            .map_err(|message| SourceError::request(safe_url.clone(), message))?;
        debug!("Fetching XMLTV content from: {}", safe_url);

        let response = self.client.get(parsed).send().await.map_err(|e| {
            SourceError::request(
                safe_url.clone(),
                UrlUtils::obfuscate_credentials(&e.to_string()),
            )
        })?;

        Self::process_response_to_bytes(response, &safe_url).await
    }

    /// Check the status, read the body and decompress it if needed
    async fn process_response_to_bytes(response: Response, safe_url: &str) -> SourceResult<Vec<u8>> {
        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Http {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
                url: safe_url.to_string(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| SourceError::request(safe_url, format!("Failed to read response: {e}")))?;
        debug!("Fetched {} bytes of raw content", bytes.len());

        DecompressionService::decompress(bytes.to_vec())
    }
}
