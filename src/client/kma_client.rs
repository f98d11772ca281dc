use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::client::source::{FeedQuery, FeedSource};
use crate::config::AppConfig;
use crate::error::{RelayError, Result};
use crate::utils::encoding::decode_feed_bytes;

/// HTTP client for the KMA API hub.
///
/// One timed GET per query, no retry. The auth key is appended to the query
/// string and never logged.
pub struct KmaClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl KmaClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
            api_key: api_key.into(),
        })
    }

    /// Fails with `MissingApiKey` before building anything when no key is configured
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let api_key = config.require_api_key()?;
        Self::new(config.base_url.clone(), api_key, config.request_timeout())
    }

    pub fn url_for(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }
}

#[async_trait]
impl FeedSource for KmaClient {
    async fn fetch(&self, query: &FeedQuery) -> Result<String> {
        let url = self.url_for(query.endpoint);
        info!(
            "Requesting {} tm1={} tm2={} stn={} help={}",
            query.endpoint, query.tm1, query.tm2, query.station, query.help
        );

        let response = self
            .http
            .get(&url)
            .query(&query.params())
            .query(&[("authKey", self.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        debug!("Upstream responded with {}", status);
        if !status.is_success() {
            return Err(RelayError::upstream(format!(
                "{} returned HTTP {}",
                query.endpoint, status
            )));
        }

        let bytes = response.bytes().await?;
        let body = decode_feed_bytes(&bytes).into_owned();
        debug!("Received {} bytes ({} characters)", bytes.len(), body.chars().count());

        if body.contains("ERROR") || body.contains("error") {
            warn!("Upstream body mentions an error; parsing it anyway");
        }

        Ok(body)
    }
}
