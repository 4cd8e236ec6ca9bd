use crate::config::MenuConfig;
use crate::error::MenuError;
use log::debug;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Shared HTTP client used by every restaurant in a run.
///
/// The client only issues GET requests and holds no per-restaurant state, so a
/// single instance (and its connection pool) is shared across concurrent extractors.
#[derive(Clone)]
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    /// Builds the client from explicit configuration, including TLS leniency.
    pub fn from_config(config: &MenuConfig) -> Result<Self, MenuError> {
        Self::with_timeout(config, config.timeout())
    }

    /// Same as [`Fetcher::from_config`] with a timeout finer than whole seconds.
    pub fn with_timeout(config: &MenuConfig, timeout: Duration) -> Result<Self, MenuError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(config.user_agent.as_str())
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()?;

        Ok(Self { client })
    }

    async fn get(&self, url: &str) -> Result<Response, MenuError> {
        debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(MenuError::StatusError {
                url: url.to_string(),
                status,
            });
        }
        Ok(response)
    }

    /// Fetches a page and decodes it as UTF-8 regardless of the declared charset.
    pub async fn fetch_text(&self, url: &str) -> Result<String, MenuError> {
        let bytes = self.get(url).await?.bytes().await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    pub async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, MenuError> {
        let bytes = self.get(url).await?.bytes().await?;
        Ok(bytes.to_vec())
    }

    pub async fn fetch_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, MenuError> {
        let text = self.fetch_text(url).await?;
        Ok(serde_json::from_str(&text)?)
    }
}
