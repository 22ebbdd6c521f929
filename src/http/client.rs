//! Consumer side transport: fetch the styles document from the producer.

use std::time::Duration;

use reqwest::Client;
use url::Url;

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::http::request::request_id;

pub struct StyleClient {
    client: Client,
    base_url: Url,
}

impl StyleClient {
    pub fn new(base_url: &str, config: &ClientConfig) -> Result<Self> {
        // Single request per run, no idle pooling.
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .pool_max_idle_per_host(0)
            .no_proxy()
            .build()?;

        Ok(Self {
            client,
            base_url: Url::parse(base_url)?,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `GET /` and return the body text. Non-2xx statuses are errors.
    pub async fn fetch(&self) -> Result<String> {
        let url = self.base_url.join("/")?;
        tracing::debug!(url = %url, "Requesting styles");

        let resp = self.client.get(url).send().await?;

        let status = resp.status();
        let request_id = request_id(resp.headers()).to_string();
        let text = resp.text().await?;

        if !status.is_success() {
            tracing::error!(status = %status, request_id = %request_id, "Producer returned an error");
            return Err(Error::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        tracing::info!(
            status = %status,
            request_id = %request_id,
            bytes = text.len(),
            "Response received"
        );
        Ok(text)
    }
}
