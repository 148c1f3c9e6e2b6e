use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::config::WallConfig;
use crate::status::{PollError, StatusSnapshot, StatusSource};

pub struct HttpStatusSource {
    http: Client,
    url: String,
}

impl HttpStatusSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, PollError> {
        let http = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()
            .map_err(|err| PollError::Transport(err.to_string()))?;

        Ok(Self {
            http,
            url: url.into(),
        })
    }

    pub fn from_config(config: &WallConfig) -> Result<Self, PollError> {
        Self::new(config.status_url(), config.status_timeout)
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

fn transport_error(err: reqwest::Error) -> PollError {
    if err.is_timeout() {
        PollError::Timeout
    } else {
        PollError::Transport(err.to_string())
    }
}

#[async_trait]
impl StatusSource for HttpStatusSource {
    async fn fetch(&self) -> Result<StatusSnapshot, PollError> {
        let response = self
            .http
            .get(&self.url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(PollError::Status(status.as_u16()));
        }

        let body = response.bytes().await.map_err(transport_error)?;
        debug!(url = %self.url, bytes = body.len(), "status fetched");
        StatusSnapshot::from_slice(&body)
    }
}
