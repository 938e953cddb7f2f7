//! Client for the relay's `POST /api/line` endpoint

use liffpoints_core::{Error, RelayRequest, RelayResponse, Result};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, error, instrument};

#[derive(Clone)]
pub struct RelayClient {
    http: Client,
    base_url: String,
}

impl RelayClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let http = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Post a message and return the relay's envelope, whatever its status
    #[instrument(skip(self, request), fields(user_id = %request.user_id))]
    pub async fn send(&self, request: &RelayRequest) -> Result<RelayResponse> {
        let url = format!("{}/api/line", self.base_url);

        let response = self.http.post(&url).json(request).send().await?;
        let status = response.status();
        debug!("Relay responded with HTTP {}", status);

        response.json::<RelayResponse>().await.map_err(|e| {
            error!("Failed to parse relay response (HTTP {}): {}", status, e);
            Error::InvalidData(e.to_string())
        })
    }
}
