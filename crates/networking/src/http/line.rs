//! Push-message client for the LINE Messaging API

use liffpoints_core::{Error, PushMessageRequest, RelayConfig, Result, UpstreamReply};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, error, instrument, warn};

const PUSH_PATH: &str = "/v2/bot/message/push";

/// Server-side client holding the channel access token
///
/// One instance is shared by all relay requests; it holds no per-request
/// state.
#[derive(Clone)]
pub struct LineClient {
    http: Client,
    api_base: String,
    channel_access_token: String,
}

impl LineClient {
    pub fn new(api_base: &str, channel_access_token: &str, timeout: Duration) -> Result<Self> {
        let http = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            api_base: api_base.trim_end_matches('/').to_string(),
            channel_access_token: channel_access_token.to_string(),
        })
    }

    pub fn from_config(config: &RelayConfig) -> Result<Self> {
        Self::new(
            &config.line_api_base,
            &config.channel_access_token,
            config.http_timeout,
        )
    }

    /// Send one push request and return the upstream status and JSON body
    ///
    /// Non-2xx statuses are not errors here; they come back in the reply
    /// for the caller to pass through. A body that is not JSON is an error.
    #[instrument(skip(self, request), fields(to = %request.to))]
    pub async fn push_message(&self, request: &PushMessageRequest) -> Result<UpstreamReply> {
        let url = format!("{}{}", self.api_base, PUSH_PATH);
        debug!("Pushing {} message(s) via {}", request.messages.len(), url);

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.channel_access_token)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                error!("Push request failed: {}", e);
                Error::NetworkError(e.to_string())
            })?;

        let status = response.status().as_u16();
        let body_text = response.text().await.map_err(|e| {
            error!("Failed to read push response body: {}", e);
            Error::NetworkError(e.to_string())
        })?;

        let body: serde_json::Value = serde_json::from_str(&body_text).map_err(|e| {
            error!("Push response (HTTP {}) is not JSON: {}", status, e);
            Error::InvalidData(e.to_string())
        })?;

        let reply = UpstreamReply { status, body };
        if reply.is_success() {
            debug!("Push accepted (HTTP {})", status);
        } else {
            warn!("Push rejected upstream (HTTP {}): {}", status, reply.body);
        }
        Ok(reply)
    }
}
