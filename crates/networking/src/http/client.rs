//! HTTP client for the external points backend

use liffpoints_core::{
    ClientConfig, Error, PointsResponse, RedeemRequest, RedeemResponse, Result, UserId,
};
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT},
    Client,
};
use std::time::Duration;
use tracing::{debug, error, instrument, warn};

/// Client for the points ledger (`/api/points/{userId}` and `/api/redeem`)
///
/// The ledger is authoritative for balances and for code validity; this
/// client never inspects codes itself.
#[derive(Clone)]
pub struct PointsClient {
    http: Client,
    base_url: String,
    /// Optional identity access token forwarded as a bearer credential
    access_token: Option<String>,
}

impl PointsClient {
    /// Create a client for the backend at `base_url`
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let http = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            access_token: None,
        })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Self::new(&config.backend_base_url, config.http_timeout)
    }

    /// Attach the SDK access token to every later request
    pub fn set_access_token(&mut self, token: impl Into<String>) {
        self.access_token = Some(token.into());
    }

    fn default_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.access_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Read the current balance
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn get_points(&self, user_id: &UserId) -> Result<PointsResponse> {
        let url = format!("{}/api/points/{}", self.base_url, user_id);
        debug!("Fetching points from: {}", url);

        let response = self
            .authorize(self.http.get(&url).headers(self.default_headers()))
            .send()
            .await?;

        let status = response.status();
        debug!("Points response status: {}", status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Points request failed with status {}: {}", status, body);
            return Err(Error::UpstreamStatus {
                status: status.as_u16(),
                body,
            });
        }

        let points: PointsResponse = response.json().await.map_err(|e| {
            error!("Failed to parse points response: {}", e);
            Error::InvalidData(e.to_string())
        })?;

        debug!("Points fetched: success={}, points={:?}", points.success, points.points);
        Ok(points)
    }

    /// Submit a redemption code
    ///
    /// A well-formed `{success: false, ...}` body is returned as `Ok` even
    /// when the backend pairs it with a 4xx status.
    #[instrument(skip(self, request), fields(user_id = %request.user_id, code = %request.code))]
    pub async fn redeem(&self, request: &RedeemRequest) -> Result<RedeemResponse> {
        let url = format!("{}/api/redeem", self.base_url);
        debug!("Redeeming code via: {}", url);

        let response = self
            .authorize(self.http.post(&url).headers(self.default_headers()))
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body_text = response.text().await.map_err(|e| {
            error!("Failed to read redeem response body: {}", e);
            Error::NetworkError(e.to_string())
        })?;

        match serde_json::from_str::<RedeemResponse>(&body_text) {
            Ok(redeemed) => {
                if !status.is_success() {
                    warn!("Redeem returned HTTP {} with business payload", status);
                }
                debug!(
                    "Redeem result: success={}, total={:?}, added={:?}",
                    redeemed.success, redeemed.total_points, redeemed.added_points
                );
                Ok(redeemed)
            }
            Err(_) if !status.is_success() => {
                error!("Redeem request failed: HTTP {} - {}", status, body_text);
                Err(Error::UpstreamStatus {
                    status: status.as_u16(),
                    body: body_text,
                })
            }
            Err(e) => {
                error!(
                    "Failed to parse redeem response: {}. Body preview: {}",
                    e,
                    body_text.chars().take(200).collect::<String>()
                );
                Err(Error::InvalidData(e.to_string()))
            }
        }
    }
}
