//! Trait seams over the raw HTTP clients
//!
//! The widget and the relay depend on these traits rather than on the
//! concrete clients, so tests can swap in fakes without a network.

use crate::{LineClient, PointsClient, RelayClient};
use async_trait::async_trait;
use liffpoints_core::{
    PointsResponse, PushMessageRequest, RedeemRequest, RedeemResponse, RelayRequest,
    RelayResponse, Result, UpstreamReply, UserId,
};

/// The external points ledger
#[async_trait]
pub trait PointsBackend: Send + Sync {
    async fn fetch_points(&self, user_id: &UserId) -> Result<PointsResponse>;

    async fn redeem(&self, request: &RedeemRequest) -> Result<RedeemResponse>;

    /// Credential of the signed-in session, for backends that want one
    fn set_access_token(&mut self, _token: String) {}
}

/// The messaging platform's push endpoint
#[async_trait]
pub trait PushApi: Send + Sync {
    async fn push(&self, request: &PushMessageRequest) -> Result<UpstreamReply>;
}

/// The relay route, seen from a client
#[async_trait]
pub trait RelayApi: Send + Sync {
    async fn relay(&self, request: &RelayRequest) -> Result<RelayResponse>;
}

#[async_trait]
impl PointsBackend for PointsClient {
    async fn fetch_points(&self, user_id: &UserId) -> Result<PointsResponse> {
        self.get_points(user_id).await
    }

    async fn redeem(&self, request: &RedeemRequest) -> Result<RedeemResponse> {
        PointsClient::redeem(self, request).await
    }

    fn set_access_token(&mut self, token: String) {
        PointsClient::set_access_token(self, token);
    }
}

#[async_trait]
impl PushApi for LineClient {
    async fn push(&self, request: &PushMessageRequest) -> Result<UpstreamReply> {
        self.push_message(request).await
    }
}

#[async_trait]
impl RelayApi for RelayClient {
    async fn relay(&self, request: &RelayRequest) -> Result<RelayResponse> {
        self.send(request).await
    }
}
