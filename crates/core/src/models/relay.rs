//! Relay request/response envelopes and the LINE push-message payload

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body accepted by `POST /api/line`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelayRequest {
    pub user_id: String,
    pub message: String,
}

/// Envelope returned by the relay
///
/// Serialized untagged: `{success: true, data}` or `{error}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RelayResponse {
    Success { success: bool, data: Value },
    Failure { error: Value },
}

impl RelayResponse {
    pub fn success(data: Value) -> Self {
        RelayResponse::Success {
            success: true,
            data,
        }
    }

    pub fn failure(error: impl Into<Value>) -> Self {
        RelayResponse::Failure {
            error: error.into(),
        }
    }
}

/// A single text message in a push request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PushMessage {
    Text { text: String },
}

/// Body of the platform's `POST /v2/bot/message/push`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushMessageRequest {
    pub to: String,
    pub messages: Vec<PushMessage>,
}

impl PushMessageRequest {
    pub fn text(to: &str, text: &str) -> Self {
        Self {
            to: to.to_string(),
            messages: vec![PushMessage::Text {
                text: text.to_string(),
            }],
        }
    }
}

/// Raw upstream answer: status plus JSON body, passed through unchanged
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamReply {
    pub status: u16,
    pub body: Value,
}

impl UpstreamReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
