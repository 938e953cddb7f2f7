//! "Send a message to the bot" action
//!
//! Posts a greeting for the signed-in user through the relay and turns the
//! relay's answer into the text shown to the user.

use crate::widget::messages;
use liffpoints_core::{Profile, RelayRequest};
use liffpoints_networking::RelayApi;
use tracing::{error, info};

/// Send the greeting and return the notice to display
pub async fn send_greeting(relay: &dyn RelayApi, profile: &Profile) -> String {
    let request = RelayRequest {
        user_id: profile.user_id.to_string(),
        message: messages::greeting(&profile.display_name),
    };

    match relay.relay(&request).await {
        Ok(response) => {
            info!("Greeting relayed for {}", profile.user_id);
            let body = serde_json::to_string(&response).unwrap_or_default();
            format!("ผลลัพธ์: {}", body)
        }
        Err(e) => {
            error!("Send message error: {}", e);
            messages::SEND_FAILED.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use liffpoints_core::{Error, RelayResponse, Result, UserId};
    use serde_json::json;
    use std::sync::Mutex;

    struct FakeRelay {
        reply: Mutex<Option<Result<RelayResponse>>>,
        seen: Mutex<Vec<RelayRequest>>,
    }

    impl FakeRelay {
        fn new(reply: Result<RelayResponse>) -> Self {
            Self {
                reply: Mutex::new(Some(reply)),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl RelayApi for FakeRelay {
        async fn relay(&self, request: &RelayRequest) -> Result<RelayResponse> {
            self.seen.lock().unwrap().push(request.clone());
            self.reply
                .lock()
                .unwrap()
                .take()
                .unwrap_or_else(|| Err(Error::Validation("called twice".into())))
        }
    }

    fn profile() -> Profile {
        Profile {
            display_name: "Somchai".to_string(),
            user_id: UserId::parse("U1").unwrap(),
            picture_url: None,
        }
    }

    #[tokio::test]
    async fn test_greeting_payload_and_notice() {
        let relay = FakeRelay::new(Ok(RelayResponse::success(json!({}))));
        let notice = send_greeting(&relay, &profile()).await;

        assert_eq!(notice, r#"ผลลัพธ์: {"success":true,"data":{}}"#);
        let seen = relay.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].user_id, "U1");
        assert_eq!(seen[0].message, "สวัสดี Somchai จาก LIFF!");
    }

    #[tokio::test]
    async fn test_transport_failure_notice() {
        let relay = FakeRelay::new(Err(Error::NetworkError("refused".into())));
        assert_eq!(send_greeting(&relay, &profile()).await, messages::SEND_FAILED);
    }
}
