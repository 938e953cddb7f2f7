//! Relay state shared across requests

use liffpoints_networking::PushApi;
use std::sync::Arc;

/// Immutable handle cloned into every request
#[derive(Clone)]
pub struct RelayState {
    /// Upstream push client; holds the channel credential
    pub push: Arc<dyn PushApi>,
}

impl RelayState {
    pub fn new(push: Arc<dyn PushApi>) -> Self {
        Self { push }
    }
}
