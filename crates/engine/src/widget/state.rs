//! Widget state machine types

use chrono::{DateTime, Utc};
use liffpoints_core::{Points, Profile, RedemptionCode};
use serde::Serialize;

/// Lifecycle of the redemption widget
///
/// ```text
/// Initializing --profile--> Ready --submit--> Submitting --response--> Resolved
///      |                                          ^                       |
///      +--redirect--> Unauthenticated             +--------submit---------+
/// ```
///
/// A failed identity resolution leaves the widget in `Initializing`.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetState {
    Initializing,
    Unauthenticated,
    Ready {
        profile: Profile,
    },
    Submitting {
        profile: Profile,
        code: RedemptionCode,
    },
    Resolved {
        profile: Profile,
        outcome: RedemptionOutcome,
    },
}

impl WidgetState {
    pub fn profile(&self) -> Option<&Profile> {
        match self {
            WidgetState::Ready { profile }
            | WidgetState::Submitting { profile, .. }
            | WidgetState::Resolved { profile, .. } => Some(profile),
            WidgetState::Initializing | WidgetState::Unauthenticated => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            WidgetState::Initializing => "initializing",
            WidgetState::Unauthenticated => "unauthenticated",
            WidgetState::Ready { .. } => "ready",
            WidgetState::Submitting { .. } => "submitting",
            WidgetState::Resolved { .. } => "resolved",
        }
    }
}

/// Cached copy of the backend's balance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Balance {
    #[default]
    Unknown,
    Known(Points),
}

/// Result of one redemption attempt, kept until the next submit
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RedemptionOutcome {
    pub success: bool,
    pub message: String,
    pub resolved_at: DateTime<Utc>,
}
