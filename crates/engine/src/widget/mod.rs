//! Client redemption widget
//!
//! Owns the ephemeral UI state of one session: who the user is, the cached
//! balance, the code input field and the last redemption result. Codes are
//! validated by the backend only.

pub mod messages;
mod state;

pub use state::{Balance, RedemptionOutcome, WidgetState};

use crate::identity::{IdentityProvider, IdentityResolution, LiffIdentity, LiffSdk};
use chrono::Utc;
use liffpoints_core::{
    ClientConfig, Points, Profile, RedeemRequest, RedeemResponse, RedemptionCode,
};
use liffpoints_networking::{PointsBackend, PointsClient};
use thiserror::Error;
use tracing::{debug, error, info, instrument, warn};

/// Why a submit was refused before any request went out
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    #[error("identity is not resolved")]
    NotReady,

    #[error("a redemption is already in flight")]
    InFlight,

    #[error("redemption code is empty")]
    EmptyCode,

    #[error("no redemption is in flight")]
    NotSubmitting,
}

pub struct RedemptionWidget<B, I> {
    backend: B,
    identity: I,
    state: WidgetState,
    balance: Balance,
    code_input: String,
    notice: Option<String>,
}

impl<B: PointsBackend, I: IdentityProvider> RedemptionWidget<B, I> {
    pub fn new(backend: B, identity: I) -> Self {
        Self {
            backend,
            identity,
            state: WidgetState::Initializing,
            balance: Balance::Unknown,
            code_input: String::new(),
            notice: None,
        }
    }

    pub fn state(&self) -> &WidgetState {
        &self.state
    }

    pub fn profile(&self) -> Option<&Profile> {
        self.state.profile()
    }

    pub fn balance(&self) -> Balance {
        self.balance
    }

    /// Balance as rendered: the number, or a placeholder while unknown
    pub fn points_label(&self) -> String {
        match self.balance {
            Balance::Known(points) => points.to_string(),
            Balance::Unknown => messages::POINTS_PLACEHOLDER.to_string(),
        }
    }

    pub fn code_input(&self) -> &str {
        &self.code_input
    }

    pub fn set_code_input(&mut self, input: impl Into<String>) {
        self.code_input = input.into();
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.state, WidgetState::Submitting { .. })
    }

    /// Outcome of the most recent attempt
    pub fn last_outcome(&self) -> Option<&RedemptionOutcome> {
        match &self.state {
            WidgetState::Resolved { outcome, .. } => Some(outcome),
            _ => None,
        }
    }

    /// Page-level notice such as a profile load failure
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Resolve identity, then load the balance
    ///
    /// Only acts from `Initializing`. A login redirect moves to
    /// `Unauthenticated`; a failure stays in `Initializing` with a notice.
    #[instrument(skip(self))]
    pub async fn initialize(&mut self) {
        if self.state != WidgetState::Initializing {
            debug!("initialize ignored in state {}", self.state.name());
            return;
        }

        match self.identity.resolve_identity().await {
            IdentityResolution::Profile(profile) => {
                info!("Session ready for {}", profile.display_name);
                self.notice = None;
                if let Some(token) = self.identity.access_token() {
                    self.backend.set_access_token(token);
                }
                self.state = WidgetState::Ready { profile };
                self.refresh_balance().await;
            }
            IdentityResolution::AuthRedirect => {
                self.state = WidgetState::Unauthenticated;
            }
            IdentityResolution::Failure(reason) => {
                error!("Could not resolve identity: {}", reason);
                self.notice = Some(messages::PROFILE_LOAD_FAILED.to_string());
            }
        }
    }

    /// Re-read the balance from the backend
    ///
    /// Failures are logged and keep the previous value.
    pub async fn refresh_balance(&mut self) -> Balance {
        let Some(user_id) = self.state.profile().map(|p| p.user_id.clone()) else {
            debug!("Balance refresh skipped: no profile");
            return self.balance;
        };

        match self.backend.fetch_points(&user_id).await {
            Ok(resp) if resp.success => match resp.points {
                Some(points) => {
                    debug!("Balance for {} is {}", user_id, points);
                    self.balance = Balance::Known(points);
                }
                None => warn!("Points response for {} had no balance", user_id),
            },
            Ok(resp) => warn!(
                "Points lookup for {} rejected: {}",
                user_id,
                resp.message.unwrap_or_default()
            ),
            Err(e) => warn!("Points lookup for {} failed: {}", user_id, e),
        }
        self.balance
    }

    /// Gate and validate a submission, moving to `Submitting`
    ///
    /// Returns the request to send. Nothing changes when an error is
    /// returned.
    pub fn begin_submit(&mut self) -> Result<RedeemRequest, SubmitError> {
        let profile = match &self.state {
            WidgetState::Ready { profile } | WidgetState::Resolved { profile, .. } => profile,
            WidgetState::Submitting { .. } => return Err(SubmitError::InFlight),
            WidgetState::Initializing | WidgetState::Unauthenticated => {
                return Err(SubmitError::NotReady)
            }
        };

        let code =
            RedemptionCode::parse(&self.code_input).map_err(|_| SubmitError::EmptyCode)?;

        let request = RedeemRequest {
            user_id: profile.user_id.clone(),
            code: code.clone(),
        };
        self.state = WidgetState::Submitting {
            profile: profile.clone(),
            code,
        };
        Ok(request)
    }

    /// Apply the backend's answer to an in-flight submission
    ///
    /// Clears the code input and releases the gate on every path.
    pub fn complete_submit(
        &mut self,
        response: liffpoints_core::Result<RedeemResponse>,
    ) -> Result<RedemptionOutcome, SubmitError> {
        let profile = match std::mem::replace(&mut self.state, WidgetState::Initializing) {
            WidgetState::Submitting { profile, .. } => profile,
            other => {
                self.state = other;
                return Err(SubmitError::NotSubmitting);
            }
        };

        let (success, message) = match response {
            Ok(resp) if resp.success => {
                match resp.total_points {
                    Some(total) => self.balance = Balance::Known(total),
                    None => warn!("Redeem succeeded without totalPoints; balance kept"),
                }
                let added = resp.added_points.unwrap_or(Points(0));
                info!("Code redeemed for {}: +{}", profile.user_id, added);
                (true, messages::redeem_success(added))
            }
            Ok(resp) => {
                let message = resp
                    .message
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| messages::REDEEM_REJECTED.to_string());
                info!("Code rejected for {}: {}", profile.user_id, message);
                (false, message)
            }
            Err(e) => {
                error!("Redeem request failed: {}", e);
                (false, messages::SERVER_UNREACHABLE.to_string())
            }
        };

        self.code_input.clear();
        let outcome = RedemptionOutcome {
            success,
            message,
            resolved_at: Utc::now(),
        };
        self.state = WidgetState::Resolved {
            profile,
            outcome: outcome.clone(),
        };
        Ok(outcome)
    }

    /// Submit the current code input and wait for the result
    #[instrument(skip(self))]
    pub async fn submit(&mut self) -> Result<RedemptionOutcome, SubmitError> {
        let request = self.begin_submit()?;
        let response = self.backend.redeem(&request).await;
        self.complete_submit(response)
    }
}

impl<S: LiffSdk> RedemptionWidget<PointsClient, LiffIdentity<S>> {
    /// Wire the HTTP backend client and the SDK identity from configuration
    pub fn from_config(config: &ClientConfig, sdk: S) -> liffpoints_core::Result<Self> {
        let backend = PointsClient::from_config(config)?;
        Ok(Self::new(backend, LiffIdentity::new(sdk, config.liff_id.clone())))
    }
}
