//! Identity resolution over the in-app browser SDK

use async_trait::async_trait;
use liffpoints_core::{Profile, SdkProfile};
use thiserror::Error;
use tracing::{debug, error, info, warn};

/// Errors raised by the SDK binding
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SdkError {
    /// `init` was rejected; the SDK recovers from this through a login redirect
    #[error("SDK init failed: {0}")]
    InitFailed(String),

    #[error("SDK call failed: {0}")]
    Sdk(String),
}

/// Raw SDK surface (`init`, `isLoggedIn`, `login`, `getProfile`, `getAccessToken`)
#[async_trait]
pub trait LiffSdk: Send + Sync {
    async fn init(&self, liff_id: &str) -> Result<(), SdkError>;

    fn is_logged_in(&self) -> bool;

    /// Start the interactive login redirect. The page reloads afterwards.
    fn login(&self);

    async fn get_profile(&self) -> Result<SdkProfile, SdkError>;

    fn get_access_token(&self) -> Option<String>;
}

/// Outcome of resolving who the user is
#[derive(Debug, Clone, PartialEq)]
pub enum IdentityResolution {
    Profile(Profile),
    /// A login redirect was started; nothing else may happen on this page load
    AuthRedirect,
    Failure(String),
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn resolve_identity(&self) -> IdentityResolution;

    /// Access token of the current session, if logged in
    fn access_token(&self) -> Option<String> {
        None
    }
}

/// [`IdentityProvider`] backed by a [`LiffSdk`]
pub struct LiffIdentity<S> {
    sdk: S,
    liff_id: String,
}

impl<S: LiffSdk> LiffIdentity<S> {
    pub fn new(sdk: S, liff_id: impl Into<String>) -> Self {
        Self {
            sdk,
            liff_id: liff_id.into(),
        }
    }

    pub fn sdk(&self) -> &S {
        &self.sdk
    }

    async fn try_resolve(&self) -> Result<IdentityResolution, SdkError> {
        self.sdk.init(&self.liff_id).await?;

        if !self.sdk.is_logged_in() {
            info!("Not logged in, redirecting to login");
            self.sdk.login();
            return Ok(IdentityResolution::AuthRedirect);
        }

        let profile = self
            .sdk
            .get_profile()
            .await?
            .into_profile()
            .map_err(|e| SdkError::Sdk(e.to_string()))?;

        debug!("Identity resolved for user {}", profile.user_id);
        Ok(IdentityResolution::Profile(profile))
    }
}

#[async_trait]
impl<S: LiffSdk> IdentityProvider for LiffIdentity<S> {
    async fn resolve_identity(&self) -> IdentityResolution {
        match self.try_resolve().await {
            Ok(resolution) => resolution,
            Err(SdkError::InitFailed(reason)) => {
                warn!("SDK init failed ({}), retrying through login", reason);
                self.sdk.login();
                IdentityResolution::AuthRedirect
            }
            Err(e) => {
                error!("Identity resolution failed: {}", e);
                IdentityResolution::Failure(e.to_string())
            }
        }
    }

    fn access_token(&self) -> Option<String> {
        self.sdk.get_access_token()
    }
}
