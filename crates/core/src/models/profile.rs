//! Profile models from the identity SDK

use crate::{Result, UserId};
use serde::{Deserialize, Serialize};

/// Raw profile as returned by the SDK's `getProfile()`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SdkProfile {
    pub display_name: String,
    pub user_id: String,
    #[serde(default)]
    pub picture_url: Option<String>,
    #[serde(default)]
    pub status_message: Option<String>,
}

impl SdkProfile {
    /// Convert to Profile for internal use, validating the user id
    pub fn into_profile(self) -> Result<Profile> {
        Ok(Profile {
            user_id: UserId::parse(&self.user_id)?,
            display_name: self.display_name,
            picture_url: self.picture_url,
        })
    }
}

/// Resolved user profile, immutable for the lifetime of a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub display_name: String,
    pub user_id: UserId,
    #[serde(default)]
    pub picture_url: Option<String>,
}
