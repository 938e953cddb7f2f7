//! Redemption models for the `/api/redeem` endpoint

use crate::{Points, RedemptionCode, UserId};
use serde::{Deserialize, Serialize};

/// Body of `POST /api/redeem`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedeemRequest {
    pub user_id: UserId,
    pub code: RedemptionCode,
}

/// Response from `POST /api/redeem`
///
/// The backend answers business rejections with `success: false` and a
/// user-facing `message`, sometimes alongside a 4xx status.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedeemResponse {
    pub success: bool,
    /// Balance after the award
    #[serde(default)]
    pub total_points: Option<Points>,
    /// Points granted by this code
    #[serde(default)]
    pub added_points: Option<Points>,
    #[serde(default)]
    pub message: Option<String>,
}
