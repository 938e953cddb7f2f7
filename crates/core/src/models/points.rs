//! Balance model for the `/api/points/{userId}` endpoint

use crate::Points;
use serde::{Deserialize, Serialize};

/// Response from `GET /api/points/{userId}`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointsResponse {
    pub success: bool,
    /// Current balance (absent on failure)
    #[serde(default)]
    pub points: Option<Points>,
    #[serde(default)]
    pub message: Option<String>,
}
