//! Shared type definitions and newtypes

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque chat-platform user identifier (e.g. `U4af4980629...`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Validate a raw identifier
    ///
    /// The id ends up verbatim in a URL path segment, so only ASCII
    /// letters, digits, `_` and `-` are accepted. That also rules out dot
    /// segments and percent escapes.
    pub fn parse(raw: &str) -> Result<Self> {
        if raw.is_empty() {
            return Err(Error::Validation("userId must not be empty".to_string()));
        }
        if !raw
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-'))
        {
            return Err(Error::Validation(format!("malformed userId: {:?}", raw)));
        }
        Ok(UserId(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Promotional code, normalized for transmission (trimmed, upper-case)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RedemptionCode(String);

impl RedemptionCode {
    /// Normalize user input; blank input is rejected
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(Error::Validation("redemption code must not be empty".to_string()));
        }
        Ok(RedemptionCode(trimmed.to_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RedemptionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Points amount (balances and awards are never negative)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Points(pub u64);

impl fmt::Display for Points {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_is_trimmed_and_uppercased() {
        let code = RedemptionCode::parse("  welcome2025 \n").unwrap();
        assert_eq!(code.as_str(), "WELCOME2025");
    }

    #[test]
    fn test_blank_code_rejected() {
        assert!(RedemptionCode::parse("").is_err());
        assert!(RedemptionCode::parse("   \t").is_err());
    }

    #[test]
    fn test_user_id_validation() {
        assert_eq!(UserId::parse("U1").unwrap().as_str(), "U1");
        assert!(UserId::parse("").is_err());
        assert!(UserId::parse("U 1").is_err());
        assert!(UserId::parse("../admin").is_err());
        assert_eq!(
            UserId::parse("U4af4980629abcdef0123456789abcdef").unwrap().as_str(),
            "U4af4980629abcdef0123456789abcdef"
        );
        assert!(UserId::parse("test_user-01").is_ok());
    }

    #[test]
    fn test_user_id_rejects_path_tricks() {
        for raw in [".", "..", "%2e%2e", "U1%2F", "U1.", "U1?x=1", "U1#frag", "ユーザー"] {
            assert!(UserId::parse(raw).is_err(), "accepted {:?}", raw);
        }
    }

    #[test]
    fn test_points_deserialize_rejects_negative() {
        assert_eq!(serde_json::from_str::<Points>("120").unwrap(), Points(120));
        assert!(serde_json::from_str::<Points>("-5").is_err());
    }
}
