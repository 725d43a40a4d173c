//! One-time password documents and auth payloads.

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;
use validator::Validate;

use crate::models::UserResponse;

/// What the code authorizes.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum OtpTarget {
    SignIn,
}

impl fmt::Display for OtpTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OtpTarget::SignIn => write!(f, "sign-in"),
        }
    }
}

/// OTP document stored in MongoDB.
///
/// A TTL index on `created_at` garbage-collects stale codes; the service
/// additionally checks the configured lifetime on verification.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Otp {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub phone: String,
    pub target: OtpTarget,
    pub code: String,
    pub created_at: mongodb::bson::DateTime,
}

/// Request payload for requesting a verification code.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SendCodeRequest {
    /// Phone number in international format
    #[validate(custom(function = "crate::validators::validate_phone"))]
    #[schema(example = "+79991234567")]
    pub phone: String,
}

/// Request payload for signing in with a verification code.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SignInRequest {
    /// Phone number in international format
    #[validate(custom(function = "crate::validators::validate_phone"))]
    #[schema(example = "+79991234567")]
    pub phone: String,
    /// Verification code from the sent message
    #[validate(length(equal = 6, message = "Code must be 6 digits"))]
    #[schema(example = "123456")]
    pub code: String,
}

/// Response for a successful sign-in.
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    /// Whether the request was successful
    pub success: bool,
    /// Response message
    pub message: String,
    /// JWT token for authentication
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub token: String,
    /// User information
    pub user: UserResponse,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_serializes_kebab_case() {
        assert_eq!(
            serde_json::to_string(&OtpTarget::SignIn).unwrap(),
            "\"sign-in\""
        );
        assert_eq!(OtpTarget::SignIn.to_string(), "sign-in");
    }
}
