//! User documents and user-facing payloads.

use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;
use validator::Validate;

/// User roles for access control.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Customer,
}

impl Default for Role {
    fn default() -> Self {
        Role::Customer
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::Customer => write!(f, "customer"),
        }
    }
}

impl Role {
    /// Check if this role has admin privileges.
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }

    /// Parse role from string.
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "admin" => Role::Admin,
            _ => Role::Customer,
        }
    }
}

/// User document stored in MongoDB.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Role,
    /// Chat id of the linked Telegram account, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telegram_id: Option<i64>,
    pub is_active: bool,
    pub created_at: mongodb::bson::DateTime,
    pub updated_at: mongodb::bson::DateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_sign_in: Option<mongodb::bson::DateTime>,
}

/// Request payload for updating the current user's profile.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateMeRequest {
    /// Display name (1-100 characters)
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    #[schema(example = "Ivan")]
    pub name: Option<String>,
}

impl UpdateMeRequest {
    /// True when the payload carries at least one field to update.
    pub fn has_updates(&self) -> bool {
        self.name.is_some()
    }
}

/// Request payload for updating a user's role (admin only).
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateRoleRequest {
    /// New role: 'admin' or 'customer'
    #[validate(custom(function = "validate_role"))]
    #[schema(example = "admin")]
    pub role: String,
}

fn validate_role(role: &str) -> Result<(), validator::ValidationError> {
    match role.to_lowercase().as_str() {
        "admin" | "customer" => Ok(()),
        _ => {
            let mut error = validator::ValidationError::new("invalid_role");
            error.message = Some("Role must be either 'admin' or 'customer'".into());
            Err(error)
        }
    }
}

/// Query parameters for the admin user list.
#[derive(Debug, Deserialize)]
pub struct UserListQuery {
    pub page: Option<u64>,
    pub per_page: Option<u64>,
    pub role: Option<String>,
    pub is_active: Option<bool>,
    pub search: Option<String>,
}

/// User data returned in API responses.
#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
pub struct UserResponse {
    /// User's unique identifier
    #[schema(example = "507f1f77bcf86cd799439011")]
    pub id: String,
    /// User's phone number
    #[schema(example = "+79991234567")]
    pub phone: String,
    /// User's display name
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "Ivan")]
    pub name: Option<String>,
    /// User's role
    pub role: Role,
    /// Whether the user is active
    #[schema(example = true)]
    pub is_active: bool,
    /// When the user was created
    pub created_at: DateTime<Utc>,
    /// When the user last signed in
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_sign_in: Option<DateTime<Utc>>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.map(|id| id.to_hex()).unwrap_or_default(),
            phone: user.phone,
            name: user.name,
            role: user.role,
            is_active: user.is_active,
            created_at: DateTime::from_timestamp_millis(user.created_at.timestamp_millis())
                .unwrap_or_default(),
            last_sign_in: user.last_sign_in.map(|dt| {
                DateTime::from_timestamp_millis(dt.timestamp_millis()).unwrap_or_default()
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        assert_eq!(
            serde_json::to_string(&Role::Customer).unwrap(),
            "\"customer\""
        );
    }

    #[test]
    fn role_from_str_defaults_to_customer() {
        assert_eq!(Role::from_str("ADMIN"), Role::Admin);
        assert_eq!(Role::from_str("manager"), Role::Customer);
    }

    #[test]
    fn empty_update_has_no_updates() {
        let update = UpdateMeRequest { name: None };
        assert!(!update.has_updates());
        let update = UpdateMeRequest {
            name: Some("Ivan".to_string()),
        };
        assert!(update.has_updates());
    }
}
