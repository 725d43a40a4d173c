//! JWT claims issued on sign-in.

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// User id (ObjectId hex)
    pub sub: String,
    pub phone: String,
    /// User role (admin/customer)
    pub role: String,
    /// Expiration timestamp
    pub exp: usize,
    /// Issued at timestamp
    pub iat: usize,
}

impl Claims {
    /// Check if the claims belong to an admin user.
    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }

    /// Check if the claims belong to the specified user ID.
    pub fn is_user(&self, user_id: &str) -> bool {
        self.sub == user_id
    }

    /// Check if the user can access a resource (either admin or owner).
    pub fn can_access(&self, user_id: &str) -> bool {
        self.is_admin() || self.is_user(user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(role: &str) -> Claims {
        Claims {
            sub: "507f1f77bcf86cd799439011".to_string(),
            phone: "+79991234567".to_string(),
            role: role.to_string(),
            exp: 2_000_000_000,
            iat: 1_000_000_000,
        }
    }

    #[test]
    fn admin_can_access_anything() {
        let c = claims("admin");
        assert!(c.is_admin());
        assert!(c.can_access("someone-else"));
    }

    #[test]
    fn customer_can_access_only_self() {
        let c = claims("customer");
        assert!(!c.is_admin());
        assert!(c.can_access("507f1f77bcf86cd799439011"));
        assert!(!c.can_access("507f1f77bcf86cd799439012"));
    }
}
