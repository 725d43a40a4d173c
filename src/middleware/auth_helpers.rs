//! Authentication and authorization helper functions.
//!
//! These helpers reduce boilerplate in handlers: extracting claims from
//! authenticated requests and requiring admin privileges.

use actix_web::HttpRequest;
use log::warn;

use crate::constants::{ERR_ADMIN_ONLY, ERR_AUTH_REQUIRED};
use crate::errors::ApiError;
use crate::models::Claims;

use super::RequestExt;

/// Extract claims from request or return Unauthorized error.
///
/// # Example
/// ```ignore
/// let claims = require_auth(&req)?;
/// ```
pub fn require_auth(req: &HttpRequest) -> Result<Claims, ApiError> {
    req.get_claims().ok_or_else(|| {
        warn!("Failed to get claims from request");
        ApiError::Unauthorized(ERR_AUTH_REQUIRED.to_string())
    })
}

/// Require admin role or return Unauthorized error.
///
/// Call this after `require_auth` on admin-only routes.
pub fn require_admin(claims: &Claims) -> Result<(), ApiError> {
    if !claims.is_admin() {
        warn!("Non-admin user {} attempted admin action", claims.sub);
        return Err(ApiError::Unauthorized(ERR_ADMIN_ONLY.to_string()));
    }
    Ok(())
}

/// Decode the bearer token on a public route, if one was sent.
///
/// Public endpoints that merely enrich their behavior for signed-in users
/// (e.g. attaching the client to an order) use this instead of the auth
/// middleware; a missing or invalid token is not an error here.
pub fn optional_claims(req: &HttpRequest) -> Option<Claims> {
    use jsonwebtoken::{decode, DecodingKey, Validation};

    use crate::config::CONFIG;

    let header = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())?;
    let token = header.strip_prefix("Bearer ")?;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(CONFIG.jwt.secret.as_bytes()),
        &Validation::default(),
    )
    .ok()
    .map(|data| data.claims)
}
