//! Rate limiting for authentication endpoints.
//!
//! The OTP endpoints are the obvious brute-force target, so the auth scope
//! runs behind a strict per-IP limiter on top of the per-phone resend
//! throttle enforced by the service.

use actix_governor::{GovernorConfig, GovernorConfigBuilder};

/// Create rate limiter configuration for authentication endpoints.
///
/// Allows a burst of 5 requests with 1 request replenished every 6 seconds
/// (10 per minute).
pub fn create_auth_rate_limiter_config() -> GovernorConfig<
    actix_governor::PeerIpKeyExtractor,
    actix_governor::governor::middleware::NoOpMiddleware<
        actix_governor::governor::clock::QuantaInstant,
    >,
> {
    GovernorConfigBuilder::default()
        .per_second(6)
        .burst_size(5)
        .finish()
        .expect("Failed to create auth rate limiter config")
}
