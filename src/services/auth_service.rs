//! Authentication service: OTP sign-in and JWT issuance.

use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};
use log::{debug, info};
use std::sync::Arc;

use crate::config::CONFIG;
use crate::constants::{ERR_ACCOUNT_DEACTIVATED, ERR_INVALID_OTP, ERR_OTP_RESEND_TOO_SOON};
use crate::errors::ApiError;
use crate::models::{Claims, OtpTarget, User};
use crate::services::{NotificationService, OtpService, UserService};
use crate::utils::log_sanitizer::mask_phone;

pub struct AuthService {
    otp: Arc<OtpService>,
    users: Arc<UserService>,
    notifications: Arc<NotificationService>,
}

impl AuthService {
    pub fn new(
        otp: Arc<OtpService>,
        users: Arc<UserService>,
        notifications: Arc<NotificationService>,
    ) -> Self {
        Self {
            otp,
            users,
            notifications,
        }
    }

    /// Issue a sign-in code for the phone and hand it to the notification
    /// channel. Resends within the configured interval are rejected.
    pub async fn send_code(&self, phone: &str) -> Result<(), ApiError> {
        if let Some(wait) = self
            .otp
            .resend_wait_seconds(phone, OtpTarget::SignIn)
            .await?
        {
            return Err(ApiError::TooManyRequests(format!(
                "{}. Try again in {} seconds.",
                ERR_OTP_RESEND_TOO_SOON, wait
            )));
        }

        let code = self.otp.create_code(phone, OtpTarget::SignIn).await?;
        self.notifications.send_otp_code(phone, &code);
        Ok(())
    }

    /// Verify the code, consume it and sign the user in.
    ///
    /// The user record is created on first sign-in.
    pub async fn sign_in(&self, phone: &str, code: &str) -> Result<(User, String), ApiError> {
        if !self.otp.is_valid(phone, code, OtpTarget::SignIn).await? {
            return Err(ApiError::Unauthorized(ERR_INVALID_OTP.to_string()));
        }
        self.otp.consume(phone, code, OtpTarget::SignIn).await?;

        let user = self.users.find_or_create_by_phone(phone).await?;
        if !user.is_active {
            return Err(ApiError::Unauthorized(ERR_ACCOUNT_DEACTIVATED.to_string()));
        }

        let user_id = user
            .id
            .ok_or_else(|| ApiError::InternalServerError("User without id".to_string()))?;
        self.users.update_last_sign_in(user_id).await?;

        let token = generate_token(&user)?;
        info!("User {} signed in ({})", user_id, mask_phone(phone));

        Ok((user, token))
    }
}

/// Generate a JWT token for a user.
pub fn generate_token(user: &User) -> Result<String, ApiError> {
    let now = Utc::now().timestamp() as usize;
    let exp = now + (CONFIG.jwt.expiration_hours as usize * 3600);

    let user_id = user
        .id
        .ok_or_else(|| ApiError::InternalServerError("User without id".to_string()))?;

    let claims = Claims {
        sub: user_id.to_hex(),
        phone: user.phone.clone(),
        role: user.role.to_string(),
        exp,
        iat: now,
    };

    debug!(
        "Generated token for user {} with role {}",
        claims.sub, user.role
    );

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(CONFIG.jwt.secret.as_bytes()),
    )?;

    Ok(token)
}
