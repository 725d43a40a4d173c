//! OTP service: code generation, verification and resend throttling.

use chrono::Utc;
use log::debug;
use mongodb::bson::DateTime;
use rand::Rng;
use std::sync::Arc;

use crate::config::CONFIG;
use crate::errors::{is_duplicate_key_error, ApiError};
use crate::models::{Otp, OtpTarget};
use crate::repositories::OtpRepository;
use crate::utils::log_sanitizer::mask_phone;

/// How many times to regenerate a code that collides with an existing one.
const CREATE_RETRIES: u32 = 5;

pub struct OtpService {
    repository: Arc<OtpRepository>,
}

impl OtpService {
    pub fn new(repository: Arc<OtpRepository>) -> Self {
        Self { repository }
    }

    /// Create a code for the phone and target.
    ///
    /// The `(phone, target, code)` unique index may reject a generated code
    /// that is still live for the same phone; on such a collision a fresh
    /// code is generated, up to [`CREATE_RETRIES`] times.
    pub async fn create_code(&self, phone: &str, target: OtpTarget) -> Result<String, ApiError> {
        let mut retries_left = CREATE_RETRIES;
        loop {
            let code = generate_code();
            let otp = Otp {
                id: None,
                phone: phone.to_string(),
                target,
                code: code.clone(),
                created_at: DateTime::now(),
            };

            match self.repository.insert(&otp).await {
                Ok(()) => {
                    debug!("Created {} code for {}", target, mask_phone(phone));
                    return Ok(code);
                }
                Err(err) if is_duplicate_key_error(&err) && retries_left > 0 => {
                    retries_left -= 1;
                    debug!(
                        "Code collision for {}, retrying ({} left)",
                        mask_phone(phone),
                        retries_left
                    );
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    /// True when an unexpired code exists for the phone and target.
    pub async fn is_valid(
        &self,
        phone: &str,
        code: &str,
        target: OtpTarget,
    ) -> Result<bool, ApiError> {
        let not_before = DateTime::from_millis(
            (Utc::now().timestamp() - CONFIG.otp.lifetime_seconds) * 1000,
        );
        let otp = self
            .repository
            .find_active(phone, code, target, not_before)
            .await?;
        Ok(otp.is_some())
    }

    /// Remove a consumed code so it cannot be replayed.
    pub async fn consume(
        &self,
        phone: &str,
        code: &str,
        target: OtpTarget,
    ) -> Result<(), ApiError> {
        self.repository.delete(phone, code, target).await
    }

    /// Seconds the caller must still wait before a new code may be sent,
    /// or `None` when sending is allowed.
    pub async fn resend_wait_seconds(
        &self,
        phone: &str,
        target: OtpTarget,
    ) -> Result<Option<i64>, ApiError> {
        let last = self.repository.find_last_created(phone, target).await?;
        if let Some(otp) = last {
            let elapsed = Utc::now().timestamp() - otp.created_at.timestamp_millis() / 1000;
            let interval = CONFIG.otp.resend_interval_seconds;
            if elapsed < interval {
                return Ok(Some(interval - elapsed));
            }
        }
        Ok(None)
    }
}

/// Generate a 6-digit decimal code, zero-padded.
fn generate_code() -> String {
    let n: u32 = rand::thread_rng().gen_range(0..1_000_000);
    format!("{:06}", n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_is_six_digits() {
        for _ in 0..100 {
            let code = generate_code();
            assert_eq!(code.len(), 6);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn codes_vary() {
        let codes: std::collections::HashSet<String> = (0..50).map(|_| generate_code()).collect();
        assert!(codes.len() > 1);
    }
}
