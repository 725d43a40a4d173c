//! OTP repository for verification code storage.

use log::info;
use mongodb::bson::{doc, DateTime};
use mongodb::options::IndexOptions;
use mongodb::{Collection, Database, IndexModel};
use std::time::Duration;

use crate::config::CONFIG;
use crate::constants::COLLECTION_OTPS;
use crate::errors::ApiError;
use crate::models::{Otp, OtpTarget};

/// Repository for OTP-related database operations.
pub struct OtpRepository {
    collection: Collection<Otp>,
}

impl OtpRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(COLLECTION_OTPS),
        }
    }

    /// Create database indexes for the OTP collection.
    ///
    /// The unique compound index on `(phone, target, code)` backs the
    /// collision-retry loop in the service; the TTL index garbage-collects
    /// stale codes after the configured lifetime.
    pub async fn create_indexes(&self) -> Result<(), ApiError> {
        info!("Creating database indexes for otps collection...");

        let indexes = vec![
            IndexModel::builder()
                .keys(doc! { "phone": 1, "target": 1, "code": 1 })
                .options(IndexOptions::builder().unique(true).build())
                .build(),
            IndexModel::builder()
                .keys(doc! { "created_at": 1 })
                .options(
                    IndexOptions::builder()
                        .expire_after(Duration::from_secs(CONFIG.otp.lifetime_seconds as u64))
                        .build(),
                )
                .build(),
        ];

        self.collection.create_indexes(indexes).await?;
        Ok(())
    }

    /// Insert a new code. Fails with a duplicate-key error when the same
    /// `(phone, target, code)` triple already exists.
    pub async fn insert(&self, otp: &Otp) -> Result<(), mongodb::error::Error> {
        self.collection.insert_one(otp).await?;
        Ok(())
    }

    /// Find an unexpired code for the given phone and target.
    pub async fn find_active(
        &self,
        phone: &str,
        code: &str,
        target: OtpTarget,
        not_before: DateTime,
    ) -> Result<Option<Otp>, ApiError> {
        Ok(self
            .collection
            .find_one(doc! {
                "phone": phone,
                "code": code,
                "target": target.to_string(),
                "created_at": { "$gte": not_before }
            })
            .await?)
    }

    /// Delete a consumed code.
    pub async fn delete(
        &self,
        phone: &str,
        code: &str,
        target: OtpTarget,
    ) -> Result<(), ApiError> {
        self.collection
            .delete_one(doc! {
                "phone": phone,
                "code": code,
                "target": target.to_string(),
            })
            .await?;
        Ok(())
    }

    /// Find the most recently created code for a phone and target.
    pub async fn find_last_created(
        &self,
        phone: &str,
        target: OtpTarget,
    ) -> Result<Option<Otp>, ApiError> {
        Ok(self
            .collection
            .find_one(doc! { "phone": phone, "target": target.to_string() })
            .sort(doc! { "created_at": -1 })
            .await?)
    }
}
