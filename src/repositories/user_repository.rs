//! User repository for all MongoDB operations related to users.

use futures::TryStreamExt;
use log::{debug, info};
use mongodb::bson::{doc, oid::ObjectId, Document};
use mongodb::{Collection, Database, IndexModel};

use crate::constants::COLLECTION_USERS;
use crate::errors::ApiError;
use crate::models::User;

/// Repository for user-related database operations.
pub struct UserRepository {
    collection: Collection<User>,
}

impl UserRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(COLLECTION_USERS),
        }
    }

    /// Create database indexes for commonly queried fields.
    ///
    /// Called once during application startup. Creates a unique index on
    /// `phone` and a compound index on `role` and `is_active`.
    pub async fn create_indexes(&self) -> Result<(), ApiError> {
        info!("Creating database indexes for users collection...");

        let indexes = vec![
            IndexModel::builder()
                .keys(doc! { "phone": 1 })
                .options(
                    mongodb::options::IndexOptions::builder()
                        .unique(true)
                        .build(),
                )
                .build(),
            IndexModel::builder()
                .keys(doc! { "role": 1, "is_active": 1 })
                .build(),
        ];

        self.collection.create_indexes(indexes).await?;
        Ok(())
    }

    pub async fn insert(&self, user: &User) -> Result<ObjectId, ApiError> {
        let result = self.collection.insert_one(user).await?;
        result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| ApiError::InternalServerError("Invalid inserted id".to_string()))
    }

    pub async fn find_by_id(&self, id: ObjectId) -> Result<Option<User>, ApiError> {
        debug!("Repository: Finding user by ID: {}", id);
        Ok(self.collection.find_one(doc! { "_id": id }).await?)
    }

    pub async fn find_by_phone(&self, phone: &str) -> Result<Option<User>, ApiError> {
        Ok(self.collection.find_one(doc! { "phone": phone }).await?)
    }

    /// Find users with pagination and filtering, newest first.
    pub async fn find_with_filter(
        &self,
        filter: Document,
        skip: u64,
        limit: i64,
    ) -> Result<Vec<User>, ApiError> {
        debug!("Repository: Finding users with filter: {:?}", filter);
        let cursor = self
            .collection
            .find(filter)
            .skip(skip)
            .limit(limit)
            .sort(doc! { "created_at": -1 })
            .await?;

        Ok(cursor.try_collect().await?)
    }

    pub async fn count(&self, filter: Document) -> Result<u64, ApiError> {
        Ok(self.collection.count_documents(filter).await?)
    }

    /// Apply a `$set` update to a user document.
    pub async fn update(&self, id: ObjectId, update: Document) -> Result<(), ApiError> {
        self.collection
            .update_one(doc! { "_id": id }, doc! { "$set": update })
            .await?;
        Ok(())
    }

    pub async fn update_role(&self, id: ObjectId, role: &str) -> Result<(), ApiError> {
        self.collection
            .update_one(
                doc! { "_id": id },
                doc! {
                    "$set": {
                        "role": role,
                        "updated_at": mongodb::bson::DateTime::now()
                    }
                },
            )
            .await?;
        Ok(())
    }

    pub async fn update_last_sign_in(&self, id: ObjectId) -> Result<(), ApiError> {
        self.collection
            .update_one(
                doc! { "_id": id },
                doc! { "$set": { "last_sign_in": mongodb::bson::DateTime::now() } },
            )
            .await?;
        Ok(())
    }
}
