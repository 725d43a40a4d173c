//! Order repository for placed orders.

use futures::TryStreamExt;
use log::debug;
use mongodb::bson::{doc, oid::ObjectId, Document};
use mongodb::options::ReturnDocument;
use mongodb::{Collection, Database, IndexModel};

use crate::constants::COLLECTION_ORDERS;
use crate::errors::ApiError;
use crate::models::{Order, OrderCondition};

/// Repository for order-related database operations.
pub struct OrderRepository {
    collection: Collection<Order>,
}

impl OrderRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(COLLECTION_ORDERS),
        }
    }

    pub async fn create_indexes(&self) -> Result<(), ApiError> {
        let indexes = vec![
            IndexModel::builder()
                .keys(doc! { "condition": 1, "created_at": -1 })
                .build(),
            IndexModel::builder().keys(doc! { "client": 1 }).build(),
        ];
        self.collection.create_indexes(indexes).await?;
        Ok(())
    }

    pub async fn insert(&self, order: &Order) -> Result<ObjectId, ApiError> {
        let result = self.collection.insert_one(order).await?;
        result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| ApiError::InternalServerError("Invalid inserted id".to_string()))
    }

    pub async fn find_by_id(&self, id: ObjectId) -> Result<Option<Order>, ApiError> {
        debug!("Repository: Finding order by ID: {}", id);
        Ok(self.collection.find_one(doc! { "_id": id }).await?)
    }

    /// Find orders with pagination and filtering, newest first.
    pub async fn find_with_filter(
        &self,
        filter: Document,
        skip: u64,
        limit: i64,
    ) -> Result<Vec<Order>, ApiError> {
        debug!("Repository: Finding orders with filter: {:?}", filter);
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

    /// Move an order through its lifecycle, returning the updated document.
    pub async fn update_condition(
        &self,
        id: ObjectId,
        condition: OrderCondition,
    ) -> Result<Option<Order>, ApiError> {
        Ok(self
            .collection
            .find_one_and_update(
                doc! { "_id": id },
                doc! {
                    "$set": {
                        "condition": condition.to_string(),
                        "updated_at": mongodb::bson::DateTime::now()
                    }
                },
            )
            .return_document(ReturnDocument::After)
            .await?)
    }
}
