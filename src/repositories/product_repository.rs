//! Product repository for catalog storage.

use futures::TryStreamExt;
use log::debug;
use mongodb::bson::{doc, oid::ObjectId, Document};
use mongodb::options::ReturnDocument;
use mongodb::{Collection, Database, IndexModel};

use crate::constants::COLLECTION_PRODUCTS;
use crate::errors::ApiError;
use crate::models::Product;

/// Repository for product-related database operations.
pub struct ProductRepository {
    collection: Collection<Product>,
}

impl ProductRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(COLLECTION_PRODUCTS),
        }
    }

    /// Create database indexes for catalog listing queries.
    pub async fn create_indexes(&self) -> Result<(), ApiError> {
        let indexes = vec![IndexModel::builder()
            .keys(doc! { "show": 1, "created_at": -1 })
            .build()];
        self.collection.create_indexes(indexes).await?;
        Ok(())
    }

    pub async fn insert(&self, product: &Product) -> Result<ObjectId, ApiError> {
        let result = self.collection.insert_one(product).await?;
        result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| ApiError::InternalServerError("Invalid inserted id".to_string()))
    }

    pub async fn find_by_id(&self, id: ObjectId) -> Result<Option<Product>, ApiError> {
        debug!("Repository: Finding product by ID: {}", id);
        Ok(self.collection.find_one(doc! { "_id": id }).await?)
    }

    /// Find products with pagination and filtering, newest first.
    pub async fn find_with_filter(
        &self,
        filter: Document,
        skip: u64,
        limit: i64,
    ) -> Result<Vec<Product>, ApiError> {
        debug!("Repository: Finding products with filter: {:?}", filter);
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

    /// Apply a `$set` update and return the updated document.
    ///
    /// The filter may constrain `product_type` so that a SINGLE product
    /// cannot be rewritten through the VARIANT route and vice versa.
    pub async fn find_and_update(
        &self,
        filter: Document,
        update: Document,
    ) -> Result<Option<Product>, ApiError> {
        Ok(self
            .collection
            .find_one_and_update(filter, doc! { "$set": update })
            .return_document(ReturnDocument::After)
            .await?)
    }

    /// Attach image filenames, skipping duplicates.
    pub async fn add_to_set_images(
        &self,
        id: ObjectId,
        images: &[String],
    ) -> Result<Option<Product>, ApiError> {
        Ok(self
            .collection
            .find_one_and_update(
                doc! { "_id": id },
                doc! {
                    "$addToSet": { "images": { "$each": images } },
                    "$set": { "updated_at": mongodb::bson::DateTime::now() }
                },
            )
            .return_document(ReturnDocument::After)
            .await?)
    }

    /// Detach a single image filename.
    pub async fn pull_image(
        &self,
        id: ObjectId,
        image: &str,
    ) -> Result<Option<Product>, ApiError> {
        Ok(self
            .collection
            .find_one_and_update(
                doc! { "_id": id },
                doc! {
                    "$pull": { "images": image },
                    "$set": { "updated_at": mongodb::bson::DateTime::now() }
                },
            )
            .return_document(ReturnDocument::After)
            .await?)
    }

    /// Delete a product. Returns true when a document was removed.
    pub async fn delete(&self, id: ObjectId) -> Result<bool, ApiError> {
        let result = self.collection.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count > 0)
    }
}
