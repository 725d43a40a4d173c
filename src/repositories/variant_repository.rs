//! Variant repository for per-product options.

use futures::TryStreamExt;
use log::debug;
use mongodb::bson::{doc, oid::ObjectId, Document};
use mongodb::options::ReturnDocument;
use mongodb::{Collection, Database, IndexModel};

use crate::constants::COLLECTION_VARIANTS;
use crate::errors::ApiError;
use crate::models::Variant;

/// Repository for variant-related database operations.
pub struct VariantRepository {
    collection: Collection<Variant>,
}

impl VariantRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(COLLECTION_VARIANTS),
        }
    }

    pub async fn create_indexes(&self) -> Result<(), ApiError> {
        let indexes = vec![IndexModel::builder()
            .keys(doc! { "product_id": 1 })
            .build()];
        self.collection.create_indexes(indexes).await?;
        Ok(())
    }

    pub async fn insert(&self, variant: &Variant) -> Result<ObjectId, ApiError> {
        let result = self.collection.insert_one(variant).await?;
        result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| ApiError::InternalServerError("Invalid inserted id".to_string()))
    }

    /// Find a variant by id, scoped to its owning product.
    pub async fn find_by_id(
        &self,
        product_id: ObjectId,
        variant_id: ObjectId,
    ) -> Result<Option<Variant>, ApiError> {
        Ok(self
            .collection
            .find_one(doc! { "_id": variant_id, "product_id": product_id })
            .await?)
    }

    /// All variants of a product, visible-only when `only_visible` is set.
    pub async fn find_by_product(
        &self,
        product_id: ObjectId,
        only_visible: bool,
    ) -> Result<Vec<Variant>, ApiError> {
        let mut filter = doc! { "product_id": product_id };
        if only_visible {
            filter.insert("show", true);
        }
        debug!("Repository: Finding variants with filter: {:?}", filter);
        let cursor = self
            .collection
            .find(filter)
            .sort(doc! { "created_at": 1 })
            .await?;
        Ok(cursor.try_collect().await?)
    }

    /// Apply a `$set` update scoped to the owning product, returning the
    /// updated document.
    pub async fn find_and_update(
        &self,
        product_id: ObjectId,
        variant_id: ObjectId,
        update: Document,
    ) -> Result<Option<Variant>, ApiError> {
        Ok(self
            .collection
            .find_one_and_update(
                doc! { "_id": variant_id, "product_id": product_id },
                doc! { "$set": update },
            )
            .return_document(ReturnDocument::After)
            .await?)
    }

    /// Delete a variant. Returns true when a document was removed.
    pub async fn delete(
        &self,
        product_id: ObjectId,
        variant_id: ObjectId,
    ) -> Result<bool, ApiError> {
        let result = self
            .collection
            .delete_one(doc! { "_id": variant_id, "product_id": product_id })
            .await?;
        Ok(result.deleted_count > 0)
    }

    /// Remove all variants of a product (product deletion cascade).
    pub async fn delete_by_product(&self, product_id: ObjectId) -> Result<u64, ApiError> {
        let result = self
            .collection
            .delete_many(doc! { "product_id": product_id })
            .await?;
        Ok(result.deleted_count)
    }
}
