//! Variant service for per-product purchasable options.

use log::info;
use mongodb::bson::{doc, oid::ObjectId};
use std::sync::Arc;

use crate::constants::{ERR_NO_DATA_FOR_UPDATING, ERR_VARIANT_NOT_FOUND};
use crate::errors::ApiError;
use crate::models::{CreateVariantRequest, UpdateVariantRequest, Variant};
use crate::repositories::VariantRepository;

pub struct VariantService {
    repository: Arc<VariantRepository>,
}

impl VariantService {
    pub fn new(repository: Arc<VariantRepository>) -> Self {
        Self { repository }
    }

    /// Create a variant under an already-verified VARIANT product.
    pub async fn create(
        &self,
        product_id: ObjectId,
        req: CreateVariantRequest,
    ) -> Result<Variant, ApiError> {
        let now = mongodb::bson::DateTime::now();
        let variant = Variant {
            id: None,
            product_id,
            title: req.title,
            icon: req.icon,
            show: req.show,
            cost: req.cost,
            weight: req.weight,
            created_at: now,
            updated_at: now,
        };

        let id = self.repository.insert(&variant).await?;
        info!("Created variant {} for product {}", id, product_id);

        Ok(Variant {
            id: Some(id),
            ..variant
        })
    }

    pub async fn find_by_id(
        &self,
        product_id: ObjectId,
        variant_id: ObjectId,
    ) -> Result<Option<Variant>, ApiError> {
        self.repository.find_by_id(product_id, variant_id).await
    }

    pub async fn find_by_product(
        &self,
        product_id: ObjectId,
        only_visible: bool,
    ) -> Result<Vec<Variant>, ApiError> {
        self.repository.find_by_product(product_id, only_visible).await
    }

    /// Partially update a variant; an empty payload is rejected.
    pub async fn find_and_update(
        &self,
        product_id: ObjectId,
        variant_id: ObjectId,
        update: UpdateVariantRequest,
    ) -> Result<Variant, ApiError> {
        if !update.has_updates() {
            return Err(ApiError::BadRequest(ERR_NO_DATA_FOR_UPDATING.to_string()));
        }

        let mut set = doc! { "updated_at": mongodb::bson::DateTime::now() };
        if let Some(title) = update.title {
            set.insert("title", title);
        }
        if let Some(icon) = update.icon {
            set.insert("icon", icon);
        }
        if let Some(show) = update.show {
            set.insert("show", show);
        }
        if let Some(cost) = update.cost {
            set.insert("cost", cost);
        }
        if let Some(weight) = update.weight {
            set.insert("weight", weight);
        }

        self.repository
            .find_and_update(product_id, variant_id, set)
            .await?
            .ok_or_else(|| ApiError::NotFound(ERR_VARIANT_NOT_FOUND.to_string()))
    }

    pub async fn delete(
        &self,
        product_id: ObjectId,
        variant_id: ObjectId,
    ) -> Result<(), ApiError> {
        if !self.repository.delete(product_id, variant_id).await? {
            return Err(ApiError::NotFound(ERR_VARIANT_NOT_FOUND.to_string()));
        }
        info!("Deleted variant {} of product {}", variant_id, product_id);
        Ok(())
    }

    /// Product deletion cascade.
    pub async fn delete_by_product(&self, product_id: ObjectId) -> Result<u64, ApiError> {
        self.repository.delete_by_product(product_id).await
    }
}
