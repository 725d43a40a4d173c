//! Product service: catalog CRUD, variants and image attachments.

use actix_multipart::Multipart;
use log::{info, warn};
use mongodb::bson::{doc, oid::ObjectId, Document};
use std::sync::Arc;

use crate::config::CONFIG;
use crate::constants::{
    ERR_IMAGE_NOT_FOUND, ERR_INVALID_PRODUCT_ID, ERR_INVALID_VARIANT_ID, ERR_MAX_IMAGES_EXCEEDED,
    ERR_NOT_VARIANT_PRODUCT, ERR_NO_DATA_FOR_UPDATING, ERR_PRODUCT_NOT_FOUND,
    ERR_PRODUCT_TYPE_MISMATCH,
};
use crate::errors::ApiError;
use crate::models::{
    CreateSingleProductRequest, CreateVariantProductRequest, CreateVariantRequest, Product,
    ProductResponse, ProductType, UpdateSingleProductRequest, UpdateVariantProductRequest,
    UpdateVariantRequest, Variant, VariantResponse,
};
use crate::repositories::ProductRepository;
use crate::services::{ImageStorage, VariantService};

pub struct ProductService {
    repository: Arc<ProductRepository>,
    variants: Arc<VariantService>,
    images: ImageStorage,
}

/// Parse an ObjectId from a path segment.
pub fn parse_product_id(id: &str) -> Result<ObjectId, ApiError> {
    ObjectId::parse_str(id).map_err(|_| ApiError::BadRequest(ERR_INVALID_PRODUCT_ID.to_string()))
}

/// Parse a variant ObjectId from a path segment.
pub fn parse_variant_id(id: &str) -> Result<ObjectId, ApiError> {
    ObjectId::parse_str(id).map_err(|_| ApiError::BadRequest(ERR_INVALID_VARIANT_ID.to_string()))
}

impl ProductService {
    pub fn new(repository: Arc<ProductRepository>, variants: Arc<VariantService>) -> Self {
        Self {
            repository,
            variants,
            images: ImageStorage::new(),
        }
    }

    pub async fn create_single(
        &self,
        req: CreateSingleProductRequest,
    ) -> Result<Product, ApiError> {
        let now = mongodb::bson::DateTime::now();
        let product = Product {
            id: None,
            product_type: ProductType::Single,
            title: req.title,
            description: req.description,
            show: req.show,
            cost: Some(req.cost),
            weight: Some(req.weight),
            ingredients: req.ingredients,
            images: Vec::new(),
            created_at: now,
            updated_at: now,
        };

        let id = self.repository.insert(&product).await?;
        info!("Created SINGLE product {}", id);

        Ok(Product {
            id: Some(id),
            ..product
        })
    }

    pub async fn create_variant_product(
        &self,
        req: CreateVariantProductRequest,
    ) -> Result<Product, ApiError> {
        let now = mongodb::bson::DateTime::now();
        let product = Product {
            id: None,
            product_type: ProductType::Variant,
            title: req.title,
            description: req.description,
            show: req.show,
            cost: None,
            weight: None,
            ingredients: req.ingredients,
            images: Vec::new(),
            created_at: now,
            updated_at: now,
        };

        let id = self.repository.insert(&product).await?;
        info!("Created VARIANT product {}", id);

        Ok(Product {
            id: Some(id),
            ..product
        })
    }

    pub async fn find_by_id(&self, id: ObjectId) -> Result<Option<Product>, ApiError> {
        self.repository.find_by_id(id).await
    }

    /// Fetch a product with its variants embedded.
    ///
    /// Hidden products and variants are filtered out unless the caller is
    /// an admin.
    pub async fn get_product(
        &self,
        id: ObjectId,
        include_hidden: bool,
    ) -> Result<ProductResponse, ApiError> {
        let product = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::NotFound(ERR_PRODUCT_NOT_FOUND.to_string()))?;

        if !product.show && !include_hidden {
            return Err(ApiError::NotFound(ERR_PRODUCT_NOT_FOUND.to_string()));
        }

        self.to_response(product, include_hidden).await
    }

    /// Paginated catalog listing, visible-only for customers.
    pub async fn get_all_products(
        &self,
        page: u64,
        per_page: u64,
        include_hidden: bool,
    ) -> Result<(Vec<ProductResponse>, u64), ApiError> {
        let mut filter = Document::new();
        if !include_hidden {
            filter.insert("show", true);
        }

        let total = self.repository.count(filter.clone()).await?;
        let skip = (page - 1) * per_page;
        let products = self
            .repository
            .find_with_filter(filter, skip, per_page as i64)
            .await?;

        let mut responses = Vec::with_capacity(products.len());
        for product in products {
            responses.push(self.to_response(product, include_hidden).await?);
        }
        Ok((responses, total))
    }

    async fn to_response(
        &self,
        product: Product,
        include_hidden: bool,
    ) -> Result<ProductResponse, ApiError> {
        let variants = match (product.product_type, product.id) {
            (ProductType::Variant, Some(id)) => {
                let variants: Vec<VariantResponse> = self
                    .variants
                    .find_by_product(id, !include_hidden)
                    .await?
                    .into_iter()
                    .map(|v| v.into())
                    .collect();
                Some(variants)
            }
            _ => None,
        };
        Ok(ProductResponse::from_product(product, variants))
    }

    /// Partially update a SINGLE product; an empty payload is rejected.
    pub async fn update_single(
        &self,
        id: ObjectId,
        update: UpdateSingleProductRequest,
    ) -> Result<Product, ApiError> {
        if !update.has_updates() {
            return Err(ApiError::BadRequest(ERR_NO_DATA_FOR_UPDATING.to_string()));
        }

        let mut set = doc! { "updated_at": mongodb::bson::DateTime::now() };
        if let Some(title) = update.title {
            set.insert("title", title);
        }
        if let Some(description) = update.description {
            set.insert("description", description);
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
        if let Some(ingredients) = update.ingredients {
            set.insert("ingredients", ingredients);
        }

        self.update_typed(id, ProductType::Single, set).await
    }

    /// Partially update a VARIANT product; an empty payload is rejected.
    pub async fn update_variant_product(
        &self,
        id: ObjectId,
        update: UpdateVariantProductRequest,
    ) -> Result<Product, ApiError> {
        if !update.has_updates() {
            return Err(ApiError::BadRequest(ERR_NO_DATA_FOR_UPDATING.to_string()));
        }

        let mut set = doc! { "updated_at": mongodb::bson::DateTime::now() };
        if let Some(title) = update.title {
            set.insert("title", title);
        }
        if let Some(description) = update.description {
            set.insert("description", description);
        }
        if let Some(show) = update.show {
            set.insert("show", show);
        }
        if let Some(ingredients) = update.ingredients {
            set.insert("ingredients", ingredients);
        }

        self.update_typed(id, ProductType::Variant, set).await
    }

    /// Run a `$set` update constrained to the expected product type.
    ///
    /// Distinguishes "wrong route for this product" from "no such product"
    /// in the error.
    async fn update_typed(
        &self,
        id: ObjectId,
        product_type: ProductType,
        set: Document,
    ) -> Result<Product, ApiError> {
        let filter = doc! { "_id": id, "product_type": product_type.to_string() };
        match self.repository.find_and_update(filter, set).await? {
            Some(product) => Ok(product),
            None => match self.repository.find_by_id(id).await? {
                Some(_) => Err(ApiError::BadRequest(ERR_PRODUCT_TYPE_MISMATCH.to_string())),
                None => Err(ApiError::NotFound(ERR_PRODUCT_NOT_FOUND.to_string())),
            },
        }
    }

    /// Add a variant to a VARIANT product.
    pub async fn add_variant(
        &self,
        product_id: ObjectId,
        req: CreateVariantRequest,
    ) -> Result<Variant, ApiError> {
        let product = self
            .repository
            .find_by_id(product_id)
            .await?
            .ok_or_else(|| ApiError::NotFound(ERR_PRODUCT_NOT_FOUND.to_string()))?;

        if product.product_type != ProductType::Variant {
            return Err(ApiError::BadRequest(ERR_NOT_VARIANT_PRODUCT.to_string()));
        }

        self.variants.create(product_id, req).await
    }

    pub async fn update_variant(
        &self,
        product_id: ObjectId,
        variant_id: ObjectId,
        update: UpdateVariantRequest,
    ) -> Result<Variant, ApiError> {
        self.variants
            .find_and_update(product_id, variant_id, update)
            .await
    }

    pub async fn delete_variant(
        &self,
        product_id: ObjectId,
        variant_id: ObjectId,
    ) -> Result<(), ApiError> {
        self.variants.delete(product_id, variant_id).await
    }

    /// Delete a product with its variants and stored images.
    pub async fn delete_product(&self, id: ObjectId) -> Result<(), ApiError> {
        let product = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::NotFound(ERR_PRODUCT_NOT_FOUND.to_string()))?;

        if !self.repository.delete(id).await? {
            return Err(ApiError::NotFound(ERR_PRODUCT_NOT_FOUND.to_string()));
        }

        let removed_variants = self.variants.delete_by_product(id).await?;
        for image in &product.images {
            self.images.remove(image);
        }
        info!(
            "Deleted product {} with {} variants and {} images",
            id,
            removed_variants,
            product.images.len()
        );
        Ok(())
    }

    /// Attach uploaded images to a product, honoring the configured maximum.
    ///
    /// The whole batch is rejected when it would push the product over the
    /// limit.
    pub async fn attach_images(
        &self,
        id: ObjectId,
        payload: &mut Multipart,
    ) -> Result<Vec<String>, ApiError> {
        let product = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::NotFound(ERR_PRODUCT_NOT_FOUND.to_string()))?;

        let saved = self.images.save_images(payload).await?;

        if product.images.len() + saved.len() > CONFIG.product.image.maximum {
            warn!(
                "Rejecting {} images for product {}: {} already attached, maximum is {}",
                saved.len(),
                id,
                product.images.len(),
                CONFIG.product.image.maximum
            );
            for filename in &saved {
                self.images.remove(filename);
            }
            return Err(ApiError::BadRequest(ERR_MAX_IMAGES_EXCEEDED.to_string()));
        }

        let updated = self
            .repository
            .add_to_set_images(id, &saved)
            .await?
            .ok_or_else(|| ApiError::NotFound(ERR_PRODUCT_NOT_FOUND.to_string()))?;

        info!("Attached {} images to product {}", saved.len(), id);
        Ok(updated.images)
    }

    /// Detach a stored image from a product and remove the file.
    pub async fn delete_image(&self, id: ObjectId, filename: &str) -> Result<(), ApiError> {
        let product = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::NotFound(ERR_PRODUCT_NOT_FOUND.to_string()))?;

        if !product.images.iter().any(|image| image == filename) {
            return Err(ApiError::NotFound(ERR_IMAGE_NOT_FOUND.to_string()));
        }

        self.repository.pull_image(id, filename).await?;
        self.images.remove(filename);
        info!("Detached image {} from product {}", filename, id);
        Ok(())
    }
}
