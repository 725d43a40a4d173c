//! Product documents and payloads.

use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;
use validator::Validate;

use crate::models::VariantResponse;

/// Whether a product is sold as-is or through variants.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductType {
    Single,
    Variant,
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductType::Single => write!(f, "SINGLE"),
            ProductType::Variant => write!(f, "VARIANT"),
        }
    }
}

/// Product document stored in MongoDB.
///
/// SINGLE products carry their own cost and weight; VARIANT products
/// delegate both to their variants.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Product {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub product_type: ProductType,
    pub title: String,
    pub description: String,
    pub show: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<i64>,
    #[serde(default)]
    pub ingredients: Vec<String>,
    /// Stored image filenames, bounded by config maximum.
    #[serde(default)]
    pub images: Vec<String>,
    pub created_at: mongodb::bson::DateTime,
    pub updated_at: mongodb::bson::DateTime,
}

/// Request payload for creating a SINGLE product.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateSingleProductRequest {
    /// Product title (1-100 characters)
    #[validate(length(min = 1, max = 100, message = "Title must be between 1 and 100 characters"))]
    #[schema(example = "Cheesecake")]
    pub title: String,
    /// Product description (max 2000 characters)
    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    #[schema(example = "Classic cheesecake with a berry topping")]
    pub description: String,
    /// Whether the product is visible to customers
    #[schema(example = true)]
    pub show: bool,
    /// Price in minor currency units
    #[validate(range(min = 1, message = "Cost must be positive"))]
    #[schema(example = 2500)]
    pub cost: i64,
    /// Weight in grams
    #[validate(range(min = 1, message = "Weight must be positive"))]
    #[schema(example = 900)]
    pub weight: i64,
    /// Ingredient list
    #[serde(default)]
    pub ingredients: Vec<String>,
}

/// Request payload for creating a VARIANT product.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateVariantProductRequest {
    /// Product title (1-100 characters)
    #[validate(length(min = 1, max = 100, message = "Title must be between 1 and 100 characters"))]
    #[schema(example = "Honey cake")]
    pub title: String,
    /// Product description (max 2000 characters)
    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: String,
    /// Whether the product is visible to customers
    #[schema(example = true)]
    pub show: bool,
    /// Ingredient list
    #[serde(default)]
    pub ingredients: Vec<String>,
}

/// Request payload for updating a SINGLE product. All fields optional.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateSingleProductRequest {
    /// Product title (1-100 characters)
    #[validate(length(min = 1, max = 100, message = "Title must be between 1 and 100 characters"))]
    pub title: Option<String>,
    /// Product description (max 2000 characters)
    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: Option<String>,
    /// Whether the product is visible to customers
    pub show: Option<bool>,
    /// Price in minor currency units
    #[validate(range(min = 1, message = "Cost must be positive"))]
    pub cost: Option<i64>,
    /// Weight in grams
    #[validate(range(min = 1, message = "Weight must be positive"))]
    pub weight: Option<i64>,
    /// Ingredient list
    pub ingredients: Option<Vec<String>>,
}

impl UpdateSingleProductRequest {
    /// True when the payload carries at least one field to update.
    pub fn has_updates(&self) -> bool {
        self.title.is_some()
            || self.description.is_some()
            || self.show.is_some()
            || self.cost.is_some()
            || self.weight.is_some()
            || self.ingredients.is_some()
    }
}

/// Request payload for updating a VARIANT product. All fields optional.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateVariantProductRequest {
    /// Product title (1-100 characters)
    #[validate(length(min = 1, max = 100, message = "Title must be between 1 and 100 characters"))]
    pub title: Option<String>,
    /// Product description (max 2000 characters)
    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: Option<String>,
    /// Whether the product is visible to customers
    pub show: Option<bool>,
    /// Ingredient list
    pub ingredients: Option<Vec<String>>,
}

impl UpdateVariantProductRequest {
    /// True when the payload carries at least one field to update.
    pub fn has_updates(&self) -> bool {
        self.title.is_some()
            || self.description.is_some()
            || self.show.is_some()
            || self.ingredients.is_some()
    }
}

/// Query parameters for product listing.
#[derive(Debug, Deserialize)]
pub struct ProductListQuery {
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}

/// Product data returned in API responses.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProductResponse {
    /// Product's unique identifier
    #[schema(example = "507f1f77bcf86cd799439011")]
    pub id: String,
    /// Product type
    pub product_type: ProductType,
    /// Product title
    #[schema(example = "Cheesecake")]
    pub title: String,
    /// Product description
    pub description: String,
    /// Whether the product is visible to customers
    pub show: bool,
    /// Price in minor currency units (SINGLE products only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<i64>,
    /// Weight in grams (SINGLE products only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<i64>,
    /// Ingredient list
    pub ingredients: Vec<String>,
    /// Attached image filenames
    pub images: Vec<String>,
    /// Variants (VARIANT products only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variants: Option<Vec<VariantResponse>>,
    /// When the product was created
    pub created_at: DateTime<Utc>,
}

impl ProductResponse {
    /// Build a response, embedding variants for VARIANT products.
    pub fn from_product(product: Product, variants: Option<Vec<VariantResponse>>) -> Self {
        Self {
            id: product.id.map(|id| id.to_hex()).unwrap_or_default(),
            product_type: product.product_type,
            title: product.title,
            description: product.description,
            show: product.show,
            cost: product.cost,
            weight: product.weight,
            ingredients: product.ingredients,
            images: product.images,
            variants,
            created_at: DateTime::from_timestamp_millis(product.created_at.timestamp_millis())
                .unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_type_serializes_screaming_snake_case() {
        assert_eq!(
            serde_json::to_string(&ProductType::Single).unwrap(),
            "\"SINGLE\""
        );
        assert_eq!(
            serde_json::to_string(&ProductType::Variant).unwrap(),
            "\"VARIANT\""
        );
    }

    #[test]
    fn empty_update_has_no_updates() {
        let update = UpdateSingleProductRequest {
            title: None,
            description: None,
            show: None,
            cost: None,
            weight: None,
            ingredients: None,
        };
        assert!(!update.has_updates());
    }

    #[test]
    fn ingredients_only_counts_as_update() {
        let update = UpdateVariantProductRequest {
            title: None,
            description: None,
            show: None,
            ingredients: Some(vec!["honey".to_string()]),
        };
        assert!(update.has_updates());
    }
}
