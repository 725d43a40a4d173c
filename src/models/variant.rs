//! Variant documents and payloads.
//!
//! A variant is a purchasable option of a VARIANT-typed product carrying its
//! own price and weight (e.g. a size).

use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Variant document stored in MongoDB.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Variant {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub product_id: ObjectId,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub show: bool,
    pub cost: i64,
    pub weight: i64,
    pub created_at: mongodb::bson::DateTime,
    pub updated_at: mongodb::bson::DateTime,
}

/// Request payload for adding a variant to a product.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateVariantRequest {
    /// Variant title (1-100 characters)
    #[validate(length(min = 1, max = 100, message = "Title must be between 1 and 100 characters"))]
    #[schema(example = "1 kg")]
    pub title: String,
    /// Optional icon identifier
    #[validate(length(max = 100, message = "Icon must be at most 100 characters"))]
    pub icon: Option<String>,
    /// Whether the variant is visible to customers
    #[schema(example = true)]
    pub show: bool,
    /// Price in minor currency units
    #[validate(range(min = 1, message = "Cost must be positive"))]
    #[schema(example = 1500)]
    pub cost: i64,
    /// Weight in grams
    #[validate(range(min = 1, message = "Weight must be positive"))]
    #[schema(example = 1000)]
    pub weight: i64,
}

/// Request payload for updating a variant. All fields optional.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateVariantRequest {
    /// Variant title (1-100 characters)
    #[validate(length(min = 1, max = 100, message = "Title must be between 1 and 100 characters"))]
    pub title: Option<String>,
    /// Icon identifier
    #[validate(length(max = 100, message = "Icon must be at most 100 characters"))]
    pub icon: Option<String>,
    /// Whether the variant is visible to customers
    pub show: Option<bool>,
    /// Price in minor currency units
    #[validate(range(min = 1, message = "Cost must be positive"))]
    pub cost: Option<i64>,
    /// Weight in grams
    #[validate(range(min = 1, message = "Weight must be positive"))]
    pub weight: Option<i64>,
}

impl UpdateVariantRequest {
    /// True when the payload carries at least one field to update.
    pub fn has_updates(&self) -> bool {
        self.title.is_some()
            || self.icon.is_some()
            || self.show.is_some()
            || self.cost.is_some()
            || self.weight.is_some()
    }
}

/// Variant data returned in API responses.
#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
pub struct VariantResponse {
    /// Variant's unique identifier
    #[schema(example = "507f1f77bcf86cd799439021")]
    pub id: String,
    /// Owning product id
    #[schema(example = "507f1f77bcf86cd799439011")]
    pub product_id: String,
    /// Variant title
    #[schema(example = "1 kg")]
    pub title: String,
    /// Icon identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Whether the variant is visible to customers
    pub show: bool,
    /// Price in minor currency units
    pub cost: i64,
    /// Weight in grams
    pub weight: i64,
    /// When the variant was created
    pub created_at: DateTime<Utc>,
}

impl From<Variant> for VariantResponse {
    fn from(variant: Variant) -> Self {
        Self {
            id: variant.id.map(|id| id.to_hex()).unwrap_or_default(),
            product_id: variant.product_id.to_hex(),
            title: variant.title,
            icon: variant.icon,
            show: variant.show,
            cost: variant.cost,
            weight: variant.weight,
            created_at: DateTime::from_timestamp_millis(variant.created_at.timestamp_millis())
                .unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_update_has_no_updates() {
        let update = UpdateVariantRequest {
            title: None,
            icon: None,
            show: None,
            cost: None,
            weight: None,
        };
        assert!(!update.has_updates());
    }

    #[test]
    fn single_field_counts_as_update() {
        let update = UpdateVariantRequest {
            title: None,
            icon: None,
            show: Some(false),
            cost: None,
            weight: None,
        };
        assert!(update.has_updates());
    }
}
