//! Order documents and payloads.

use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;
use validator::Validate;

/// Order lifecycle state.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum OrderCondition {
    New,
    Processing,
    Ready,
    Done,
    Rejected,
}

impl fmt::Display for OrderCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderCondition::New => write!(f, "new"),
            OrderCondition::Processing => write!(f, "processing"),
            OrderCondition::Ready => write!(f, "ready"),
            OrderCondition::Done => write!(f, "done"),
            OrderCondition::Rejected => write!(f, "rejected"),
        }
    }
}

impl OrderCondition {
    /// Parse a condition from its wire form.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "new" => Some(OrderCondition::New),
            "processing" => Some(OrderCondition::Processing),
            "ready" => Some(OrderCondition::Ready),
            "done" => Some(OrderCondition::Done),
            "rejected" => Some(OrderCondition::Rejected),
            _ => None,
        }
    }
}

/// Supported discount kinds.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, ToSchema)]
pub enum DiscountType {
    #[serde(rename = "WITHOUT_DELIVERY")]
    WithoutDelivery,
}

/// Discount applied to an order.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, ToSchema)]
pub struct Discount {
    #[serde(rename = "type")]
    pub discount_type: DiscountType,
}

/// A product position frozen into an order.
///
/// Unit cost and weight are snapshotted at order time so later catalog
/// edits do not rewrite order history.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct OrderedProduct {
    pub product_id: ObjectId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant_id: Option<ObjectId>,
    pub number: i64,
    /// Unit price in minor currency units
    pub cost: i64,
    /// Unit weight in grams
    pub weight: i64,
}

/// Order document stored in MongoDB.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Order {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// The signed-in user who placed the order, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client: Option<ObjectId>,
    pub phone: String,
    pub address: String,
    pub username: String,
    pub condition: OrderCondition,
    pub delivery: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_cost: Option<i64>,
    pub delivery_calculated_manually: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount: Option<Discount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_information: Option<String>,
    /// Order total in minor currency units, delivery included when known.
    pub cost: i64,
    /// Order weight in grams
    pub weight: i64,
    pub products: Vec<OrderedProduct>,
    pub is_test_order: bool,
    pub created_at: mongodb::bson::DateTime,
    pub updated_at: mongodb::bson::DateTime,
}

/// A selected product in an order creation request.
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct OrderedProductInput {
    /// Identifier of the selected product
    #[schema(example = "507f1f77bcf86cd799439011")]
    pub product_id: String,
    /// Identifier of the selected variant, for VARIANT products
    #[schema(example = "507f1f77bcf86cd799439021")]
    pub variant_id: Option<String>,
    /// Quantity (1-99)
    #[validate(range(min = 1, max = 99, message = "Quantity must be between 1 and 99"))]
    #[schema(example = 2)]
    pub number: i64,
}

/// Request payload for placing an order.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateOrderRequest {
    /// Customer phone in international format
    #[validate(custom(function = "crate::validators::validate_phone"))]
    #[schema(example = "+79991234567")]
    pub phone: String,
    /// Delivery address or pickup point
    #[validate(length(
        min = 1,
        max = 500,
        message = "Address must be between 1 and 500 characters"
    ))]
    #[schema(example = "Lenina st. 1, apt. 5")]
    pub address: String,
    /// Customer display name
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    #[schema(example = "Ivan")]
    pub username: String,
    /// Delivery requested (false means pickup)
    pub delivery: bool,
    /// Delivery cost when already known, in minor currency units
    #[validate(range(min = 0, message = "Delivery cost must not be negative"))]
    pub delivery_cost: Option<i64>,
    /// Discount to apply
    pub discount: Option<Discount>,
    /// Free-form comment for the order
    #[validate(length(max = 1000, message = "Comment must be at most 1000 characters"))]
    pub additional_information: Option<String>,
    /// Selected products (1-100 positions)
    #[validate]
    #[validate(length(
        min = 1,
        max = 100,
        message = "Order must contain between 1 and 100 products"
    ))]
    pub products: Vec<OrderedProductInput>,
    /// Marks orders placed for testing purposes
    #[serde(default)]
    pub is_test_order: bool,
}

/// Request payload for moving an order through its lifecycle.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateConditionRequest {
    /// New condition: new, processing, ready, done or rejected
    #[validate(custom(function = "crate::validators::validate_condition"))]
    #[schema(example = "processing")]
    pub condition: String,
}

/// Query parameters for the admin order list.
#[derive(Debug, Deserialize)]
pub struct OrderListQuery {
    pub page: Option<u64>,
    pub per_page: Option<u64>,
    pub condition: Option<String>,
    pub is_test_order: Option<bool>,
}

/// Ordered product data returned in API responses.
#[derive(Debug, Serialize, ToSchema)]
pub struct OrderedProductResponse {
    /// Product identifier
    pub product_id: String,
    /// Variant identifier, for VARIANT products
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant_id: Option<String>,
    /// Quantity
    pub number: i64,
    /// Unit price in minor currency units
    pub cost: i64,
    /// Unit weight in grams
    pub weight: i64,
}

impl From<OrderedProduct> for OrderedProductResponse {
    fn from(product: OrderedProduct) -> Self {
        Self {
            product_id: product.product_id.to_hex(),
            variant_id: product.variant_id.map(|id| id.to_hex()),
            number: product.number,
            cost: product.cost,
            weight: product.weight,
        }
    }
}

/// Order data returned in API responses.
#[derive(Debug, Serialize, ToSchema)]
pub struct OrderResponse {
    /// Order's unique identifier
    #[schema(example = "507f1f77bcf86cd799439031")]
    pub id: String,
    /// The signed-in user who placed the order, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,
    /// Customer phone
    pub phone: String,
    /// Delivery address or pickup point
    pub address: String,
    /// Customer display name
    pub username: String,
    /// Order lifecycle state
    pub condition: OrderCondition,
    /// Delivery requested
    pub delivery: bool,
    /// Delivery cost in minor currency units, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_cost: Option<i64>,
    /// Delivery cost left for manual calculation
    pub delivery_calculated_manually: bool,
    /// Applied discount
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount: Option<Discount>,
    /// Free-form comment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_information: Option<String>,
    /// Order total in minor currency units
    pub cost: i64,
    /// Order weight in grams
    pub weight: i64,
    /// Ordered products
    pub products: Vec<OrderedProductResponse>,
    /// Test order flag
    pub is_test_order: bool,
    /// When the order was placed
    pub created_at: DateTime<Utc>,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.id.map(|id| id.to_hex()).unwrap_or_default(),
            client: order.client.map(|id| id.to_hex()),
            phone: order.phone,
            address: order.address,
            username: order.username,
            condition: order.condition,
            delivery: order.delivery,
            delivery_cost: order.delivery_cost,
            delivery_calculated_manually: order.delivery_calculated_manually,
            discount: order.discount,
            additional_information: order.additional_information,
            cost: order.cost,
            weight: order.weight,
            products: order.products.into_iter().map(|p| p.into()).collect(),
            is_test_order: order.is_test_order,
            created_at: DateTime::from_timestamp_millis(order.created_at.timestamp_millis())
                .unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn condition_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&OrderCondition::Processing).unwrap(),
            "\"processing\""
        );
        assert_eq!(OrderCondition::parse("REJECTED"), Some(OrderCondition::Rejected));
        assert_eq!(OrderCondition::parse("shipped"), None);
    }

    #[test]
    fn discount_uses_type_field() {
        let discount = Discount {
            discount_type: DiscountType::WithoutDelivery,
        };
        assert_eq!(
            serde_json::to_string(&discount).unwrap(),
            "{\"type\":\"WITHOUT_DELIVERY\"}"
        );
    }
}
