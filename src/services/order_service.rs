//! Order service: placement, totals and lifecycle.

use log::{debug, info};
use mongodb::bson::{oid::ObjectId, Document};
use std::sync::Arc;

use crate::constants::{
    ERR_INVALID_ORDER_ID, ERR_ORDER_NOT_FOUND, ERR_PRODUCT_NOT_FOUND, ERR_VARIANT_NOT_FOUND,
    ERR_VARIANT_REQUIRED,
};
use crate::errors::ApiError;
use crate::models::{
    CreateOrderRequest, Discount, DiscountType, Order, OrderCondition, OrderedProduct,
    ProductType,
};
use crate::repositories::OrderRepository;
use crate::services::{NotificationService, ProductService, VariantService};
use crate::utils::log_sanitizer::mask_phone;

pub struct OrderService {
    repository: Arc<OrderRepository>,
    products: Arc<ProductService>,
    variants: Arc<VariantService>,
    notifications: Arc<NotificationService>,
}

/// Parse an order ObjectId from a path segment.
pub fn parse_order_id(id: &str) -> Result<ObjectId, ApiError> {
    ObjectId::parse_str(id).map_err(|_| ApiError::BadRequest(ERR_INVALID_ORDER_ID.to_string()))
}

impl OrderService {
    pub fn new(
        repository: Arc<OrderRepository>,
        products: Arc<ProductService>,
        variants: Arc<VariantService>,
        notifications: Arc<NotificationService>,
    ) -> Self {
        Self {
            repository,
            products,
            variants,
            notifications,
        }
    }

    /// Place an order.
    ///
    /// Every requested position is resolved against the catalog and its unit
    /// cost and weight are frozen into the order document, so later catalog
    /// edits do not affect order history.
    pub async fn create(
        &self,
        req: CreateOrderRequest,
        client: Option<ObjectId>,
    ) -> Result<Order, ApiError> {
        let mut positions = Vec::with_capacity(req.products.len());
        let mut titles = Vec::with_capacity(req.products.len());

        for input in &req.products {
            let product_id = ObjectId::parse_str(&input.product_id).map_err(|_| {
                ApiError::BadRequest(format!(
                    "{}: {}",
                    ERR_PRODUCT_NOT_FOUND, input.product_id
                ))
            })?;

            let product = self
                .products
                .find_by_id(product_id)
                .await?
                .ok_or_else(|| {
                    ApiError::BadRequest(format!(
                        "{}: {}",
                        ERR_PRODUCT_NOT_FOUND, input.product_id
                    ))
                })?;

            let (variant_id, unit_cost, unit_weight) = match product.product_type {
                ProductType::Single => (
                    None,
                    product.cost.unwrap_or_default(),
                    product.weight.unwrap_or_default(),
                ),
                ProductType::Variant => {
                    let raw_variant_id = input.variant_id.as_deref().ok_or_else(|| {
                        ApiError::BadRequest(format!(
                            "{}: {}",
                            ERR_VARIANT_REQUIRED, input.product_id
                        ))
                    })?;
                    let variant_id = ObjectId::parse_str(raw_variant_id).map_err(|_| {
                        ApiError::BadRequest(format!(
                            "{}: {}",
                            ERR_VARIANT_NOT_FOUND, raw_variant_id
                        ))
                    })?;
                    let variant = self
                        .variants
                        .find_by_id(product_id, variant_id)
                        .await?
                        .ok_or_else(|| {
                            ApiError::BadRequest(format!(
                                "{}: {}",
                                ERR_VARIANT_NOT_FOUND, raw_variant_id
                            ))
                        })?;
                    (Some(variant_id), variant.cost, variant.weight)
                }
            };

            titles.push(product.title);
            positions.push(OrderedProduct {
                product_id,
                variant_id,
                number: input.number,
                cost: unit_cost,
                weight: unit_weight,
            });
        }

        let (products_cost, weight) = order_totals(&positions);
        let (delivery_cost, delivery_calculated_manually) =
            resolve_delivery(req.delivery, req.delivery_cost, req.discount.as_ref());
        let cost = products_cost + delivery_cost.unwrap_or(0);

        let now = mongodb::bson::DateTime::now();
        let order = Order {
            id: None,
            client,
            phone: req.phone,
            address: req.address,
            username: req.username,
            condition: OrderCondition::New,
            delivery: req.delivery,
            delivery_cost,
            delivery_calculated_manually,
            discount: req.discount,
            additional_information: req.additional_information,
            cost,
            weight,
            products: positions,
            is_test_order: req.is_test_order,
            created_at: now,
            updated_at: now,
        };

        let id = self.repository.insert(&order).await?;
        let order = Order {
            id: Some(id),
            ..order
        };

        info!("Order {} placed by {}", id, mask_phone(&order.phone));
        self.notifications.notify_order_created(&order, &titles);

        Ok(order)
    }

    pub async fn get_order(&self, id: ObjectId) -> Result<Order, ApiError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::NotFound(ERR_ORDER_NOT_FOUND.to_string()))
    }

    /// Admin listing, filterable by condition and test flag.
    pub async fn get_all_orders(
        &self,
        page: u64,
        per_page: u64,
        condition: Option<OrderCondition>,
        is_test_order: Option<bool>,
    ) -> Result<(Vec<Order>, u64), ApiError> {
        let mut filter = Document::new();
        if let Some(condition) = condition {
            filter.insert("condition", condition.to_string());
        }
        if let Some(is_test) = is_test_order {
            filter.insert("is_test_order", is_test);
        }
        debug!("Fetching orders with filter: {:?}", filter);

        let total = self.repository.count(filter.clone()).await?;
        let skip = (page - 1) * per_page;
        let orders = self
            .repository
            .find_with_filter(filter, skip, per_page as i64)
            .await?;

        Ok((orders, total))
    }

    pub async fn update_condition(
        &self,
        id: ObjectId,
        condition: OrderCondition,
    ) -> Result<Order, ApiError> {
        let order = self
            .repository
            .update_condition(id, condition)
            .await?
            .ok_or_else(|| ApiError::NotFound(ERR_ORDER_NOT_FOUND.to_string()))?;

        info!("Order {} moved to {}", id, condition);
        Ok(order)
    }
}

/// Sum up position costs and weights.
fn order_totals(positions: &[OrderedProduct]) -> (i64, i64) {
    positions.iter().fold((0, 0), |(cost, weight), p| {
        (cost + p.cost * p.number, weight + p.weight * p.number)
    })
}

/// Work out the delivery cost and whether it is left for manual calculation.
///
/// Pickup orders carry no delivery cost. A WITHOUT_DELIVERY discount zeroes
/// it. A delivery order without a known cost is flagged for manual
/// calculation.
fn resolve_delivery(
    delivery: bool,
    delivery_cost: Option<i64>,
    discount: Option<&Discount>,
) -> (Option<i64>, bool) {
    if !delivery {
        return (None, false);
    }
    if matches!(
        discount,
        Some(Discount {
            discount_type: DiscountType::WithoutDelivery
        })
    ) {
        return (Some(0), false);
    }
    match delivery_cost {
        Some(cost) => (Some(cost), false),
        None => (None, true),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position(cost: i64, weight: i64, number: i64) -> OrderedProduct {
        OrderedProduct {
            product_id: ObjectId::new(),
            variant_id: None,
            number,
            cost,
            weight,
        }
    }

    #[test]
    fn totals_multiply_by_quantity() {
        let positions = vec![position(2500, 900, 2), position(1000, 300, 1)];
        assert_eq!(order_totals(&positions), (6000, 2100));
    }

    #[test]
    fn totals_of_empty_order_are_zero() {
        assert_eq!(order_totals(&[]), (0, 0));
    }

    #[test]
    fn pickup_has_no_delivery_cost() {
        assert_eq!(resolve_delivery(false, Some(300), None), (None, false));
    }

    #[test]
    fn known_delivery_cost_is_kept() {
        assert_eq!(resolve_delivery(true, Some(300), None), (Some(300), false));
    }

    #[test]
    fn unknown_delivery_cost_is_calculated_manually() {
        assert_eq!(resolve_delivery(true, None, None), (None, true));
    }

    #[test]
    fn discount_zeroes_delivery_cost() {
        let discount = Discount {
            discount_type: DiscountType::WithoutDelivery,
        };
        assert_eq!(
            resolve_delivery(true, Some(300), Some(&discount)),
            (Some(0), false)
        );
        assert_eq!(
            resolve_delivery(true, None, Some(&discount)),
            (Some(0), false)
        );
    }
}
