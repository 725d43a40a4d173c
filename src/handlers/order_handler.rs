//! Order handlers: public placement and admin management.

use actix_web::{web, HttpRequest, HttpResponse};
use mongodb::bson::oid::ObjectId;
use validator::Validate;

use crate::constants::{
    DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE, ERR_INVALID_CONDITION, MAX_PAGE_SIZE,
    MSG_ORDER_CONDITION_UPDATED, MSG_ORDER_CREATED, MSG_ORDER_FOUND,
};
use crate::errors::ApiError;
use crate::middleware::{optional_claims, require_admin, require_auth};
use crate::models::{
    ApiResponse, CreateOrderRequest, OrderCondition, OrderListQuery, OrderResponse,
    PaginatedResponse, UpdateConditionRequest,
};
use crate::services::order_service::parse_order_id;
use crate::services::OrderService;
use crate::validators::validation_errors_to_api_error;

/// Place an order
///
/// Available without authentication; when a valid bearer token is sent the
/// order is linked to the signed-in user.
#[utoipa::path(
    post,
    path = "/api/order",
    tag = "Orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Created order", body = OrderResponse),
        (status = 400, description = "Validation error or unknown product/variant", body = crate::models::ErrorResponse)
    )
)]
pub async fn create_order(
    order_service: web::Data<OrderService>,
    body: web::Json<CreateOrderRequest>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    body.validate().map_err(validation_errors_to_api_error)?;

    let client = optional_claims(&req).and_then(|claims| ObjectId::parse_str(&claims.sub).ok());
    let order = order_service.create(body.into_inner(), client).await?;
    let response: OrderResponse = order.into();

    Ok(HttpResponse::Created().json(ApiResponse::success(MSG_ORDER_CREATED, response)))
}

/// List orders with pagination and optional filters (admin only)
#[utoipa::path(
    get,
    path = "/api/admin/orders",
    tag = "Admin",
    params(
        ("page" = Option<u64>, Query, description = "Page number (default: 1)"),
        ("per_page" = Option<u64>, Query, description = "Items per page (default: 10, max: 100)"),
        ("condition" = Option<String>, Query, description = "Filter by condition: new, processing, ready, done, rejected"),
        ("is_test_order" = Option<bool>, Query, description = "Filter by test flag")
    ),
    responses(
        (status = 200, description = "List of orders", body = PaginatedResponse<OrderResponse>),
        (status = 401, description = "Unauthorized", body = crate::models::ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_orders(
    order_service: web::Data<OrderService>,
    query: web::Query<OrderListQuery>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let claims = require_auth(&req)?;
    require_admin(&claims)?;

    let page = query.page.unwrap_or(DEFAULT_PAGE_NUMBER).max(1);
    let per_page = query.per_page.unwrap_or(DEFAULT_PAGE_SIZE).min(MAX_PAGE_SIZE);

    let condition = match query.condition.as_deref() {
        Some(raw) => Some(
            OrderCondition::parse(raw)
                .ok_or_else(|| ApiError::BadRequest(ERR_INVALID_CONDITION.to_string()))?,
        ),
        None => None,
    };

    let (orders, total) = order_service
        .get_all_orders(page, per_page, condition, query.is_test_order)
        .await?;
    let responses: Vec<OrderResponse> = orders.into_iter().map(|o| o.into()).collect();

    Ok(HttpResponse::Ok().json(PaginatedResponse::new(responses, total, page, per_page)))
}

/// Get an order by ID (admin only)
#[utoipa::path(
    get,
    path = "/api/admin/order/{id}",
    tag = "Admin",
    params(
        ("id" = String, Path, description = "Order ID")
    ),
    responses(
        (status = 200, description = "Order found", body = OrderResponse),
        (status = 401, description = "Unauthorized", body = crate::models::ErrorResponse),
        (status = 404, description = "Order not found", body = crate::models::ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_order(
    order_service: web::Data<OrderService>,
    path: web::Path<String>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let claims = require_auth(&req)?;
    require_admin(&claims)?;

    let order_id = parse_order_id(&path.into_inner())?;
    let order = order_service.get_order(order_id).await?;
    let response: OrderResponse = order.into();

    Ok(HttpResponse::Ok().json(ApiResponse::success(MSG_ORDER_FOUND, response)))
}

/// Move an order through its lifecycle (admin only)
#[utoipa::path(
    patch,
    path = "/api/admin/order/{id}/condition",
    tag = "Admin",
    params(
        ("id" = String, Path, description = "Order ID")
    ),
    request_body = UpdateConditionRequest,
    responses(
        (status = 200, description = "Updated order", body = OrderResponse),
        (status = 400, description = "Validation error", body = crate::models::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::models::ErrorResponse),
        (status = 404, description = "Order not found", body = crate::models::ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_order_condition(
    order_service: web::Data<OrderService>,
    path: web::Path<String>,
    body: web::Json<UpdateConditionRequest>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let claims = require_auth(&req)?;
    require_admin(&claims)?;
    body.validate().map_err(validation_errors_to_api_error)?;

    let order_id = parse_order_id(&path.into_inner())?;
    let condition = OrderCondition::parse(&body.condition)
        .ok_or_else(|| ApiError::BadRequest(ERR_INVALID_CONDITION.to_string()))?;

    let order = order_service.update_condition(order_id, condition).await?;
    let response: OrderResponse = order.into();

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        MSG_ORDER_CONDITION_UPDATED,
        response,
    )))
}
