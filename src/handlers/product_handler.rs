//! Catalog handlers: public product reads and admin product management.

use actix_multipart::Multipart;
use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use crate::constants::{
    DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, MSG_IMAGES_ATTACHED, MSG_IMAGE_DELETED,
    MSG_PRODUCT_CREATED, MSG_PRODUCT_DELETED, MSG_PRODUCT_FOUND, MSG_PRODUCT_UPDATED,
    MSG_VARIANT_CREATED, MSG_VARIANT_DELETED, MSG_VARIANT_UPDATED,
};
use crate::errors::ApiError;
use crate::middleware::{require_admin, require_auth};
use crate::models::{
    ApiResponse, CreateSingleProductRequest, CreateVariantProductRequest, CreateVariantRequest,
    PaginatedResponse, ProductListQuery, ProductResponse, UpdateSingleProductRequest,
    UpdateVariantProductRequest, UpdateVariantRequest, VariantResponse,
};
use crate::services::product_service::{parse_product_id, parse_variant_id};
use crate::services::ProductService;
use crate::validators::validation_errors_to_api_error;

/// List visible products
#[utoipa::path(
    get,
    path = "/api/product",
    tag = "Products",
    params(
        ("page" = Option<u64>, Query, description = "Page number (default: 1)"),
        ("per_page" = Option<u64>, Query, description = "Items per page (default: 10, max: 100)")
    ),
    responses(
        (status = 200, description = "List of visible products", body = PaginatedResponse<ProductResponse>)
    )
)]
pub async fn get_products(
    product_service: web::Data<ProductService>,
    query: web::Query<ProductListQuery>,
) -> Result<HttpResponse, ApiError> {
    let page = query.page.unwrap_or(DEFAULT_PAGE_NUMBER).max(1);
    let per_page = query.per_page.unwrap_or(DEFAULT_PAGE_SIZE).min(MAX_PAGE_SIZE);

    let (products, total) = product_service
        .get_all_products(page, per_page, false)
        .await?;

    Ok(HttpResponse::Ok().json(PaginatedResponse::new(products, total, page, per_page)))
}

/// Get a visible product with its variants
#[utoipa::path(
    get,
    path = "/api/product/{id}",
    tag = "Products",
    params(
        ("id" = String, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product found", body = ProductResponse),
        (status = 404, description = "Product not found", body = crate::models::ErrorResponse)
    )
)]
pub async fn get_product(
    product_service: web::Data<ProductService>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let product_id = parse_product_id(&path.into_inner())?;
    let product = product_service.get_product(product_id, false).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(MSG_PRODUCT_FOUND, product)))
}

/// List all products including hidden ones (admin only)
#[utoipa::path(
    get,
    path = "/api/admin/products",
    tag = "Admin",
    params(
        ("page" = Option<u64>, Query, description = "Page number (default: 1)"),
        ("per_page" = Option<u64>, Query, description = "Items per page (default: 10, max: 100)")
    ),
    responses(
        (status = 200, description = "List of products", body = PaginatedResponse<ProductResponse>),
        (status = 401, description = "Unauthorized", body = crate::models::ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn admin_get_products(
    product_service: web::Data<ProductService>,
    query: web::Query<ProductListQuery>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let claims = require_auth(&req)?;
    require_admin(&claims)?;

    let page = query.page.unwrap_or(DEFAULT_PAGE_NUMBER).max(1);
    let per_page = query.per_page.unwrap_or(DEFAULT_PAGE_SIZE).min(MAX_PAGE_SIZE);

    let (products, total) = product_service
        .get_all_products(page, per_page, true)
        .await?;

    Ok(HttpResponse::Ok().json(PaginatedResponse::new(products, total, page, per_page)))
}

/// Get any product including hidden ones (admin only)
#[utoipa::path(
    get,
    path = "/api/admin/product/{id}",
    tag = "Admin",
    params(
        ("id" = String, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product found", body = ProductResponse),
        (status = 401, description = "Unauthorized", body = crate::models::ErrorResponse),
        (status = 404, description = "Product not found", body = crate::models::ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn admin_get_product(
    product_service: web::Data<ProductService>,
    path: web::Path<String>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let claims = require_auth(&req)?;
    require_admin(&claims)?;

    let product_id = parse_product_id(&path.into_inner())?;
    let product = product_service.get_product(product_id, true).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(MSG_PRODUCT_FOUND, product)))
}

/// Create a SINGLE product (admin only)
#[utoipa::path(
    post,
    path = "/api/admin/product/SINGLE",
    tag = "Admin",
    request_body = CreateSingleProductRequest,
    responses(
        (status = 201, description = "Created product", body = ProductResponse),
        (status = 400, description = "Validation error", body = crate::models::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::models::ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_single_product(
    product_service: web::Data<ProductService>,
    body: web::Json<CreateSingleProductRequest>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let claims = require_auth(&req)?;
    require_admin(&claims)?;
    body.validate().map_err(validation_errors_to_api_error)?;

    let product = product_service.create_single(body.into_inner()).await?;
    let response = ProductResponse::from_product(product, None);

    Ok(HttpResponse::Created().json(ApiResponse::success(MSG_PRODUCT_CREATED, response)))
}

/// Create a VARIANT product (admin only)
#[utoipa::path(
    post,
    path = "/api/admin/product/VARIANT",
    tag = "Admin",
    request_body = CreateVariantProductRequest,
    responses(
        (status = 201, description = "Created product", body = ProductResponse),
        (status = 400, description = "Validation error", body = crate::models::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::models::ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_variant_product(
    product_service: web::Data<ProductService>,
    body: web::Json<CreateVariantProductRequest>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let claims = require_auth(&req)?;
    require_admin(&claims)?;
    body.validate().map_err(validation_errors_to_api_error)?;

    let product = product_service
        .create_variant_product(body.into_inner())
        .await?;
    let response = ProductResponse::from_product(product, Some(Vec::new()));

    Ok(HttpResponse::Created().json(ApiResponse::success(MSG_PRODUCT_CREATED, response)))
}

/// Update a SINGLE product (admin only)
#[utoipa::path(
    patch,
    path = "/api/admin/product/SINGLE/{id}",
    tag = "Admin",
    params(
        ("id" = String, Path, description = "Product ID")
    ),
    request_body = UpdateSingleProductRequest,
    responses(
        (status = 200, description = "Updated product", body = ProductResponse),
        (status = 400, description = "Validation error, empty update or type mismatch", body = crate::models::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::models::ErrorResponse),
        (status = 404, description = "Product not found", body = crate::models::ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_single_product(
    product_service: web::Data<ProductService>,
    path: web::Path<String>,
    body: web::Json<UpdateSingleProductRequest>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let claims = require_auth(&req)?;
    require_admin(&claims)?;
    body.validate().map_err(validation_errors_to_api_error)?;

    let product_id = parse_product_id(&path.into_inner())?;
    let product = product_service
        .update_single(product_id, body.into_inner())
        .await?;
    let response = ProductResponse::from_product(product, None);

    Ok(HttpResponse::Ok().json(ApiResponse::success(MSG_PRODUCT_UPDATED, response)))
}

/// Update a VARIANT product (admin only)
#[utoipa::path(
    patch,
    path = "/api/admin/product/VARIANT/{id}",
    tag = "Admin",
    params(
        ("id" = String, Path, description = "Product ID")
    ),
    request_body = UpdateVariantProductRequest,
    responses(
        (status = 200, description = "Updated product", body = ProductResponse),
        (status = 400, description = "Validation error, empty update or type mismatch", body = crate::models::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::models::ErrorResponse),
        (status = 404, description = "Product not found", body = crate::models::ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_variant_product(
    product_service: web::Data<ProductService>,
    path: web::Path<String>,
    body: web::Json<UpdateVariantProductRequest>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let claims = require_auth(&req)?;
    require_admin(&claims)?;
    body.validate().map_err(validation_errors_to_api_error)?;

    let product_id = parse_product_id(&path.into_inner())?;
    product_service
        .update_variant_product(product_id, body.into_inner())
        .await?;
    let response = product_service.get_product(product_id, true).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(MSG_PRODUCT_UPDATED, response)))
}

/// Delete a product with its variants and images (admin only)
#[utoipa::path(
    delete,
    path = "/api/admin/product/{id}",
    tag = "Admin",
    params(
        ("id" = String, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product deleted"),
        (status = 401, description = "Unauthorized", body = crate::models::ErrorResponse),
        (status = 404, description = "Product not found", body = crate::models::ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_product(
    product_service: web::Data<ProductService>,
    path: web::Path<String>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let claims = require_auth(&req)?;
    require_admin(&claims)?;

    let product_id = parse_product_id(&path.into_inner())?;
    product_service.delete_product(product_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::<()>::message(MSG_PRODUCT_DELETED)))
}

/// Add a variant to a VARIANT product (admin only)
#[utoipa::path(
    post,
    path = "/api/admin/product/{id}/variant",
    tag = "Admin",
    params(
        ("id" = String, Path, description = "Product ID")
    ),
    request_body = CreateVariantRequest,
    responses(
        (status = 201, description = "Created variant", body = VariantResponse),
        (status = 400, description = "Validation error or non-VARIANT product", body = crate::models::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::models::ErrorResponse),
        (status = 404, description = "Product not found", body = crate::models::ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn add_variant(
    product_service: web::Data<ProductService>,
    path: web::Path<String>,
    body: web::Json<CreateVariantRequest>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let claims = require_auth(&req)?;
    require_admin(&claims)?;
    body.validate().map_err(validation_errors_to_api_error)?;

    let product_id = parse_product_id(&path.into_inner())?;
    let variant = product_service
        .add_variant(product_id, body.into_inner())
        .await?;
    let response: VariantResponse = variant.into();

    Ok(HttpResponse::Created().json(ApiResponse::success(MSG_VARIANT_CREATED, response)))
}

/// Update a variant (admin only)
#[utoipa::path(
    patch,
    path = "/api/admin/product/{id}/variant/{variant_id}",
    tag = "Admin",
    params(
        ("id" = String, Path, description = "Product ID"),
        ("variant_id" = String, Path, description = "Variant ID")
    ),
    request_body = UpdateVariantRequest,
    responses(
        (status = 200, description = "Updated variant", body = VariantResponse),
        (status = 400, description = "Validation error or empty update", body = crate::models::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::models::ErrorResponse),
        (status = 404, description = "Variant not found", body = crate::models::ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_variant(
    product_service: web::Data<ProductService>,
    path: web::Path<(String, String)>,
    body: web::Json<UpdateVariantRequest>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let claims = require_auth(&req)?;
    require_admin(&claims)?;
    body.validate().map_err(validation_errors_to_api_error)?;

    let (product_id, variant_id) = path.into_inner();
    let variant = product_service
        .update_variant(
            parse_product_id(&product_id)?,
            parse_variant_id(&variant_id)?,
            body.into_inner(),
        )
        .await?;
    let response: VariantResponse = variant.into();

    Ok(HttpResponse::Ok().json(ApiResponse::success(MSG_VARIANT_UPDATED, response)))
}

/// Delete a variant (admin only)
#[utoipa::path(
    delete,
    path = "/api/admin/product/{id}/variant/{variant_id}",
    tag = "Admin",
    params(
        ("id" = String, Path, description = "Product ID"),
        ("variant_id" = String, Path, description = "Variant ID")
    ),
    responses(
        (status = 200, description = "Variant deleted"),
        (status = 401, description = "Unauthorized", body = crate::models::ErrorResponse),
        (status = 404, description = "Variant not found", body = crate::models::ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_variant(
    product_service: web::Data<ProductService>,
    path: web::Path<(String, String)>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let claims = require_auth(&req)?;
    require_admin(&claims)?;

    let (product_id, variant_id) = path.into_inner();
    product_service
        .delete_variant(parse_product_id(&product_id)?, parse_variant_id(&variant_id)?)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::<()>::message(MSG_VARIANT_DELETED)))
}

/// Attach images to a product (admin only)
///
/// Accepts a multipart payload with one or more `images` fields. The batch
/// is rejected as a whole when it would exceed the per-product maximum.
#[utoipa::path(
    put,
    path = "/api/admin/product/{id}/images",
    tag = "Admin",
    params(
        ("id" = String, Path, description = "Product ID")
    ),
    request_body(content_type = "multipart/form-data", description = "Image files in 'images' fields"),
    responses(
        (status = 200, description = "All attached image filenames"),
        (status = 400, description = "Invalid file type, size or image limit exceeded", body = crate::models::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::models::ErrorResponse),
        (status = 404, description = "Product not found", body = crate::models::ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn attach_images(
    product_service: web::Data<ProductService>,
    path: web::Path<String>,
    mut payload: Multipart,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let claims = require_auth(&req)?;
    require_admin(&claims)?;

    let product_id = parse_product_id(&path.into_inner())?;
    let images = product_service
        .attach_images(product_id, &mut payload)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(MSG_IMAGES_ATTACHED, images)))
}

/// Detach an image from a product (admin only)
#[utoipa::path(
    delete,
    path = "/api/admin/product/{id}/images/{filename}",
    tag = "Admin",
    params(
        ("id" = String, Path, description = "Product ID"),
        ("filename" = String, Path, description = "Stored image filename")
    ),
    responses(
        (status = 200, description = "Image deleted"),
        (status = 401, description = "Unauthorized", body = crate::models::ErrorResponse),
        (status = 404, description = "Product or image not found", body = crate::models::ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_image(
    product_service: web::Data<ProductService>,
    path: web::Path<(String, String)>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let claims = require_auth(&req)?;
    require_admin(&claims)?;

    let (product_id, filename) = path.into_inner();
    product_service
        .delete_image(parse_product_id(&product_id)?, &filename)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::<()>::message(MSG_IMAGE_DELETED)))
}
