//! Admin user-management handlers.

use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use crate::constants::{DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, MSG_ROLE_UPDATED};
use crate::errors::ApiError;
use crate::middleware::{require_admin, require_auth};
use crate::models::{
    ApiResponse, PaginatedResponse, UpdateRoleRequest, UserListQuery, UserResponse,
};
use crate::services::UserService;
use crate::validators::validation_errors_to_api_error;

/// List all users with pagination and optional filters (admin only)
#[utoipa::path(
    get,
    path = "/api/admin/users",
    tag = "Admin",
    params(
        ("page" = Option<u64>, Query, description = "Page number (default: 1)"),
        ("per_page" = Option<u64>, Query, description = "Items per page (default: 10, max: 100)"),
        ("role" = Option<String>, Query, description = "Filter by role: 'admin' or 'customer'"),
        ("is_active" = Option<bool>, Query, description = "Filter by active status"),
        ("search" = Option<String>, Query, description = "Search by phone or name")
    ),
    responses(
        (status = 200, description = "List of users", body = PaginatedResponse<UserResponse>),
        (status = 401, description = "Unauthorized", body = crate::models::ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_users(
    user_service: web::Data<UserService>,
    query: web::Query<UserListQuery>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let claims = require_auth(&req)?;
    require_admin(&claims)?;

    let page = query.page.unwrap_or(DEFAULT_PAGE_NUMBER).max(1);
    let per_page = query.per_page.unwrap_or(DEFAULT_PAGE_SIZE).min(MAX_PAGE_SIZE);

    let (users, total) = user_service
        .get_all_users(
            page,
            per_page,
            query.role.as_deref(),
            query.is_active,
            query.search.as_deref(),
        )
        .await?;

    Ok(HttpResponse::Ok().json(PaginatedResponse::new(users, total, page, per_page)))
}

/// Update a user's role (admin only)
#[utoipa::path(
    patch,
    path = "/api/admin/user/{id}/role",
    tag = "Admin",
    params(
        ("id" = String, Path, description = "User ID")
    ),
    request_body = UpdateRoleRequest,
    responses(
        (status = 200, description = "Role updated", body = UserResponse),
        (status = 400, description = "Validation error or self-demotion", body = crate::models::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::models::ErrorResponse),
        (status = 404, description = "User not found", body = crate::models::ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_role(
    user_service: web::Data<UserService>,
    path: web::Path<String>,
    body: web::Json<UpdateRoleRequest>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let claims = require_auth(&req)?;
    require_admin(&claims)?;
    body.validate().map_err(validation_errors_to_api_error)?;

    let user_id = path.into_inner();
    let user = user_service
        .update_role(&claims.sub, &user_id, &body.role)
        .await?;
    let user_response: UserResponse = user.into();

    Ok(HttpResponse::Ok().json(ApiResponse::success(MSG_ROLE_UPDATED, user_response)))
}
